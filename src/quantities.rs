use super::*;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Running counts and timers kept by `Quantities`. Plain increment methods
/// so the direction core's epilogue has one place to touch on every exit
/// path.
#[derive(derive_getters::Getters, Debug, Default, Clone, Copy)]
pub struct Counters {
    inner_iteration: usize,
    qp_iteration: usize,
    total_inner_iterations: usize,
    total_qp_iterations: usize,
    direction_computation_time: Duration,
}

impl Counters {
    pub fn reset_inner(&mut self) {
        self.inner_iteration = 0;
        self.qp_iteration = 0;
    }

    pub fn bump_inner(&mut self) {
        self.inner_iteration += 1;
    }

    pub fn bump_qp(&mut self) {
        self.qp_iteration += 1;
    }

    /// Folds the just-finished call's inner/QP counts into the running
    /// totals and accumulates elapsed time. Called exactly once, from the
    /// direction core's epilogue.
    pub fn fold_into_totals(&mut self, elapsed: Duration) {
        self.total_inner_iterations += self.inner_iteration;
        self.total_qp_iterations += self.qp_iteration;
        self.direction_computation_time += elapsed;
    }
}

/// Shared mutable state threaded through one outer-loop iteration and, via
/// `point_set`, across the whole solve. Owned by the outer loop; the
/// direction-computation core treats its mutation as local to the call.
pub struct Quantities {
    pub current_iterate: Iterate,
    pub trial_iterate: Iterate,
    pub direction: DVector<Floating>,
    pub point_set: Vec<Rc<Iterate>>,
    pub number_of_variables: usize,
    pub trust_region_radius: Floating,
    pub stationarity_radius: Floating,
    pub counters: Counters,
    pub start_time: Instant,
    pub cpu_time_limit: Duration,
    pub evaluate_function_with_gradient: bool,
}

impl Quantities {
    pub fn new(x0: DVector<Floating>, trust_region_radius: Floating, stationarity_radius: Floating) -> Self {
        let n = x0.len();
        Quantities {
            current_iterate: Iterate::new(x0.clone()),
            trial_iterate: Iterate::new(x0),
            direction: DVector::zeros(n),
            point_set: Vec::new(),
            number_of_variables: n,
            trust_region_radius,
            stationarity_radius,
            counters: Counters::default(),
            start_time: Instant::now(),
            cpu_time_limit: Duration::from_secs(u64::MAX / 2),
            evaluate_function_with_gradient: true,
        }
    }

    pub fn with_cpu_time_limit(mut self, limit: Duration) -> Self {
        self.cpu_time_limit = limit;
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn cpu_time_exhausted(&self) -> bool {
        self.elapsed() >= self.cpu_time_limit
    }

    pub fn push_point(&mut self, it: Iterate) -> Rc<Iterate> {
        let rc = Rc::new(it);
        self.point_set.push(Rc::clone(&rc));
        rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_fold_totals_exactly_once_per_call() {
        let mut c = Counters::default();
        c.bump_inner();
        c.bump_inner();
        c.bump_qp();
        c.fold_into_totals(Duration::from_millis(5));
        assert_eq!(*c.total_inner_iterations(), 2);
        assert_eq!(*c.total_qp_iterations(), 1);
        c.reset_inner();
        c.bump_inner();
        c.fold_into_totals(Duration::from_millis(1));
        assert_eq!(*c.total_inner_iterations(), 3);
        assert_eq!(*c.inner_iteration(), 1);
    }

    #[test]
    fn point_set_is_append_only_and_shares_ownership() {
        let mut q = Quantities::new(DVector::from_vec(vec![0.0, 0.0]), 1.0, 1.0);
        let rc = q.push_point(Iterate::new(DVector::from_vec(vec![1.0, 1.0])));
        assert_eq!(q.point_set.len(), 1);
        assert_eq!(Rc::strong_count(&rc), 2);
    }
}
