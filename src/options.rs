use super::*;

/// Configuration for `compute_direction`. `with_*` builders validate their
/// argument and return `Self`, the same style used by `BackTracking`'s
/// constructor arguments elsewhere in this crate.
#[derive(Debug, Clone, Copy, derive_getters::Getters)]
pub struct DirectionOptions {
    add_far_points: bool,
    fail_on_iteration_limit: bool,
    fail_on_qp_failure: bool,
    try_aggregation: bool,
    try_gradient_step: bool,
    try_shortened_step: bool,
    aggregation_size_threshold: Floating,
    downshift_constant: Floating,
    gradient_stepsize: Floating,
    shortened_stepsize: Floating,
    step_acceptance_tolerance: Floating,
    inner_iteration_limit: usize,
}

impl Default for DirectionOptions {
    fn default() -> Self {
        DirectionOptions {
            add_far_points: false,
            fail_on_iteration_limit: false,
            fail_on_qp_failure: false,
            try_aggregation: false,
            try_gradient_step: true,
            try_shortened_step: true,
            aggregation_size_threshold: 10.0,
            downshift_constant: 1e-2,
            gradient_stepsize: 1e-4,
            shortened_stepsize: 1e-2,
            step_acceptance_tolerance: 1e-8,
            inner_iteration_limit: 20,
        }
    }
}

impl DirectionOptions {
    pub fn with_add_far_points(mut self, v: bool) -> Self {
        self.add_far_points = v;
        self
    }
    pub fn with_fail_on_iteration_limit(mut self, v: bool) -> Self {
        self.fail_on_iteration_limit = v;
        self
    }
    pub fn with_fail_on_qp_failure(mut self, v: bool) -> Self {
        self.fail_on_qp_failure = v;
        self
    }
    pub fn with_try_aggregation(mut self, v: bool) -> Self {
        self.try_aggregation = v;
        self
    }
    pub fn with_try_gradient_step(mut self, v: bool) -> Self {
        self.try_gradient_step = v;
        self
    }
    pub fn with_try_shortened_step(mut self, v: bool) -> Self {
        self.try_shortened_step = v;
        self
    }
    pub fn with_aggregation_size_threshold(mut self, v: Floating) -> Self {
        assert!(v > 0.0, "aggregation_size_threshold must be positive");
        self.aggregation_size_threshold = v;
        self
    }
    pub fn with_downshift_constant(mut self, v: Floating) -> Self {
        assert!(v >= 0.0, "downshift_constant must be nonnegative");
        self.downshift_constant = v;
        self
    }
    pub fn with_gradient_stepsize(mut self, v: Floating) -> Self {
        assert!(v > 0.0, "gradient_stepsize must be positive");
        self.gradient_stepsize = v;
        self
    }
    pub fn with_shortened_stepsize(mut self, v: Floating) -> Self {
        assert!(
            v > 0.0 && v <= 1.0,
            "shortened_stepsize must lie in (0, 1]"
        );
        self.shortened_stepsize = v;
        self
    }
    pub fn with_step_acceptance_tolerance(mut self, v: Floating) -> Self {
        assert!(v > 0.0, "step_acceptance_tolerance must be positive");
        self.step_acceptance_tolerance = v;
        self
    }
    pub fn with_inner_iteration_limit(mut self, v: usize) -> Self {
        self.inner_iteration_limit = v;
        self
    }

    pub fn aggregation_threshold_count(&self, n: usize) -> Floating {
        self.aggregation_size_threshold * (n as Floating)
    }
}
