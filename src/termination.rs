use super::*;

/// External collaborator consumed by the direction core: inspects
/// iterate/radius/QP state after each probe and may raise the "radii
/// should be updated" escape flag, which also acts as an escape-success
/// condition inside the inner loop. Takes `quantities` mutably because
/// raising the flag is expected to actually adjust `trust_region_radius`/
/// `stationarity_radius` on its way out, not just report a bool.
pub trait Termination {
    fn check_conditions_direction_computation(
        &mut self,
        quantities: &mut Quantities,
        qp: &dyn QpSolver,
    ) -> bool;
}

/// Shrinks the stationarity radius (and relaxes the trust radius slightly)
/// once the QP's dual objective is small relative to the gradient norm at
/// `x_k` — a signal that the local cutting-plane model already
/// approximates stationarity well. Never raises the escape flag on its
/// own otherwise, which keeps the acceptance tests (rather than this
/// escape path) doing the work in the common case.
pub struct DefaultTermination {
    pub shrink_factor: Floating,
    pub widen_factor: Floating,
    pub relative_tolerance: Floating,
}

impl Default for DefaultTermination {
    fn default() -> Self {
        DefaultTermination {
            shrink_factor: 0.5,
            widen_factor: 1.1,
            relative_tolerance: 1e-6,
        }
    }
}

impl Termination for DefaultTermination {
    fn check_conditions_direction_computation(
        &mut self,
        quantities: &mut Quantities,
        qp: &dyn QpSolver,
    ) -> bool {
        let grad_norm = quantities
            .current_iterate
            .g()
            .as_ref()
            .map(|g| g.norm())
            .unwrap_or(0.0);
        if grad_norm == 0.0 {
            return false;
        }
        let q = qp.dual_objective_quadratic_value();
        if q.abs() < self.relative_tolerance * grad_norm * grad_norm {
            quantities.stationarity_radius *= self.shrink_factor;
            quantities.trust_region_radius *= self.widen_factor;
            debug!(
                target: "bundle",
                "termination escape: shrinking stationarity radius to {:.3e}, widening trust radius to {:.3e}",
                quantities.stationarity_radius,
                quantities.trust_region_radius,
            );
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubQp {
        q: Floating,
    }
    impl QpSolver for StubQp {
        fn set_scalar(&mut self, _: Floating) {}
        fn set_inexact_solution_tolerance(&mut self, _: Floating) {}
        fn set_vector_list(&mut self, _: Vec<Rc<DVector<Floating>>>, _: Vec<Floating>) {}
        fn add_data(&mut self, _: Vec<Rc<DVector<Floating>>>, _: Vec<Floating>) {}
        fn solve_qp(&mut self, _: &DMatrix<Floating>) {}
        fn solve_qp_hot(&mut self, _: &DMatrix<Floating>) {}
        fn set_primal_solution_to_zero(&mut self) {}
        fn status(&self) -> QpStatus {
            QpStatus::Success
        }
        fn primal_solution(&self) -> &DVector<Floating> {
            unimplemented!()
        }
        fn primal_solution_norm2_squared(&self) -> Floating {
            0.0
        }
        fn primal_solution_norm_inf(&self) -> Floating {
            0.0
        }
        fn dual_objective_quadratic_value(&self) -> Floating {
            self.q
        }
        fn combination_translated_norm2_squared(&self) -> Floating {
            0.0
        }
        fn dual_solution_omega_length(&self) -> usize {
            0
        }
        fn dual_solution_omega(&self) -> &[Floating] {
            &[]
        }
        fn number_of_iterations(&self) -> usize {
            0
        }
        fn vector_list_length(&self) -> usize {
            0
        }
        fn kkt_error_dual(&self) -> Floating {
            0.0
        }
    }

    #[test]
    fn no_escape_when_gradient_is_unknown() {
        let mut q = Quantities::new(DVector::from_vec(vec![0.0]), 1.0, 1.0);
        q.current_iterate = Iterate::new(DVector::from_vec(vec![0.0]));
        let mut term = DefaultTermination::default();
        assert!(!term.check_conditions_direction_computation(&mut q, &StubQp { q: 0.0 }));
    }

    #[test]
    fn escapes_and_adapts_radii_when_dual_value_is_negligible() {
        let mut q = Quantities::new(DVector::from_vec(vec![0.0]), 1.0, 1.0);
        let oracle = JointOracle(|x: &DVector<Floating>| Evaluation::new(x[0] * x[0], 2.0 * x.clone()));
        q.current_iterate = Iterate::new(DVector::from_vec(vec![5.0]));
        q.current_iterate.evaluate_objective_and_gradient(&oracle);
        let mut term = DefaultTermination::default();
        assert!(term.check_conditions_direction_computation(&mut q, &StubQp { q: 1e-20 }));
        assert_eq!(q.stationarity_radius, 0.5);
        assert_eq!(q.trust_region_radius, 1.1);
    }

    #[test]
    fn declining_the_escape_leaves_radii_untouched() {
        let mut q = Quantities::new(DVector::from_vec(vec![0.0]), 2.0, 3.0);
        let oracle = JointOracle(|x: &DVector<Floating>| Evaluation::new(x[0] * x[0], 2.0 * x.clone()));
        q.current_iterate = Iterate::new(DVector::from_vec(vec![5.0]));
        q.current_iterate.evaluate_objective_and_gradient(&oracle);
        let mut term = DefaultTermination::default();
        assert!(!term.check_conditions_direction_computation(&mut q, &StubQp { q: 1.0 }));
        assert_eq!(q.trust_region_radius, 2.0);
        assert_eq!(q.stationarity_radius, 3.0);
    }
}
