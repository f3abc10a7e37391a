use super::*;

/// Holds the five pluggable capabilities the direction-computation core
/// consumes. The core only calls into `qp_solver` and `termination`
/// directly; `line_search`, `hessian_update` and `point_set_update` are
/// reached only for their `iteration_null_string` when the core formats a
/// line for a strategy it didn't consult (the outer loop drives those
/// three directly, between calls to `compute_direction`).
pub struct Strategies {
    pub qp_solver: Box<dyn QpSolver>,
    pub termination: Box<dyn Termination>,
    pub line_search: Box<dyn LineSearch>,
    pub hessian_update: Box<dyn HessianUpdate>,
    pub point_set_update: Box<dyn PointSetUpdate>,
}

impl Strategies {
    pub fn new(number_of_variables: usize) -> Self {
        Strategies {
            qp_solver: Box::new(BundleQpSolver::new(number_of_variables)),
            termination: Box::new(DefaultTermination::default()),
            line_search: Box::new(NoSearch),
            hessian_update: Box::new(IdentityHessian::new(number_of_variables)),
            point_set_update: Box::new(DefaultPointSetUpdate::default()),
        }
    }

    pub fn with_qp_solver(mut self, qp_solver: Box<dyn QpSolver>) -> Self {
        self.qp_solver = qp_solver;
        self
    }

    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_line_search(mut self, line_search: Box<dyn LineSearch>) -> Self {
        self.line_search = line_search;
        self
    }

    pub fn with_hessian_update(mut self, hessian_update: Box<dyn HessianUpdate>) -> Self {
        self.hessian_update = hessian_update;
        self
    }

    pub fn with_point_set_update(mut self, point_set_update: Box<dyn PointSetUpdate>) -> Self {
        self.point_set_update = point_set_update;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategies_report_their_null_strings() {
        let s = Strategies::new(2);
        assert_eq!(s.line_search.iteration_null_string(), "---------");
        assert_eq!(s.hessian_update.iteration_null_string(), "--------- ---------");
        assert_eq!(s.point_set_update.iteration_null_string(), "--------");
    }
}
