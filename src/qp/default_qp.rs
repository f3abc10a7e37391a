use super::*;

/// Default `QpSolver`: projected-gradient ascent on the QP's Lagrangian
/// dual, where the dual weights ω live on the simplex over bundle rows.
/// Not an active-set or interior-point method; a correct, simple solver
/// sized for the bundle counts this crate's direction core builds (see
/// DESIGN.md for the grounding of this trade-off).
pub struct BundleQpSolver {
    g: Vec<Rc<DVector<Floating>>>,
    b: Vec<Floating>,
    delta: Floating,
    rho: Floating,
    omega: Vec<Floating>,
    primal: DVector<Floating>,
    status: QpStatus,
    iterations: usize,
    max_dual_iterations: usize,
    dual_step: Floating,
    last_inverse_hessian: DMatrix<Floating>,
}

impl BundleQpSolver {
    pub fn new(n: usize) -> Self {
        BundleQpSolver {
            g: Vec::new(),
            b: Vec::new(),
            delta: 1.0,
            rho: 1.0,
            omega: Vec::new(),
            primal: DVector::zeros(n),
            status: QpStatus::Success,
            iterations: 0,
            max_dual_iterations: 200,
            dual_step: 0.5,
            last_inverse_hessian: DMatrix::identity(n, n),
        }
    }

    fn n(&self) -> usize {
        self.primal.len()
    }

    fn combination(&self) -> DVector<Floating> {
        let mut g_omega = DVector::zeros(self.n());
        for (w, g_i) in self.omega.iter().zip(self.g.iter()) {
            g_omega += g_i.as_ref() * *w;
        }
        g_omega
    }

    fn b_omega(&self) -> Floating {
        self.omega.iter().zip(self.b.iter()).map(|(w, b)| w * b).sum()
    }

    /// Unconstrained minimizer of the inner Lagrangian, clipped to the
    /// trust-region ball.
    fn primal_from_combination(&self, g_omega: &DVector<Floating>, inverse_hessian: &DMatrix<Floating>) -> DVector<Floating> {
        let unclipped = -(inverse_hessian * g_omega);
        let norm = unclipped.norm();
        if norm > self.delta && norm > 0.0 {
            unclipped * (self.delta / norm)
        } else {
            unclipped
        }
    }

    fn row_values(&self, d: &DVector<Floating>) -> Vec<Floating> {
        self.g
            .iter()
            .zip(self.b.iter())
            .map(|(g_i, b_i)| b_i + g_i.dot(d))
            .collect()
    }

    fn project_onto_simplex(w: &mut [Floating]) {
        let m = w.len();
        if m == 0 {
            return;
        }
        let mut sorted = w.to_vec();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        let mut cumulative = 0.0;
        let mut rho_idx = 0;
        for (i, v) in sorted.iter().enumerate() {
            cumulative += v;
            if *v - (cumulative - 1.0) / ((i + 1) as Floating) > 0.0 {
                rho_idx = i;
            }
        }
        let cumulative_rho: Floating = sorted[..=rho_idx].iter().sum();
        let theta = (cumulative_rho - 1.0) / ((rho_idx + 1) as Floating);
        for v in w.iter_mut() {
            *v = (*v - theta).max(0.0);
        }
    }

    fn resize_omega_uniform(&mut self) {
        let m = self.g.len();
        self.omega = vec![1.0 / (m.max(1) as Floating); m];
    }

    fn solve_dual(&mut self, inverse_hessian: &DMatrix<Floating>) {
        self.last_inverse_hessian = inverse_hessian.clone();
        if self.g.is_empty() {
            self.status = QpStatus::NumericalFailure;
            return;
        }
        self.status = QpStatus::IterationLimit;
        for it in 0..self.max_dual_iterations {
            self.iterations = it + 1;
            let g_omega = self.combination();
            let d = self.primal_from_combination(&g_omega, inverse_hessian);
            let rows = self.row_values(&d);
            let q = self.b_omega() - 0.5 * g_omega.dot(&(inverse_hessian * &g_omega));
            let gap = rows.iter().cloned().fold(Floating::MIN, Floating::max) - q;

            if gap <= self.rho.max(1e-12) {
                self.primal = d;
                self.status = QpStatus::Success;
                return;
            }

            let step = self.dual_step / ((it + 1) as Floating).sqrt();
            for (w, r) in self.omega.iter_mut().zip(rows.iter()) {
                *w += step * r;
            }
            Self::project_onto_simplex(&mut self.omega);
            self.primal = d;
        }
    }
}

impl QpSolver for BundleQpSolver {
    fn set_scalar(&mut self, delta: Floating) {
        self.delta = delta;
    }

    fn set_inexact_solution_tolerance(&mut self, rho: Floating) {
        self.rho = rho;
    }

    fn set_vector_list(&mut self, g: Vec<Rc<DVector<Floating>>>, b: Vec<Floating>) {
        debug_assert_eq!(g.len(), b.len());
        self.g = g;
        self.b = b;
        self.resize_omega_uniform();
    }

    fn add_data(&mut self, g_new: Vec<Rc<DVector<Floating>>>, b_new: Vec<Floating>) {
        debug_assert_eq!(g_new.len(), b_new.len());
        let added = g_new.len();
        self.g.extend(g_new);
        self.b.extend(b_new);
        self.omega.extend(std::iter::repeat(0.0).take(added));
    }

    fn solve_qp(&mut self, inverse_hessian: &DMatrix<Floating>) {
        self.resize_omega_uniform();
        self.iterations = 0;
        self.solve_dual(inverse_hessian);
    }

    fn solve_qp_hot(&mut self, inverse_hessian: &DMatrix<Floating>) {
        self.iterations = 0;
        self.solve_dual(inverse_hessian);
    }

    fn set_primal_solution_to_zero(&mut self) {
        self.primal = DVector::zeros(self.n());
    }

    fn status(&self) -> QpStatus {
        self.status
    }

    fn primal_solution(&self) -> &DVector<Floating> {
        &self.primal
    }

    fn primal_solution_norm2_squared(&self) -> Floating {
        self.primal.dot(&self.primal)
    }

    fn primal_solution_norm_inf(&self) -> Floating {
        self.primal.inf_norm()
    }

    fn dual_objective_quadratic_value(&self) -> Floating {
        let g_omega = self.combination();
        self.b_omega() - 0.5 * g_omega.dot(&(&self.last_inverse_hessian * &g_omega))
    }

    fn combination_translated_norm2_squared(&self) -> Floating {
        let g_omega = self.combination();
        g_omega.dot(&g_omega)
    }

    fn dual_solution_omega_length(&self) -> usize {
        self.omega.len()
    }

    fn dual_solution_omega(&self) -> &[Floating] {
        &self.omega
    }

    fn number_of_iterations(&self) -> usize {
        self.iterations
    }

    fn vector_list_length(&self) -> usize {
        self.g.len()
    }

    fn kkt_error_dual(&self) -> Floating {
        if self.g.is_empty() {
            return 0.0;
        }
        let rows = self.row_values(&self.primal);
        let q = self.dual_objective_quadratic_value();
        (rows.iter().cloned().fold(Floating::MIN, Floating::max) - q).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> DMatrix<Floating> {
        DMatrix::identity(n, n)
    }

    #[test]
    fn single_cut_solves_to_the_negative_gradient_direction() {
        let mut qp = BundleQpSolver::new(2);
        qp.set_scalar(10.0);
        qp.set_inexact_solution_tolerance(1e-10);
        let g0 = Rc::new(DVector::from_vec(vec![1.0, 2.0]));
        qp.set_vector_list(vec![g0.clone()], vec![5.0]);
        qp.solve_qp(&identity(2));
        assert_eq!(qp.status(), QpStatus::Success);
        let d = qp.primal_solution();
        assert!((d[0] - (-1.0)).abs() < 1e-6);
        assert!((d[1] - (-2.0)).abs() < 1e-6);
    }

    #[test]
    fn trust_region_clips_the_step() {
        let mut qp = BundleQpSolver::new(2);
        qp.set_scalar(0.5);
        qp.set_inexact_solution_tolerance(1e-10);
        let g0 = Rc::new(DVector::from_vec(vec![3.0, 4.0]));
        qp.set_vector_list(vec![g0], vec![1.0]);
        qp.solve_qp(&identity(2));
        let d = qp.primal_solution();
        assert!((d.norm() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn two_conflicting_cuts_balance_on_the_simplex() {
        let mut qp = BundleQpSolver::new(1);
        qp.set_scalar(10.0);
        qp.set_inexact_solution_tolerance(1e-9);
        let g0 = Rc::new(DVector::from_vec(vec![1.0]));
        let g1 = Rc::new(DVector::from_vec(vec![-1.0]));
        qp.set_vector_list(vec![g0, g1], vec![0.0, 0.0]);
        qp.solve_qp(&identity(1));
        assert_eq!(qp.status(), QpStatus::Success);
        assert!(qp.primal_solution()[0].abs() < 1e-6);
    }

    #[test]
    fn hot_solve_extends_previous_bundle() {
        let mut qp = BundleQpSolver::new(1);
        qp.set_scalar(10.0);
        qp.set_inexact_solution_tolerance(1e-9);
        let g0 = Rc::new(DVector::from_vec(vec![1.0]));
        qp.set_vector_list(vec![g0], vec![0.0]);
        qp.solve_qp(&identity(1));
        assert_eq!(qp.vector_list_length(), 1);

        let g1 = Rc::new(DVector::from_vec(vec![-1.0]));
        qp.add_data(vec![g1], vec![0.0]);
        assert_eq!(qp.vector_list_length(), 2);
        qp.solve_qp_hot(&identity(1));
        assert_eq!(qp.status(), QpStatus::Success);
        assert!(qp.primal_solution()[0].abs() < 1e-6);
    }
}
