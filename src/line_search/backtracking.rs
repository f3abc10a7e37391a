// Inexact line search described in chapter 9.2 of Boyd's convex optimization book.
use super::*;

pub struct BackTracking {
    alpha: Floating, // recommended: [0.01, 0.3]
    beta: Floating,  // recommended: [0.1, 0.8]
}

impl BackTracking {
    pub fn new(alpha: Floating, beta: Floating) -> Self {
        BackTracking { alpha, beta }
    }

    // check if the change in the image has been lower than a proportion (alpha) of the directional derivative
    pub fn sufficient_decrease_condition(
        &self,
        f_k: Floating,
        f_kp1: Floating,
        grad_k: &DVector<Floating>,
        direction_k: &DVector<Floating>,
    ) -> bool {
        f_kp1 - f_k <= self.alpha * grad_k.dot(direction_k)
    }
}

impl LineSearch for BackTracking {
    fn compute_step_len(
        &mut self,
        x_k: &DVector<Floating>,
        eval_x_k: &Evaluation,
        direction_k: &DVector<Floating>,
        oracle: &dyn Oracle,
        max_iter: usize,
    ) -> Floating {
        let mut t = 1.0;
        let mut i = 0;

        while max_iter > i {
            let x_kp1 = x_k + t * direction_k;
            let f_kp1 = match oracle.objective(&x_kp1) {
                Some(f) => f,
                None => {
                    warn!(target: "backtracking line search", "Step size too big: next iterate is out of domain. Decreasing step by beta ({:?})", x_kp1);
                    t *= self.beta;
                    i += 1;
                    continue;
                }
            };

            if self.sufficient_decrease_condition(
                *eval_x_k.f(),
                f_kp1,
                eval_x_k.gradient(),
                direction_k,
            ) {
                return t;
            }

            t *= self.beta;
            i += 1;
        }
        warn!(target: "backtracking line search", "Max iter reached. Early stopping.");
        t
        // worst case scenario: t small but nonzero. Some decrease was achieved even if not
        // enough to be considered satisfactory by the sufficient-decrease test.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtracking_descends_a_quadratic_bowl() {
        let gamma = 90.0;
        let oracle = JointOracle(|x: &DVector<Floating>| {
            let f = 0.5 * (x[0].powi(2) + gamma * x[1].powi(2));
            let g = DVector::from(vec![x[0], gamma * x[1]]);
            Evaluation::new(f, g)
        });
        let mut k = 0;
        let mut iterate = DVector::from(vec![180.0, 152.0]);
        let mut backtracking = BackTracking::new(1e-4, 0.5);
        let gradient_tol = 1e-12;
        let max_iter = 1000;

        while max_iter > k {
            let (f, g) = oracle.objective_and_subgradient(&iterate).unwrap();
            let eval = Evaluation::new(f, g);
            if eval.gradient().dot(eval.gradient()) < gradient_tol {
                break;
            }
            let direction = -eval.gradient();
            let t = backtracking.compute_step_len(&iterate, &eval, &direction, &oracle, max_iter);
            iterate += t * direction;
            k += 1;
        }
        assert!(iterate[0].abs() < 1e-5);
        assert!(iterate[1].abs() < 1e-5);
    }

    #[test]
    fn out_of_domain_probe_shrinks_the_step() {
        let oracle = JointOracle(|x: &DVector<Floating>| {
            if x[0] > 0.5 {
                Evaluation::value_only(Floating::NAN)
            } else {
                Evaluation::new(x[0] * x[0], DVector::from_vec(vec![2.0 * x[0]]))
            }
        });
        let eval = Evaluation::new(1.0, DVector::from_vec(vec![2.0]));
        let mut ls = BackTracking::new(1e-4, 0.5);
        let x_k = DVector::from_vec(vec![1.0]);
        let direction = DVector::from_vec(vec![-1.0]);
        let t = ls.compute_step_len(&x_k, &eval, &direction, &oracle, 50);
        assert!(t < 1.0);
        assert!(x_k[0] + t * direction[0] <= 0.5 + 1e-9);
    }
}
