use super::*;

/// The user's objective. Subgradients are required wherever a gradient is
/// requested; the objective itself need not be smooth or convex.
///
/// Threaded explicitly through every evaluation call (rather than stashed
/// inside `Quantities`) because `Quantities` owns the `Iterate`s that need
/// to call back into it, and Rust won't let an owned value hold a reference
/// back to its owner.
pub trait Oracle {
    /// `None` signals the point is out of the function's domain (NaN,
    /// infinite, or the oracle otherwise refuses to evaluate).
    fn objective(&self, x: &DVector<Floating>) -> Option<Floating>;

    fn subgradient(&self, x: &DVector<Floating>) -> Option<DVector<Floating>>;

    /// Joint evaluation. The default forwards to the two separate calls;
    /// oracles that can compute both more cheaply together should override
    /// this and report as much via `supports_joint_eval`.
    fn objective_and_subgradient(
        &self,
        x: &DVector<Floating>,
    ) -> Option<(Floating, DVector<Floating>)> {
        let f = self.objective(x)?;
        let g = self.subgradient(x)?;
        Some((f, g))
    }

    fn supports_joint_eval(&self) -> bool {
        false
    }
}

/// Wraps a single closure returning `(f, g)` together, the common case for
/// objectives where value and subgradient share most of their computation.
pub struct JointOracle<F>(pub F)
where
    F: Fn(&DVector<Floating>) -> Evaluation;

impl<F> Oracle for JointOracle<F>
where
    F: Fn(&DVector<Floating>) -> Evaluation,
{
    fn objective(&self, x: &DVector<Floating>) -> Option<Floating> {
        let eval = (self.0)(x);
        eval.is_finite().then_some(eval.f)
    }

    fn subgradient(&self, x: &DVector<Floating>) -> Option<DVector<Floating>> {
        let eval = (self.0)(x);
        eval.g.clone()
    }

    fn objective_and_subgradient(
        &self,
        x: &DVector<Floating>,
    ) -> Option<(Floating, DVector<Floating>)> {
        let eval = (self.0)(x);
        if !eval.is_finite() {
            return None;
        }
        Some((eval.f, eval.g.clone()?))
    }

    fn supports_joint_eval(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_oracle() -> JointOracle<impl Fn(&DVector<Floating>) -> Evaluation> {
        JointOracle(|x: &DVector<Floating>| {
            let v = x[0];
            Evaluation::new(v.abs(), DVector::from_vec(vec![v.signum()]))
        })
    }

    #[test]
    fn joint_oracle_reports_joint_support() {
        let o = abs_oracle();
        assert!(o.supports_joint_eval());
    }

    #[test]
    fn joint_oracle_evaluates_consistently() {
        let o = abs_oracle();
        let x = DVector::from_vec(vec![-3.0]);
        let (f, g) = o.objective_and_subgradient(&x).unwrap();
        assert_eq!(f, 3.0);
        assert_eq!(g[0], -1.0);
        assert_eq!(o.objective(&x), Some(3.0));
    }

    #[test]
    fn non_finite_objective_reports_none() {
        let o = JointOracle(|_: &DVector<Floating>| Evaluation::value_only(Floating::NAN));
        let x = DVector::from_vec(vec![0.0]);
        assert_eq!(o.objective(&x), None);
        assert_eq!(o.objective_and_subgradient(&x), None);
    }
}
