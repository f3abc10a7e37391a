use super::*;
use std::rc::Rc;

/// A point in the search, with lazily-computed objective value and
/// subgradient. `f`/`g` are `None` until the corresponding `evaluate_*`
/// call succeeds; a failed evaluation leaves the cache untouched and
/// returns `false`.
///
/// The cached subgradient is `Rc`-wrapped: the bundle built inside
/// `compute_direction` clones this handle rather than the underlying
/// vector, so the point set owns the data and the bundle only borrows a
/// handle to it, without unsafe code or lifetimes threaded through the
/// whole core.
#[derive(derive_getters::Getters, Debug, Clone)]
pub struct Iterate {
    position: DVector<Floating>,
    f: Option<Floating>,
    g: Option<Rc<DVector<Floating>>>,
}

impl Iterate {
    pub fn new(position: DVector<Floating>) -> Self {
        Iterate {
            position,
            f: None,
            g: None,
        }
    }

    pub fn evaluate_objective(&mut self, oracle: &dyn Oracle) -> bool {
        match oracle.objective(&self.position) {
            Some(f) => {
                self.f = Some(f);
                true
            }
            None => false,
        }
    }

    pub fn evaluate_gradient(&mut self, oracle: &dyn Oracle) -> bool {
        match oracle.subgradient(&self.position) {
            Some(g) => {
                self.g = Some(Rc::new(g));
                true
            }
            None => false,
        }
    }

    pub fn evaluate_objective_and_gradient(&mut self, oracle: &dyn Oracle) -> bool {
        match oracle.objective_and_subgradient(&self.position) {
            Some((f, g)) => {
                self.f = Some(f);
                self.g = Some(Rc::new(g));
                true
            }
            None => false,
        }
    }

    /// Evaluates jointly when the oracle supports it, otherwise falls back
    /// to the two separate calls. Used by the direction core so it doesn't
    /// need to special-case `evaluate_function_with_gradient` at every
    /// call site.
    pub fn evaluate_best_available(&mut self, oracle: &dyn Oracle, jointly: bool) -> bool {
        if jointly && oracle.supports_joint_eval() {
            self.evaluate_objective_and_gradient(oracle)
        } else {
            self.evaluate_objective(oracle) && self.evaluate_gradient(oracle)
        }
    }

    pub fn make_new_linear_combination(&self, a: Floating, b: Floating, v: &Iterate) -> Iterate {
        Iterate::new(linear_combination(a, &self.position, b, &v.position))
    }
}
