use super::*;

/// The result of probing the objective at a point: its value and, when
/// requested, a subgradient. Builder pattern, matching the rest of the
/// lineage's evaluation types.
#[derive(derive_getters::Getters, Debug, Clone)]
pub struct Evaluation {
    pub(crate) f: Floating,
    pub(crate) g: Option<DVector<Floating>>,
}

impl Evaluation {
    pub fn value_only(f: Floating) -> Self {
        Evaluation { f, g: None }
    }

    pub fn new(f: Floating, g: DVector<Floating>) -> Self {
        Evaluation { f, g: Some(g) }
    }

    pub fn is_finite(&self) -> bool {
        self.f.is_finite()
    }

    /// Panics if no subgradient was attached; callers that reach here must
    /// already have established one (e.g. via `evaluate_gradient`).
    pub fn gradient(&self) -> &DVector<Floating> {
        self.g
            .as_ref()
            .expect("Evaluation::gradient called without a cached subgradient")
    }
}
