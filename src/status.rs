use std::time::Duration;

/// Outcome of one `compute_direction` call. Never `Unset` on return — the
/// direction core always rewrites this before any exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionStatus {
    Unset,
    Success,
    EvaluationFailure,
    IterationLimit,
    QpFailure,
    CpuTimeLimit,
}

impl DirectionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DirectionStatus::Unset)
    }
}

/// Genuine Rust-level failures distinct from the status taxonomy above —
/// these would indicate a misconfigured solver rather than a recoverable
/// direction-computation outcome.
#[derive(thiserror::Error, Debug)]
pub enum BundleError {
    #[error("direction computation exceeded its CPU time budget ({0:?})")]
    CpuTimeLimit(Duration),
    #[error("oracle evaluation failed at the current iterate")]
    EvaluationFailure,
    #[error("QP solver failed and fail_on_qp_failure is set")]
    QpFailure,
}
