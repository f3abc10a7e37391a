use super::*;

/// Buffered formatted output for one direction computation. The column
/// layout and null-values template are fixed so runs stay diffable across
/// strategy configurations; the reporter only ever appends whole lines and
/// flushes them through `tracing`, never stdout directly.
#[derive(Default)]
pub struct Reporter {
    buffer: Vec<String>,
}

const NULL_LINE: &str =
    "-------- -------- -------- -- --------- --------- ---------";

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn iteration_header() -> &'static str {
        "In. Its.  QP Pts.  QP Its. QP   QP KKT    |Step|   |Step|_H"
    }

    pub fn null_line() -> &'static str {
        NULL_LINE
    }

    fn qp_status_code(status: QpStatus) -> &'static str {
        match status {
            QpStatus::Success => "S",
            QpStatus::IterationLimit => "I",
            QpStatus::NumericalFailure => "F",
        }
    }

    /// Appends one formatted summary line and flushes immediately — the
    /// core is required to flush once per inner iteration, so buffering
    /// more than a single pending line never actually happens in practice.
    #[allow(clippy::too_many_arguments)]
    pub fn push_summary_line(
        &mut self,
        inner_count: usize,
        bundle_size: usize,
        qp_iterations: usize,
        qp_status: QpStatus,
        kkt_dual_error: Floating,
        step_inf_norm: Floating,
        q_dual: Floating,
    ) {
        let line = format!(
            "{:>8} {:>8} {:>8} {:>2} {:>9.3e} {:>9.3e} {:>9.3e}",
            inner_count,
            bundle_size,
            qp_iterations,
            Self::qp_status_code(qp_status),
            kkt_dual_error,
            step_inf_norm,
            q_dual,
        );
        self.buffer.push(line);
        self.flush();
    }

    pub fn flush(&mut self) {
        for line in self.buffer.drain(..) {
            info!(target: "bundle", "{}", line);
        }
    }
}
