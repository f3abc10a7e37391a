use super::*;

/// Maintains `quantities.point_set` across outer iterations (pruning stale
/// points so the bundle the direction core expands from doesn't grow
/// without bound). The direction core itself only appends to the point
/// set within one outer iteration; pruning between outer iterations is
/// this strategy's job.
pub trait PointSetUpdate {
    fn update_point_set(&mut self, quantities: &mut Quantities);

    /// Column-aligned placeholder the reporter prints when this strategy
    /// wasn't consulted for the current line.
    fn iteration_null_string(&self) -> &'static str {
        "--------"
    }
}

/// Drops points that have fallen far outside a small multiple of the
/// current stationarity radius, keeping the bundle seed relevant without
/// discarding points `compute_direction` might still want to re-evaluate.
pub struct DefaultPointSetUpdate {
    pub retention_factor: Floating,
}

impl Default for DefaultPointSetUpdate {
    fn default() -> Self {
        DefaultPointSetUpdate {
            retention_factor: 10.0,
        }
    }
}

impl PointSetUpdate for DefaultPointSetUpdate {
    fn update_point_set(&mut self, quantities: &mut Quantities) {
        let x_k = quantities.current_iterate.position().clone();
        let cutoff = self.retention_factor * quantities.stationarity_radius;
        quantities
            .point_set
            .retain(|p| (p.position() - &x_k).inf_norm() <= cutoff);
    }
}
