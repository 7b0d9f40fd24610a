/// What happens to the carried ray state when a new pigment row starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatePolicy {
    /// Exit angle and light-loss factor carry over from the previous row's last facet.
    Carry,
    /// Every row starts from an axial ray with no light loss.
    Reset,
}

/// Configuration for a pigment sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Pigment increments per rhabdom length.
    pub pigment_steps: usize,
    /// Tolerance past the rhabdom length that still counts as the final pigment level.
    ///
    /// Capped at half a step so the last level is never visited twice.
    pub overshoot: f64,
    pub row_state: RowStatePolicy,
    /// Upper bound on evaluations of one facet while the ray keeps crossing into
    /// neighbouring rhabdoms.
    pub max_passes_per_facet: usize,
}

impl SweepConfig {
    pub fn new() -> Self {
        Self {
            pigment_steps: 10,
            overshoot: 1.0,
            row_state: RowStatePolicy::Carry,
            max_passes_per_facet: 256,
        }
    }

    /// Pigment extents visited by the sweep, from zero up to the rhabdom length.
    ///
    /// Values are accumulated step by step, so the last one may differ from the
    /// rhabdom length by rounding error.
    pub fn pigment_levels(&self, rhabdom_length: f64) -> Vec<f64> {
        let step = rhabdom_length / self.pigment_steps.max(1) as f64;
        let limit = rhabdom_length + self.overshoot.min(step / 2.0);

        let mut levels = Vec::with_capacity(self.pigment_steps + 1);
        let mut level = 0.0;
        while level <= limit {
            levels.push(level);
            level += step;
        }
        levels
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new()
    }
}
