use anyhow::Result;
use log::{debug, info, warn};

use crate::error::{ConfigError, DomainAnomaly};
use crate::eye::EyeParameters;

use super::cases::{PathlengthCaseEngine, Pigments, RayState};
use super::config::{RowStatePolicy, SweepConfig};
use super::cornea::AngleCorrectionModel;
use super::geometry::DerivedGeometry;
use super::result::{OutputRow, SweepSummary, Token};
use super::sink::RowSink;

/// Mutable state of a running sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepState {
    pub pigments: Pigments,
    /// 1-based index of the facet being evaluated.
    pub facet: usize,
    /// Cumulative angle between the current facet and the optical axis, in degrees.
    pub inter_ommatidial_angle: f64,
    pub ray: RayState,
}

impl SweepState {
    pub fn new() -> Self {
        Self {
            pigments: Pigments::new(0.0, 0.0),
            facet: 1,
            inter_ommatidial_angle: 0.0,
            ray: RayState::new(),
        }
    }

    /// Resets the per-row counters for a new pigment pair.
    pub fn start_row(&mut self, pigments: Pigments, policy: RowStatePolicy) {
        self.pigments = pigments;
        self.facet = 1;
        self.inter_ommatidial_angle = 0.0;
        self.ray.acceptance_widened = false;
        if policy == RowStatePolicy::Reset {
            self.ray = RayState::new();
        }
    }
}

impl Default for SweepState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweeps shielding pigment, tapetal pigment and facet for one eye.
pub struct PathlengthSweep {
    params: EyeParameters,
    geometry: DerivedGeometry,
    engine: PathlengthCaseEngine,
    corrections: AngleCorrectionModel,
    config: SweepConfig,
}

impl PathlengthSweep {
    pub fn new(params: &EyeParameters, config: SweepConfig) -> Result<Self, ConfigError> {
        let geometry = DerivedGeometry::from_parameters(params)?;
        let engine = PathlengthCaseEngine::new(&geometry, params.proximal_rhabdom_angle);
        let corrections =
            AngleCorrectionModel::new(&geometry, params.facet_width, params.blur_circle_extent);

        Ok(Self {
            params: params.clone(),
            geometry,
            engine,
            corrections,
            config,
        })
    }

    pub fn params(&self) -> &EyeParameters {
        &self.params
    }

    pub fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }

    /// Pigment extents visited on both pigment axes.
    pub fn pigment_levels(&self) -> Vec<f64> {
        self.config.pigment_levels(self.params.rhabdom_length)
    }

    /// Runs the full sweep, handing each finished row to `sink`.
    ///
    /// Shielding pigment is the outer loop, tapetal pigment the inner one.
    pub fn run<S: RowSink + ?Sized>(&self, sink: &mut S) -> Result<SweepSummary> {
        let levels = self.pigment_levels();
        info!(
            "{}: {} facets, {} pigment rows, critical angle {:.3} deg",
            self.params.species,
            self.geometry.facet_count,
            levels.len() * levels.len(),
            self.geometry.critical_angle
        );

        let mut summary = SweepSummary::default();
        let mut state = SweepState::new();

        for &shielding in &levels {
            for &tapetal in &levels {
                state.start_row(Pigments::new(tapetal, shielding), self.config.row_state);
                debug!("T: {tapetal:.2}, P: {shielding:.2}");

                let row = self.run_row(&mut state, &mut summary);
                sink.write_row(&row)?;
            }
        }
        sink.finish()?;

        info!(
            "{}: {} rows, {} facets, {} evaluations, {} anomalies",
            self.params.species,
            summary.rows,
            summary.facets,
            summary.evaluations,
            summary.anomalies
        );
        Ok(summary)
    }

    /// Evaluates every facet for the pigment pair held in `state`.
    pub fn run_row(&self, state: &mut SweepState, summary: &mut SweepSummary) -> OutputRow {
        let facet_count = self.geometry.facet_count;
        let mut row = OutputRow::new(state.pigments);

        while state.facet <= facet_count {
            let anomaly = self.evaluate_facet(state, &mut row, summary);

            state.facet += 1;
            state.inter_ommatidial_angle += self.geometry.ommatidial_angle;
            state.ray.acceptance_widened = false;
            row.push(Token::FacetEnd);
            summary.facets += 1;

            if let Some(anomaly) = anomaly {
                self.record_anomaly(anomaly, &mut row, summary);
            }

            self.prepare_next_facet(state, &mut row, summary);

            if state.facet > facet_count {
                row.push(Token::FacetEnd);
            }
        }

        row.push(Token::RowEnd);
        summary.rows += 1;
        row
    }

    /// Evaluates the current facet until the ray stops entering neighbouring rhabdoms.
    fn evaluate_facet(
        &self,
        state: &mut SweepState,
        row: &mut OutputRow,
        summary: &mut SweepSummary,
    ) -> Option<DomainAnomaly> {
        for _ in 0..self.config.max_passes_per_facet {
            let evaluation = match self.engine.evaluate(
                &mut state.ray,
                state.pigments,
                state.inter_ommatidial_angle,
                state.facet,
            ) {
                Ok(evaluation) => evaluation,
                Err(anomaly) => return Some(anomaly),
            };

            summary.evaluations += 1;
            row.push(Token::Path(evaluation.path_length));

            if !evaluation.retry {
                return None;
            }
            let exit = state.ray.exit_angle;
            if !(exit > 0.0 && exit < 90.0) {
                debug!(
                    "facet {}: ray left the rhabdom array at {exit:.3} deg",
                    state.facet
                );
                return None;
            }
        }

        warn!(
            "facet {}: stopped after {} passes",
            state.facet, self.config.max_passes_per_facet
        );
        summary.truncated_facets += 1;
        None
    }

    /// Refraction at the cornea, light loss at the cone and blur-circle masking
    /// for the facet about to be evaluated.
    fn prepare_next_facet(
        &self,
        state: &mut SweepState,
        row: &mut OutputRow,
        summary: &mut SweepSummary,
    ) {
        let ioa = state.inter_ommatidial_angle;

        match self.corrections.correct_exit_angle(ioa) {
            Some(exit_angle) => state.ray.exit_angle = exit_angle,
            None => {
                let anomaly = DomainAnomaly::UnrealCorneaAngle {
                    facet: state.facet - 1,
                    inter_ommatidial_angle: ioa,
                };
                self.record_anomaly(anomaly, row, summary);
            }
        }

        state.ray.facet_adjustment = self.corrections.facet_light_loss(state.ray.exit_angle, ioa);

        let missed = self
            .corrections
            .missed_rhabdoms(state.facet, state.ray.exit_angle);
        state.ray.exit_angle = missed.exit_angle;
        for _ in 0..missed.count {
            row.push(Token::Missed);
        }
    }

    fn record_anomaly(
        &self,
        anomaly: DomainAnomaly,
        row: &mut OutputRow,
        summary: &mut SweepSummary,
    ) {
        warn!(
            "{} (T: {:.2}, P: {:.2}): {anomaly}",
            self.params.species, row.tapetal_pigment, row.shielding_pigment
        );
        row.push(Token::Anomaly(anomaly));
        summary.anomalies += 1;
    }
}
