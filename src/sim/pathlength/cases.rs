//! Geometric case analysis for a single ray entering a rhabdom.
//!
//! The ray leaves the facet at `exit_angle` to the rhabdom axis. Depending on how
//! deep it penetrates before meeting the rhabdom wall, and on how far the tapetal
//! and shielding pigments extend, one of four cases applies:
//!
//! 1. the ray crosses the rhabdom and enters its neighbour (evaluated again),
//! 2. the ray reflects off the rhabdom edge,
//! 3. the ray reaches the rhabdom base,
//! 4. the ray runs along the axis (first facet only).

use log::trace;

use super::geometry::DerivedGeometry;
use crate::error::DomainAnomaly;

/// Which geometric case produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCase {
    Transmitted,
    EdgeReflection,
    BaseReflection,
    Perpendicular,
}

/// Pigment extents along the rhabdom for one sweep row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pigments {
    pub tapetal: f64,
    pub shielding: f64,
}

impl Pigments {
    pub fn new(tapetal: f64, shielding: f64) -> Self {
        Self { tapetal, shielding }
    }

    /// Tapetum present and unscreened: light is reflected for a second pass.
    pub fn reflects(&self) -> bool {
        !(self.tapetal == 0.0 || self.shielding > 0.0)
    }
}

/// Ray state carried from one evaluation to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayState {
    /// Angle between the ray and the rhabdom axis, in degrees.
    pub exit_angle: f64,
    /// Light-loss multiplier for the current facet.
    pub facet_adjustment: f64,
    /// Set by a transmission pass; suppresses the tip correction for the rest
    /// of the current facet.
    pub acceptance_widened: bool,
}

impl RayState {
    pub fn new() -> Self {
        Self {
            exit_angle: 0.0,
            facet_adjustment: 1.0,
            acceptance_widened: false,
        }
    }
}

impl Default for RayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one evaluation of the current facet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub case: PathCase,
    pub path_length: f64,
    /// The ray entered a neighbouring rhabdom; evaluate the same facet again.
    pub retry: bool,
}

/// Decides which case applies and how long the ray travels inside the rhabdom.
#[derive(Debug, Clone, Copy)]
pub struct PathlengthCaseEngine {
    pub rhabdom_length: f64,
    pub rhabdom_radius: f64,
    pub rhabdom_slope: f64,
    pub critical_angle: f64,
    pub ommatidial_angle: f64,
    pub proximal_rhabdom_angle: f64,
}

impl PathlengthCaseEngine {
    pub fn new(geometry: &DerivedGeometry, proximal_rhabdom_angle: f64) -> Self {
        Self {
            rhabdom_length: geometry.rhabdom_length,
            rhabdom_radius: geometry.rhabdom_radius,
            rhabdom_slope: geometry.rhabdom_slope,
            critical_angle: geometry.critical_angle,
            ommatidial_angle: geometry.ommatidial_angle,
            proximal_rhabdom_angle,
        }
    }

    /// Evaluates the current facet once.
    ///
    /// Only the transmission case mutates `ray` beyond the tip correction: it
    /// advances the exit angle by one ommatidial pitch and marks the acceptance
    /// angle as widened.
    pub fn evaluate(
        &self,
        ray: &mut RayState,
        pigments: Pigments,
        inter_ommatidial_angle: f64,
        facet: usize,
    ) -> Result<Evaluation, DomainAnomaly> {
        if ray.exit_angle > self.critical_angle && !ray.acceptance_widened {
            ray.exit_angle -= self.proximal_rhabdom_angle;
        }

        if inter_ommatidial_angle == 0.0 {
            return Ok(Evaluation {
                case: PathCase::Perpendicular,
                path_length: self.perpendicular(ray.facet_adjustment, pigments),
                retry: false,
            });
        }

        let exit_angle = ray.exit_angle;
        if !(exit_angle > 0.0 && exit_angle < 90.0) {
            return Err(DomainAnomaly::ExitAngleOutOfRange { facet, exit_angle });
        }

        let pathlength = self.penetration_depth(exit_angle);
        let l = self.rhabdom_length;

        let evaluation = if pathlength >= l {
            Evaluation {
                case: PathCase::BaseReflection,
                path_length: self.base_reflection(
                    exit_angle,
                    pathlength,
                    ray.facet_adjustment,
                    pigments,
                ),
                retry: false,
            }
        } else if pathlength > l - pigments.shielding
            || pathlength > l - pigments.tapetal
            || exit_angle < self.critical_angle
        {
            Evaluation {
                case: PathCase::EdgeReflection,
                path_length: self.edge_reflection(
                    exit_angle,
                    pathlength,
                    ray.facet_adjustment,
                    pigments,
                ),
                retry: false,
            }
        } else {
            let path_length = self.rhabdom_radius / exit_angle.to_radians().sin();
            ray.exit_angle += self.ommatidial_angle;
            ray.acceptance_widened = true;
            let remainder = l - pathlength;
            Evaluation {
                case: PathCase::Transmitted,
                path_length,
                retry: remainder > pigments.tapetal || remainder > pigments.shielding,
            }
        };

        trace!(
            "facet {facet}: {:?} at {exit_angle:.3} deg, depth {pathlength:.3}, path {:.6}",
            evaluation.case,
            evaluation.path_length
        );
        Ok(evaluation)
    }

    /// Depth along the axis at which the ray meets the rhabdom wall.
    pub fn penetration_depth(&self, exit_angle: f64) -> f64 {
        self.rhabdom_radius / exit_angle.to_radians().tan()
    }

    /// Case 4: one pass down the axis, two if the tapetum reflects it back.
    pub fn perpendicular(&self, facet_adjustment: f64, pigments: Pigments) -> f64 {
        if pigments.reflects() {
            self.rhabdom_length * 2.0 * facet_adjustment
        } else {
            self.rhabdom_length * facet_adjustment
        }
    }

    /// Case 3: the ray reaches the base before the wall.
    pub fn base_reflection(
        &self,
        exit_angle: f64,
        pathlength: f64,
        facet_adjustment: f64,
        pigments: Pigments,
    ) -> f64 {
        let l = self.rhabdom_length;
        let pass = if pathlength == l {
            self.rhabdom_slope
        } else {
            l / exit_angle.to_radians().cos()
        };
        let passlength = if pass > l { pass } else { l };

        if pigments.reflects() {
            (pass + passlength) * facet_adjustment
        } else {
            pass * facet_adjustment
        }
    }

    /// Case 2: the ray reflects off the rhabdom edge.
    pub fn edge_reflection(
        &self,
        exit_angle: f64,
        pathlength: f64,
        facet_adjustment: f64,
        pigments: Pigments,
    ) -> f64 {
        let l = self.rhabdom_length;
        let theta = exit_angle.to_radians();
        let pass1 = self.rhabdom_radius / theta.sin();
        let pass2 = ((l - pathlength) / theta.cos()).min(pass1);
        let passlength = if pass1 + pass2 > l { pass1 + pass2 } else { l };

        if pigments.shielding > l - pathlength {
            pass1 * facet_adjustment
        } else if pigments.reflects() {
            (pass1 + pass2 + passlength) * facet_adjustment
        } else {
            (pass1 + pass2) * facet_adjustment
        }
    }
}
