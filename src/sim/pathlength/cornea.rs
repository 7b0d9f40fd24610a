//! Empirical corrections applied between facets.
//!
//! Refraction at the cornea, light lost at the crystalline cone for oblique
//! rays, and rays that miss their rhabdom once the facet leaves the blur circle.

use super::geometry::DerivedGeometry;

/// Upper bound (exclusive) of the cornea refraction fit, in degrees.
pub const MAX_CORNEA_ANGLE: f64 = 60.0;

/// Piecewise-linear refraction fit: (upper bound, slope, intercept).
const CORNEA_BANDS: [(f64, f64, f64); 4] = [
    (15.0, 0.9494, 0.004667),
    (35.0, 0.9407, 0.1648),
    (50.0, 0.9196, 0.8676),
    (MAX_CORNEA_ANGLE, 0.8677, 3.38),
];

/// Maps the cumulative inter-ommatidial angle to the angle at which the ray
/// leaves the facet towards the rhabdom.
///
/// Returns `None` at or beyond [`MAX_CORNEA_ANGLE`], where the fit has no meaning.
pub fn correct_exit_angle(inter_ommatidial_angle: f64) -> Option<f64> {
    CORNEA_BANDS
        .iter()
        .find(|(upper, _, _)| inter_ommatidial_angle < *upper)
        .map(|(_, slope, intercept)| inter_ommatidial_angle * slope + intercept)
}

/// Fraction of the facet aperture still delivering light at this obliquity.
///
/// The value is not clamped; oblique rays through a short cone can give
/// factors above one or below zero.
pub fn facet_light_loss(exit_angle: f64, inter_ommatidial_angle: f64, facet_width: f64) -> f64 {
    let cone = facet_width / exit_angle.to_radians().tan();
    let effective = if cone > facet_width * 2.0 {
        inter_ommatidial_angle.to_radians().cos() * facet_width
    } else {
        let hypotenuse = 2.0 * cone - 2.0 * facet_width;
        inter_ommatidial_angle.to_radians().sin() * hypotenuse
    };
    effective / facet_width
}

/// Rhabdoms skipped before the next facet's ray lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissedRhabdoms {
    pub count: usize,
    /// Exit angle after one ommatidial pitch per missed rhabdom.
    pub exit_angle: f64,
}

/// Angle corrections for one eye.
#[derive(Debug, Clone, Copy)]
pub struct AngleCorrectionModel {
    pub facet_width: f64,
    pub ommatidial_angle: f64,
    pub facet_count: usize,
    pub blur_circle_extent: f64,
}

impl AngleCorrectionModel {
    pub fn new(geometry: &DerivedGeometry, facet_width: f64, blur_circle_extent: f64) -> Self {
        Self {
            facet_width,
            ommatidial_angle: geometry.ommatidial_angle,
            facet_count: geometry.facet_count,
            // Below one the bins would divide by zero.
            blur_circle_extent: blur_circle_extent.max(1.0),
        }
    }

    pub fn correct_exit_angle(&self, inter_ommatidial_angle: f64) -> Option<f64> {
        correct_exit_angle(inter_ommatidial_angle)
    }

    pub fn facet_light_loss(&self, exit_angle: f64, inter_ommatidial_angle: f64) -> f64 {
        facet_light_loss(exit_angle, inter_ommatidial_angle, self.facet_width)
    }

    /// Splits the aperture into `blur_circle_extent` bins; every bin boundary the
    /// current facet lies beyond is one rhabdom the ray misses.
    pub fn missed_rhabdoms(&self, current_facet: usize, exit_angle: f64) -> MissedRhabdoms {
        let bin_width = self.facet_count as f64 / self.blur_circle_extent;
        let bins = self.blur_circle_extent.floor() as usize;
        let facet = current_facet as f64;
        let beyond = |i: usize| facet > bin_width * i as f64;

        // Estimate from the quotient, then settle rounding at the boundary
        let mut count = ((facet / bin_width).ceil() as usize)
            .saturating_sub(1)
            .min(bins);
        while count < bins && beyond(count + 1) {
            count += 1;
        }
        while count > 0 && !beyond(count) {
            count -= 1;
        }
        MissedRhabdoms {
            count,
            exit_angle: exit_angle + count as f64 * self.ommatidial_angle,
        }
    }
}
