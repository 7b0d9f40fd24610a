use std::f64::consts::PI;

use crate::error::ConfigError;
use crate::eye::EyeParameters;

/// Constants derived once from the eye dimensions.
///
/// Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    pub eye_circumference: f64,
    pub aperture_radius: f64,
    pub eye_radius: f64,
    /// Distance from the eye centre to the aperture plane.
    pub distance_to_aperture: f64,
    /// Half-aperture angle subtended at the eye centre.
    pub angle_at_center: f64,
    /// Arc length across half the aperture, along the eye surface.
    pub aperture_arc: f64,
    /// Angular pitch between neighbouring ommatidia.
    pub ommatidial_angle: f64,
    /// Facets across the aperture arc.
    pub facet_count: usize,
    pub rhabdom_length: f64,
    pub rhabdom_radius: f64,
    /// Hypotenuse of rhabdom length and radius.
    pub rhabdom_slope: f64,
    /// Angle below which light is totally internally reflected in the rhabdom.
    pub critical_angle: f64,
}

impl DerivedGeometry {
    /// Closed-form derivation.
    ///
    /// Requires `aperture_diameter < eye_diameter` and positive dimensions;
    /// use [`DerivedGeometry::from_parameters`] to have them checked.
    pub fn derive(params: &EyeParameters) -> Self {
        let eye_circumference = PI * params.eye_diameter;
        let aperture_radius = params.aperture_diameter / 2.0;
        let eye_radius = params.eye_diameter / 2.0;
        let distance_to_aperture = (eye_radius.powi(2) - aperture_radius.powi(2)).sqrt();
        let angle_at_center = (aperture_radius / distance_to_aperture).atan().to_degrees();
        let aperture_arc = eye_circumference * (angle_at_center / 360.0);
        let ommatidial_angle = (params.facet_width / eye_circumference) * 360.0;
        let facet_count = (aperture_arc / params.facet_width).floor() as usize;

        let rhabdom_radius = params.rhabdom_width / 2.0;
        let rhabdom_slope = params.rhabdom_length.hypot(rhabdom_radius);

        let snells_law = (params.cytoplasm_refractive_index / params.rhabdom_refractive_index)
            .asin()
            .to_degrees();
        let critical_angle = 90.0 - snells_law;

        Self {
            eye_circumference,
            aperture_radius,
            eye_radius,
            distance_to_aperture,
            angle_at_center,
            aperture_arc,
            ommatidial_angle,
            facet_count,
            rhabdom_length: params.rhabdom_length,
            rhabdom_radius,
            rhabdom_slope,
            critical_angle,
        }
    }

    /// Validates the parameters, then derives the geometry.
    pub fn from_parameters(params: &EyeParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        let geometry = Self::derive(params);
        if geometry.facet_count == 0 {
            return Err(ConfigError::NoFacets {
                aperture_arc: geometry.aperture_arc,
                facet_width: params.facet_width,
            });
        }
        Ok(geometry)
    }
}
