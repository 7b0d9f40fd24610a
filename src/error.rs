use thiserror::Error;

/// Degenerate or malformed eye parameters.
///
/// Raised before any geometry is derived. A run cannot continue past one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("species name must not be empty")]
    EmptySpeciesName,

    #[error("species name {0:?} cannot be used in a file name")]
    InvalidSpeciesName(String),

    #[error("{field} must be a finite positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("aperture diameter ({aperture}) must be smaller than eye diameter ({eye})")]
    ApertureTooLarge { aperture: f64, eye: f64 },

    #[error(
        "cytoplasm refractive index ({cytoplasm}) must be smaller than \
         rhabdom refractive index ({rhabdom})"
    )]
    RefractiveIndexOrder { cytoplasm: f64, rhabdom: f64 },

    #[error("aperture arc ({aperture_arc:.3}) is narrower than one facet ({facet_width})")]
    NoFacets { aperture_arc: f64, facet_width: f64 },

    #[error("line {line}: invalid {field} value {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Non-fatal condition raised while sweeping.
///
/// Anomalies are recorded in the output stream and the sweep carries on.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainAnomaly {
    /// The cornea refraction fit is only valid below 60 degrees.
    #[error("unreal angle at cornea ({inter_ommatidial_angle:.3} deg) at facet {facet}")]
    UnrealCorneaAngle {
        facet: usize,
        inter_ommatidial_angle: f64,
    },

    /// The ray left the open interval (0, 90) degrees before entering the rhabdom.
    #[error("exit angle {exit_angle:.3} deg out of range at facet {facet}")]
    ExitAngleOutOfRange { facet: usize, exit_angle: f64 },
}

impl DomainAnomaly {
    /// Literal marker written to the path-length table.
    pub fn marker(&self) -> &'static str {
        match self {
            DomainAnomaly::UnrealCorneaAngle { .. } => "UNREAL ANGLE AT CORNEA",
            DomainAnomaly::ExitAngleOutOfRange { .. } => "EXIT ANGLE OUT OF RANGE",
        }
    }

    pub fn facet(&self) -> usize {
        match self {
            DomainAnomaly::UnrealCorneaAngle { facet, .. } => *facet,
            DomainAnomaly::ExitAngleOutOfRange { facet, .. } => *facet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let e = ConfigError::ApertureTooLarge {
            aperture: 900.0,
            eye: 890.0,
        };
        assert!(e.to_string().contains("900"));

        let e = ConfigError::NonPositive {
            field: "facet width",
            value: 0.0,
        };
        assert_eq!(
            e.to_string(),
            "facet width must be a finite positive number, got 0"
        );
    }

    #[test]
    fn test_anomaly_markers() {
        let unreal = DomainAnomaly::UnrealCorneaAngle {
            facet: 16,
            inter_ommatidial_angle: 61.8,
        };
        assert_eq!(unreal.marker(), "UNREAL ANGLE AT CORNEA");
        assert_eq!(unreal.facet(), 16);

        let out = DomainAnomaly::ExitAngleOutOfRange {
            facet: 3,
            exit_angle: 93.4,
        };
        assert_eq!(out.marker(), "EXIT ANGLE OUT OF RANGE");
        assert!(out.to_string().contains("93.400"));
    }
}
