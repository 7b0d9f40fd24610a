use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Measured dimensions and optical constants of one compound eye.
///
/// Lengths share whatever unit the measurements were taken in (usually micrometres).
/// Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeParameters {
    /// Species identifier. Only used to name output files.
    pub species: String,
    pub rhabdom_length: f64,
    pub rhabdom_width: f64,
    pub eye_diameter: f64,
    pub facet_width: f64,
    pub aperture_diameter: f64,
    pub cytoplasm_refractive_index: f64,
    pub rhabdom_refractive_index: f64,
    /// Number of angularly adjacent rhabdoms the blur circle spans.
    pub blur_circle_extent: f64,
    /// Tip angle offset for pointed rhabdoms (may be zero).
    #[serde(default)]
    pub proximal_rhabdom_angle: f64,
}

impl EyeParameters {
    /// Crayfish eye used as the default configuration.
    pub fn astacodes() -> Self {
        Self {
            species: "astacodes".to_string(),
            rhabdom_length: 84.0,
            rhabdom_width: 16.0,
            eye_diameter: 890.0,
            facet_width: 32.0,
            aperture_diameter: 445.0,
            cytoplasm_refractive_index: 1.34,
            rhabdom_refractive_index: 1.37,
            blur_circle_extent: 18.0,
            proximal_rhabdom_angle: 0.0,
        }
    }

    /// Norway lobster, flat lateral measurements.
    pub fn nephrops() -> Self {
        Self {
            species: "nephrops".to_string(),
            rhabdom_length: 180.0,
            rhabdom_width: 25.0,
            eye_diameter: 7800.0,
            facet_width: 50.0,
            aperture_diameter: 3200.0,
            cytoplasm_refractive_index: 1.34,
            rhabdom_refractive_index: 1.37,
            blur_circle_extent: 18.0,
            proximal_rhabdom_angle: 0.0,
        }
    }

    /// Looks up a built-in parameter set by species name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "astacodes" => Some(Self::astacodes()),
            "nephrops" => Some(Self::nephrops()),
            _ => None,
        }
    }

    /// Checks that the parameters describe a non-degenerate eye.
    ///
    /// Facet count is checked separately, once the geometry is derived.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.species.trim().is_empty() {
            return Err(ConfigError::EmptySpeciesName);
        }
        if self.species.contains(['/', '\\']) || self.species == "." || self.species == ".." {
            return Err(ConfigError::InvalidSpeciesName(self.species.clone()));
        }

        let positive = [
            ("rhabdom length", self.rhabdom_length),
            ("rhabdom width", self.rhabdom_width),
            ("eye diameter", self.eye_diameter),
            ("facet width", self.facet_width),
            ("aperture diameter", self.aperture_diameter),
            ("cytoplasm refractive index", self.cytoplasm_refractive_index),
            ("rhabdom refractive index", self.rhabdom_refractive_index),
            ("blur circle extent", self.blur_circle_extent),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.proximal_rhabdom_angle.is_finite() || self.proximal_rhabdom_angle < 0.0 {
            return Err(ConfigError::Negative {
                field: "proximal rhabdom angle",
                value: self.proximal_rhabdom_angle,
            });
        }

        if self.aperture_diameter >= self.eye_diameter {
            return Err(ConfigError::ApertureTooLarge {
                aperture: self.aperture_diameter,
                eye: self.eye_diameter,
            });
        }

        if self.cytoplasm_refractive_index >= self.rhabdom_refractive_index {
            return Err(ConfigError::RefractiveIndexOrder {
                cytoplasm: self.cytoplasm_refractive_index,
                rhabdom: self.rhabdom_refractive_index,
            });
        }

        Ok(())
    }
}

impl Default for EyeParameters {
    fn default() -> Self {
        Self::astacodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(EyeParameters::astacodes().validate().is_ok());
        assert!(EyeParameters::nephrops().validate().is_ok());
        assert_eq!(EyeParameters::default(), EyeParameters::astacodes());
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            EyeParameters::preset("Nephrops").map(|p| p.rhabdom_length),
            Some(180.0)
        );
        assert!(EyeParameters::preset("homarus").is_none());
    }

    #[test]
    fn test_aperture_must_be_smaller_than_eye() {
        let mut p = EyeParameters::astacodes();
        p.aperture_diameter = p.eye_diameter;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::ApertureTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_lengths() {
        let mut p = EyeParameters::astacodes();
        p.rhabdom_width = 0.0;
        assert_eq!(
            p.validate(),
            Err(ConfigError::NonPositive {
                field: "rhabdom width",
                value: 0.0
            })
        );

        let mut p = EyeParameters::astacodes();
        p.facet_width = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_tip_angle() {
        let mut p = EyeParameters::astacodes();
        p.proximal_rhabdom_angle = -1.0;
        assert!(matches!(p.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn test_refractive_index_order() {
        let mut p = EyeParameters::astacodes();
        p.cytoplasm_refractive_index = 1.40;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::RefractiveIndexOrder { .. })
        ));
    }

    #[test]
    fn test_empty_species() {
        let mut p = EyeParameters::astacodes();
        p.species = "  ".to_string();
        assert_eq!(p.validate(), Err(ConfigError::EmptySpeciesName));
    }

    #[test]
    fn test_species_must_be_a_plain_file_name() {
        for name in ["a/b", "../x", "..", "dir\\eye"] {
            let p = EyeParameters {
                species: name.to_string(),
                ..EyeParameters::astacodes()
            };
            assert_eq!(
                p.validate(),
                Err(ConfigError::InvalidSpeciesName(name.to_string()))
            );
        }

        let p = EyeParameters {
            species: "astacus.fluviatilis".to_string(),
            ..EyeParameters::astacodes()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_json_without_tip_angle() {
        let json = r#"{
            "species": "test",
            "rhabdom_length": 100.0,
            "rhabdom_width": 10.0,
            "eye_diameter": 1000.0,
            "facet_width": 20.0,
            "aperture_diameter": 500.0,
            "cytoplasm_refractive_index": 1.3,
            "rhabdom_refractive_index": 1.4,
            "blur_circle_extent": 10.0
        }"#;
        let p: EyeParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.proximal_rhabdom_angle, 0.0);
        assert!(p.validate().is_ok());
    }
}
