use crate::error::DomainAnomaly;

use super::cases::Pigments;

/// Sentinel closing one facet's contributions.
pub const FACET_END: u32 = 998;
/// Sentinel closing one pigment row.
pub const ROW_END: u32 = 999;

/// One entry of a row's output stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Path length through one rhabdom.
    Path(f64),
    /// A rhabdom outside the blur circle, written as zero.
    Missed,
    FacetEnd,
    Anomaly(DomainAnomaly),
    RowEnd,
}

/// Path lengths for one (tapetal, shielding) pigment pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub tapetal_pigment: f64,
    pub shielding_pigment: f64,
    pub tokens: Vec<Token>,
}

impl OutputRow {
    pub fn new(pigments: Pigments) -> Self {
        Self {
            tapetal_pigment: pigments.tapetal,
            shielding_pigment: pigments.shielding,
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &DomainAnomaly> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Anomaly(a) => Some(a),
            _ => None,
        })
    }

    /// Numeric values between facet-end sentinels, missed rhabdoms as `0.0`.
    pub fn facet_groups(&self) -> Vec<Vec<f64>> {
        let mut groups = Vec::new();
        let mut current = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Path(v) => current.push(*v),
                Token::Missed => current.push(0.0),
                Token::FacetEnd => groups.push(std::mem::take(&mut current)),
                Token::Anomaly(_) | Token::RowEnd => {}
            }
        }
        groups
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::RowEnd))
    }
}

/// Counters accumulated over a whole sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub rows: usize,
    pub facets: usize,
    /// Case evaluations, counting every retry.
    pub evaluations: usize,
    pub anomalies: usize,
    /// Facets that stopped because the pass limit was reached.
    pub truncated_facets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_groups() {
        let mut row = OutputRow::new(Pigments::new(0.0, 8.4));
        row.push(Token::Path(84.0));
        row.push(Token::FacetEnd);
        row.push(Token::Missed);
        row.push(Token::Missed);
        row.push(Token::Path(19.5));
        row.push(Token::Path(17.0));
        row.push(Token::FacetEnd);
        row.push(Token::Anomaly(DomainAnomaly::UnrealCorneaAngle {
            facet: 2,
            inter_ommatidial_angle: 61.0,
        }));
        row.push(Token::FacetEnd);
        row.push(Token::RowEnd);

        assert_eq!(
            row.facet_groups(),
            vec![vec![84.0], vec![0.0, 0.0, 19.5, 17.0], vec![]]
        );
        assert_eq!(row.anomalies().count(), 1);
        assert!(row.is_complete());
        assert_eq!(row.shielding_pigment, 8.4);
    }

    #[test]
    fn test_incomplete_row() {
        let mut row = OutputRow::new(Pigments::new(0.0, 0.0));
        assert!(!row.is_complete());
        row.push(Token::FacetEnd);
        assert!(!row.is_complete());
    }
}
