//! Raw FAC scores, the per-group max score, and normalization.

use log::info;

use crate::{
    config::Normalization,
    error::{FacError, Result},
    math::present_max,
    table::IonMatrix,
};

/// Name of the derived per-group maximum column
pub const MAX_VALUE_COLUMN: &str = "max_value";

/// True when both signals are negative.
///
/// Their product would be positive and read as enrichment, so such cells are
/// suppressed. A missing input never gates.
pub fn is_gated(zscore: Option<f64>, log_ratio: Option<f64>) -> bool {
    matches!((zscore, log_ratio), (Some(z), Some(r)) if z < 0.0 && r < 0.0)
}

/// Multiplier applied to the score product: 0 when gated, 1 otherwise
pub fn gate_multiplier(zscore: Option<f64>, log_ratio: Option<f64>) -> f64 {
    if is_gated(zscore, log_ratio) {
        0.0
    } else {
        1.0
    }
}

fn raw_score(zscore: Option<f64>, log_ratio: Option<f64>) -> Option<f64> {
    let multiplier = gate_multiplier(zscore, log_ratio);
    Some(zscore? * log_ratio? * multiplier)
}

/// Combine z-scores and log ratios into the raw score table
pub fn raw_scores(zscores: &IonMatrix, log_ratios: &IonMatrix) -> Result<ScoreTable> {
    let scores = zscores.zip_with(log_ratios, raw_score)?;
    Ok(ScoreTable::from_scores(scores))
}

/// FAC scores with a trailing `max_value` column
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: IonMatrix,
    max_values: Vec<Option<f64>>,
}

impl ScoreTable {
    pub fn new(scores: IonMatrix, max_values: Vec<Option<f64>>) -> Result<Self> {
        if max_values.len() != scores.n_groups() {
            return Err(FacError::DimensionMismatch {
                expected: scores.n_groups(),
                actual: max_values.len(),
            });
        }
        Ok(Self { scores, max_values })
    }

    /// Wrap a score matrix, deriving each group's max over its present scores
    pub fn from_scores(scores: IonMatrix) -> Self {
        let max_values = scores.rows().map(|(_, row)| present_max(row)).collect();
        Self { scores, max_values }
    }

    pub fn scores(&self) -> &IonMatrix {
        &self.scores
    }

    pub fn max_values(&self) -> &[Option<f64>] {
        &self.max_values
    }

    pub fn groups(&self) -> &[String] {
        self.scores.groups()
    }

    pub fn ions(&self) -> &[String] {
        self.scores.ions()
    }

    pub fn max_value(&self, group: &str) -> Option<f64> {
        self.scores
            .group_index(group)
            .and_then(|g| self.max_values[g])
    }

    /// Ion holding the max score of a group row
    pub fn best_ion(&self, group: usize) -> Option<(&str, f64)> {
        let max = self.max_values[group]?;
        self.scores
            .row(group)
            .iter()
            .position(|v| *v == Some(max))
            .map(|i| (self.scores.ions()[i].as_str(), max))
    }

    /// The max score of the reference group row
    pub fn reference_max(&self, label: &str) -> Result<f64> {
        let g = self
            .scores
            .group_index(label)
            .ok_or_else(|| FacError::MissingReferenceGroup {
                label: label.to_string(),
            })?;
        self.max_values[g].ok_or_else(|| FacError::UndefinedReferenceMax {
            label: label.to_string(),
        })
    }

    /// Subtract `offset` from every score and every max value
    pub fn shifted(&self, offset: f64) -> ScoreTable {
        ScoreTable {
            scores: self.scores.map(|v| v.map(|x| x - offset)),
            max_values: self.max_values.iter().map(|v| v.map(|x| x - offset)).collect(),
        }
    }

    /// Apply a normalization scheme
    ///
    /// `reference_group` names the control row used by
    /// [`Normalization::ReferenceMax`]; the other schemes ignore it.
    pub fn normalize(&self, normalization: Normalization, reference_group: &str) -> Result<ScoreTable> {
        normalization.validate()?;
        let offset = match normalization {
            Normalization::ReferenceMax => {
                let reference_max = self.reference_max(reference_group)?;
                info!(
                    "Normalizing against max score {} of group '{}'",
                    reference_max, reference_group
                );
                reference_max
            }
            Normalization::FixedOffset { offset } => offset,
            Normalization::Unnormalized => return Ok(self.clone()),
        };
        Ok(self.shifted(offset))
    }
}
