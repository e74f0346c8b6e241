use bon::Builder;
use log::info;

use crate::{config::Normalization, error::Result, score::ScoreTable, table::IonMatrix};

/// Every table produced by a FAC scoring run
///
/// All matrices share the same group keys (rows) and ion keys (columns).
#[derive(Debug, Clone, Builder)]
pub struct FacResults {
    /// Mean peak area per ion within each group
    pub group_means: IonMatrix,
    /// Mean peak area per ion across all samples outside each group
    pub reference_means: IonMatrix,
    /// Group mean over reference mean, sentinel-clamped
    pub ratios: IonMatrix,
    pub log_means: IonMatrix,
    pub log_ratios: IonMatrix,
    pub zscores: IonMatrix,
    /// Gated score product with its `max_value` column
    pub raw_scores: ScoreTable,
    /// Raw scores after the configured normalization
    pub normalized: ScoreTable,
    pub normalization: Normalization,
    #[builder(into)]
    pub reference_group: String,
}
impl FacResults {
    /// Normalize the raw scores with another scheme
    pub fn normalized_with(&self, normalization: Normalization) -> Result<ScoreTable> {
        self.raw_scores
            .normalize(normalization, &self.reference_group)
    }

    /// Log the highest-scoring ion of each group
    pub fn log_summary(&self) {
        for (g, group) in self.normalized.groups().iter().enumerate() {
            match self.normalized.best_ion(g) {
                Some((ion, score)) => info!(
                    "Group '{}': best ion {} ({} score {:.4})",
                    group,
                    ion,
                    self.normalization.name(),
                    score
                ),
                None => info!("Group '{}': no scored ions", group),
            }
        }
    }
}
