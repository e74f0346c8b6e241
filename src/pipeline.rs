use log::{debug, info};

use crate::{
    aggregate::aggregate,
    config::FacConfig,
    error::Result,
    ratio::abundance_ratio,
    results::FacResults,
    score::raw_scores,
    table::PeakTable,
    transform::log_transform,
    utils::sorted_groups,
    zscore::zscore,
};

/// The FAC scoring pipeline over one peak table
pub struct FacScore<'a> {
    table: &'a PeakTable,
    config: FacConfig,
}
impl<'a> FacScore<'a> {
    pub fn new(table: &'a PeakTable, config: FacConfig) -> Self {
        Self { table, config }
    }

    /// Run the FAC scoring pipeline
    ///
    /// The pipeline is a six-step process:
    /// 1. Aggregate group means and reference means
    /// 2. Take the ratio of group to reference abundance
    /// 3. Log-transform the group means and the ratios
    /// 4. Z-score each group's log means
    /// 5. Combine z-scores and log ratios behind the sign gate
    /// 6. Normalize the raw scores
    pub fn run(&self) -> Result<FacResults> {
        self.config.normalization.validate()?;
        let groups = self.scored_groups();
        info!(
            "Scoring {} groups over {} ions",
            groups.len(),
            self.table.n_ions()
        );

        let means = aggregate(self.table, &groups)?;
        let ratios = abundance_ratio(&means.group_means, &means.reference_means)?;

        let log_means = log_transform(&means.group_means);
        let log_ratios = log_transform(&ratios);
        debug!("Log-transformed means and ratios");

        let zscores = zscore(&log_means, self.config.degenerate_policy)?;
        let scores = raw_scores(&zscores, &log_ratios)?;
        let normalized =
            scores.normalize(self.config.normalization, &self.config.reference_group)?;

        Ok(FacResults::builder()
            .group_means(means.group_means)
            .reference_means(means.reference_means)
            .ratios(ratios)
            .log_means(log_means)
            .log_ratios(log_ratios)
            .zscores(zscores)
            .raw_scores(scores)
            .normalized(normalized)
            .normalization(self.config.normalization)
            .reference_group(self.config.reference_group.clone())
            .build())
    }

    /// Groups to score, in lexicographic order
    ///
    /// Declared groups take precedence over the labels found in the table.
    fn scored_groups(&self) -> Vec<String> {
        match &self.config.groups {
            Some(declared) => sorted_groups(declared),
            None => self.table.group_labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DegeneratePolicy, Normalization};
    use crate::error::FacError;
    use crate::math::RATIO_SENTINEL;
    use approx::assert_relative_eq;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    /// Group A carries an exclusive ion; the control carries a weak one
    fn table() -> PeakTable {
        PeakTable::from_rows(
            names(&["101.07", "202.11", "303.15"]),
            vec![
                ("A".into(), vec![Some(10.0), Some(5.0), Some(2.0)]),
                ("A".into(), vec![Some(12.0), Some(5.0), Some(2.5)]),
                ("B".into(), vec![Some(0.0), Some(5.0), Some(40.0)]),
                ("B".into(), vec![Some(0.0), Some(5.0), Some(30.0)]),
                ("dST".into(), vec![Some(0.0), Some(6.0), Some(1.0)]),
                ("dST".into(), vec![Some(0.0), Some(4.0), Some(1.5)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_run_shapes() {
        let table = table();
        let results = FacScore::new(&table, FacConfig::default()).run().unwrap();
        let keys = &results.group_means;
        assert_eq!(keys.groups(), &["A", "B", "dST"]);
        for m in [
            &results.reference_means,
            &results.ratios,
            &results.log_means,
            &results.log_ratios,
            &results.zscores,
            results.raw_scores.scores(),
            results.normalized.scores(),
        ] {
            assert!(m.same_keys(keys));
        }
    }

    #[test]
    fn test_run_exclusive_ion() {
        let table = table();
        let results = FacScore::new(&table, FacConfig::default()).run().unwrap();
        assert_eq!(results.ratios.value("A", "101.07"), Some(RATIO_SENTINEL));
        assert_relative_eq!(
            results.log_ratios.value("A", "101.07").unwrap(),
            RATIO_SENTINEL.log10()
        );
        let a_score = results.raw_scores.scores().value("A", "101.07").unwrap();
        assert!(a_score > 4.0);
        assert_eq!(results.raw_scores.best_ion(0).map(|(ion, _)| ion), Some("101.07"));
    }

    #[test]
    fn test_run_reference_normalization() {
        let table = table();
        let results = FacScore::new(&table, FacConfig::default()).run().unwrap();
        assert_eq!(results.normalized.max_value("dST"), Some(0.0));
        let reference_max = results.raw_scores.max_value("dST").unwrap();
        assert_relative_eq!(
            results.normalized.max_value("A").unwrap(),
            results.raw_scores.max_value("A").unwrap() - reference_max
        );
    }

    #[test]
    fn test_normalized_with_other_scheme() {
        let table = table();
        let results = FacScore::new(&table, FacConfig::default()).run().unwrap();
        let fixed = results.normalized_with(Normalization::fixed_offset()).unwrap();
        assert_relative_eq!(
            fixed.max_value("B").unwrap(),
            results.raw_scores.max_value("B").unwrap() - 3.4
        );
        let raw = results.normalized_with(Normalization::Unnormalized).unwrap();
        assert_eq!(raw, results.raw_scores);
    }

    #[test]
    fn test_run_missing_reference_group() {
        let table = table();
        let config = FacConfig::builder().reference_group("blank").build();
        let err = FacScore::new(&table, config).run().unwrap_err();
        assert!(matches!(err, FacError::MissingReferenceGroup { label } if label == "blank"));
    }

    #[test]
    fn test_run_fixed_offset_without_reference() {
        let table = table();
        let config = FacConfig::builder()
            .normalization(Normalization::fixed_offset())
            .reference_group("blank")
            .build();
        assert!(FacScore::new(&table, config).run().is_ok());
    }

    #[test]
    fn test_run_declared_groups() {
        let table = table();
        let config = FacConfig::builder()
            .groups(names(&["dST", "A"]))
            .build();
        let results = FacScore::new(&table, config).run().unwrap();
        assert_eq!(results.normalized.groups(), &["A", "dST"]);
    }

    #[test]
    fn test_run_degenerate_error_policy() {
        let table = PeakTable::from_rows(
            names(&["101.07", "202.11"]),
            vec![
                ("A".into(), vec![Some(10.0), Some(10.0)]),
                ("dST".into(), vec![Some(1.0), Some(3.0)]),
            ],
        )
        .unwrap();
        let config = FacConfig::builder()
            .degenerate_policy(DegeneratePolicy::Error)
            .build();
        let err = FacScore::new(&table, config).run().unwrap_err();
        assert!(matches!(err, FacError::DegenerateZScore { group } if group == "A"));
    }
}
