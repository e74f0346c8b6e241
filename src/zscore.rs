use log::warn;

use crate::{
    config::DegeneratePolicy,
    error::{FacError, Result},
    math::{is_constant, present_mean, present_std},
    table::IonMatrix,
};

/// Standardize each group's log means against that group's own statistics
///
/// Mean and population standard deviation are taken over the present ions of
/// the row. A row with no present ion, or whose present ions all share one
/// value, is degenerate and handled according to `policy`.
pub fn zscore(log_means: &IonMatrix, policy: DegeneratePolicy) -> Result<IonMatrix> {
    let mut rows = Vec::with_capacity(log_means.n_groups());
    for (group, row) in log_means.rows() {
        rows.push(zscore_row(group, row, policy)?);
    }
    IonMatrix::from_rows(log_means.groups().to_vec(), log_means.ions().to_vec(), rows)
}

fn zscore_row(group: &str, row: &[Option<f64>], policy: DegeneratePolicy) -> Result<Vec<Option<f64>>> {
    let stats = if is_constant(row) {
        None
    } else {
        present_mean(row).and_then(|mean| present_std(row, mean).map(|std| (mean, std)))
    };

    match (stats, policy) {
        (Some((mean, std)), _) => Ok(row.iter().map(|v| v.map(|x| (x - mean) / std)).collect()),
        (None, DegeneratePolicy::Missing) => {
            warn!("Group '{}' log means have no spread; z-scores left missing", group);
            Ok(vec![None; row.len()])
        }
        (None, DegeneratePolicy::Error) => Err(FacError::DegenerateZScore {
            group: group.to_string(),
        }),
    }
}
