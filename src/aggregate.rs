//! Per-group mean peak areas and the matching means over every other sample.

use derive_new::new;
use log::debug;

use crate::{
    error::{FacError, Result},
    table::{IonMatrix, PeakTable},
};

/// Running sum and count of the present peak areas of one ion
#[derive(new, Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    sum: f64,
    count: usize,
}
impl Tally {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// Tally of the samples counted in `self` but not in `part`
    fn without(&self, part: &Tally) -> Tally {
        Tally::new(self.sum - part.sum, self.count - part.count)
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Output of the group aggregation stage
#[derive(new, Debug, Clone)]
pub struct GroupMeans {
    /// Mean peak area per ion within each group
    pub group_means: IonMatrix,
    /// Mean peak area per ion across all samples outside each group
    pub reference_means: IonMatrix,
}

/// Sums a set of sample rows ion by ion
fn tally_rows(table: &PeakTable, rows: impl Iterator<Item = usize>) -> Vec<Tally> {
    let mut tallies = vec![Tally::default(); table.n_ions()];
    for sample in rows {
        for (tally, value) in tallies.iter_mut().zip(table.sample_row(sample)) {
            tally.add(*value);
        }
    }
    tallies
}

/// Compute group means and reference means for the given groups.
///
/// The reference mean of a group is derived from the table-wide totals minus
/// the group's own sums and counts, so every sample outside the group
/// contributes, whether or not its group is scored.
pub fn aggregate(table: &PeakTable, groups: &[String]) -> Result<GroupMeans> {
    let totals = tally_rows(table, 0..table.n_samples());

    let mut group_rows: Vec<Vec<Option<f64>>> = Vec::with_capacity(groups.len());
    let mut reference_rows: Vec<Vec<Option<f64>>> = Vec::with_capacity(groups.len());
    for group in groups {
        let members = table.members(group);
        if members.is_empty() {
            return Err(FacError::EmptyGroup {
                group: group.clone(),
            });
        }
        if members.len() == table.n_samples() {
            return Err(FacError::EmptyComplement {
                group: group.clone(),
            });
        }
        debug!("Aggregating group '{}' over {} samples", group, members.len());

        let tallies = tally_rows(table, members.into_iter());
        group_rows.push(tallies.iter().map(Tally::mean).collect());
        reference_rows.push(
            totals
                .iter()
                .zip(tallies.iter())
                .map(|(total, part)| total.without(part).mean())
                .collect(),
        );
    }

    let group_means = IonMatrix::from_rows(groups.to_vec(), table.ions().to_vec(), group_rows)?;
    let reference_means =
        IonMatrix::from_rows(groups.to_vec(), table.ions().to_vec(), reference_rows)?;
    Ok(GroupMeans::new(group_means, reference_means))
}
