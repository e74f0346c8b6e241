use log::debug;

use crate::{error::Result, math::ratio_or_sentinel, math::RATIO_SENTINEL, table::IonMatrix};

/// Relative abundance of each ion in a group versus all other samples
///
/// Ions found in a group but absent everywhere else receive
/// [`RATIO_SENTINEL`] instead of an infinite ratio.
pub fn abundance_ratio(group_means: &IonMatrix, reference_means: &IonMatrix) -> Result<IonMatrix> {
    let ratios = group_means.zip_with(reference_means, ratio_or_sentinel)?;
    for (group, row) in ratios.rows() {
        let exclusive = row.iter().filter(|r| **r == Some(RATIO_SENTINEL)).count();
        debug!("Group '{}' has {} group-exclusive ions", group, exclusive);
    }
    Ok(ratios)
}
