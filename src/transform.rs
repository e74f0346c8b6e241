use crate::{math::log10_or_missing, table::IonMatrix};

/// Base-10 log of every cell
///
/// Zero, negative and missing inputs become missing. The ratio sentinel
/// maps to a large finite value and is kept.
pub fn log_transform(matrix: &IonMatrix) -> IonMatrix {
    matrix.map(log10_or_missing)
}
