use bon::Builder;

use crate::error::{FacError, Result};

/// Column holding the group label when none is configured
pub const DEFAULT_GROUP_COLUMN: &str = "group";

/// Label of the control group used for reference-max normalization
pub const DEFAULT_REFERENCE_GROUP: &str = "dST";

/// Empirical baseline subtracted by fixed-offset normalization
pub const DEFAULT_FIXED_OFFSET: f64 = 3.4;

/// How raw FAC scores are shifted before export
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Subtract the max score of the reference group
    ReferenceMax,
    /// Subtract a constant
    FixedOffset { offset: f64 },
    /// Keep the raw scores
    Unnormalized,
}

impl Normalization {
    pub fn fixed_offset() -> Self {
        Normalization::FixedOffset {
            offset: DEFAULT_FIXED_OFFSET,
        }
    }

    /// Name used in logs and file headers
    pub fn name(&self) -> &'static str {
        match self {
            Normalization::ReferenceMax => "reference-max",
            Normalization::FixedOffset { .. } => "fixed-offset",
            Normalization::Unnormalized => "unnormalized",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Normalization::FixedOffset { offset } if !offset.is_finite() => Err(
                FacError::InvalidParameter(format!("fixed offset must be finite, got {offset}")),
            ),
            _ => Ok(()),
        }
    }
}

/// What to do when a group's log means have no spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Leave every z-score of the group missing
    #[default]
    Missing,
    /// Abort the run
    Error,
}

/// Settings for a FAC scoring run
#[derive(Debug, Clone, Builder)]
pub struct FacConfig {
    #[builder(default = Normalization::ReferenceMax)]
    pub normalization: Normalization,
    #[builder(into, default = DEFAULT_GROUP_COLUMN.to_string())]
    pub group_column: String,
    /// Column of sample identifiers, excluded from the ions
    #[builder(into)]
    pub sample_column: Option<String>,
    #[builder(into, default = DEFAULT_REFERENCE_GROUP.to_string())]
    pub reference_group: String,
    #[builder(default)]
    pub degenerate_policy: DegeneratePolicy,
    /// Restrict scoring to these groups
    pub groups: Option<Vec<String>>,
}

impl Default for FacConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
