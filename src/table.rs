//! Table types flowing through the scoring pipeline.
//!
//! [`PeakTable`] holds the sample-level input. Every derived stage produces an
//! [`IonMatrix`] keyed by group label (rows) and ion identifier (columns).
//! Missing values are `None`; tables never store NaN or infinity.

use crate::error::{FacError, Result};
use crate::utils::{first_duplicate, group_members, sorted_groups};

/// Peak areas per sample: one row per sample, one column per ion.
#[derive(Debug, Clone)]
pub struct PeakTable {
    /// Ion identifiers (column names)
    ions: Vec<String>,
    /// Group label of each sample
    groups: Vec<String>,
    /// Sample identifiers
    sample_ids: Vec<String>,
    /// Peak areas in row-major order (samples × ions)
    values: Vec<Option<f64>>,
}

impl PeakTable {
    /// Create a validated peak table.
    ///
    /// Rejects duplicate or blank ion names, blank group labels, and peak
    /// areas that are negative or not finite.
    pub fn new(
        ions: Vec<String>,
        groups: Vec<String>,
        sample_ids: Vec<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self> {
        if groups.is_empty() {
            return Err(FacError::EmptyData("peak table has no samples".to_string()));
        }
        if ions.is_empty() {
            return Err(FacError::EmptyData("peak table has no ion columns".to_string()));
        }
        if sample_ids.len() != groups.len() {
            return Err(FacError::DimensionMismatch {
                expected: groups.len(),
                actual: sample_ids.len(),
            });
        }
        if values.len() != groups.len() * ions.len() {
            return Err(FacError::DimensionMismatch {
                expected: groups.len() * ions.len(),
                actual: values.len(),
            });
        }
        if let Some(index) = ions.iter().position(|ion| ion.is_empty()) {
            return Err(FacError::EmptyColumnName { index });
        }
        if let Some(ion) = first_duplicate(&ions) {
            return Err(FacError::DuplicateIon(ion.clone()));
        }
        if let Some(row) = groups.iter().position(|g| g.is_empty()) {
            return Err(FacError::MissingGroupLabel { row });
        }
        for (idx, value) in values.iter().enumerate() {
            if let Some(v) = value {
                if !v.is_finite() || *v < 0.0 {
                    return Err(FacError::InvalidValue {
                        value: v.to_string(),
                        row: idx / ions.len(),
                        column: ions[idx % ions.len()].clone(),
                    });
                }
            }
        }
        Ok(Self {
            ions,
            groups,
            sample_ids,
            values,
        })
    }

    /// Build a table from per-sample rows, numbering samples from 1.
    pub fn from_rows(
        ions: Vec<String>,
        rows: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let n_ions = ions.len();
        let mut groups = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len() * n_ions);
        for (group, row) in rows {
            if row.len() != n_ions {
                return Err(FacError::DimensionMismatch {
                    expected: n_ions,
                    actual: row.len(),
                });
            }
            groups.push(group);
            values.extend(row);
        }
        let sample_ids = (1..=groups.len()).map(|i| i.to_string()).collect();
        Self::new(ions, groups, sample_ids, values)
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn n_ions(&self) -> usize {
        self.ions.len()
    }

    #[inline]
    pub fn ions(&self) -> &[String] {
        &self.ions
    }

    /// Group label of each sample, in row order.
    #[inline]
    pub fn sample_groups(&self) -> &[String] {
        &self.groups
    }

    #[inline]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Peak area of one ion in one sample.
    #[inline]
    pub fn get(&self, sample: usize, ion: usize) -> Option<f64> {
        self.values[sample * self.n_ions() + ion]
    }

    /// All peak areas of one sample.
    pub fn sample_row(&self, sample: usize) -> &[Option<f64>] {
        let n = self.n_ions();
        &self.values[sample * n..(sample + 1) * n]
    }

    /// Distinct group labels in lexicographic order.
    pub fn group_labels(&self) -> Vec<String> {
        sorted_groups(&self.groups)
    }

    /// Row indices of the samples in a group.
    pub fn members(&self, group: &str) -> Vec<usize> {
        group_members(group, &self.groups)
    }
}

/// A groups × ions matrix of optional values.
#[derive(Debug, Clone, PartialEq)]
pub struct IonMatrix {
    groups: Vec<String>,
    ions: Vec<String>,
    values: Vec<Option<f64>>,
}

impl IonMatrix {
    pub fn new(groups: Vec<String>, ions: Vec<String>, values: Vec<Option<f64>>) -> Result<Self> {
        if values.len() != groups.len() * ions.len() {
            return Err(FacError::DimensionMismatch {
                expected: groups.len() * ions.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            groups,
            ions,
            values,
        })
    }

    /// Build a matrix from one value vector per group.
    pub fn from_rows(
        groups: Vec<String>,
        ions: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if rows.len() != groups.len() {
            return Err(FacError::DimensionMismatch {
                expected: groups.len(),
                actual: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != ions.len()) {
            return Err(FacError::DimensionMismatch {
                expected: ions.len(),
                actual: row.len(),
            });
        }
        let values = rows.into_iter().flatten().collect();
        Self::new(groups, ions, values)
    }

    #[inline]
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn n_ions(&self) -> usize {
        self.ions.len()
    }

    #[inline]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    #[inline]
    pub fn ions(&self) -> &[String] {
        &self.ions
    }

    #[inline]
    pub fn get(&self, group: usize, ion: usize) -> Option<f64> {
        self.values[group * self.n_ions() + ion]
    }

    pub fn row(&self, group: usize) -> &[Option<f64>] {
        let n = self.n_ions();
        &self.values[group * n..(group + 1) * n]
    }

    /// Iterate over `(group label, row values)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> + '_ {
        (0..self.n_groups()).map(move |g| (self.groups[g].as_str(), self.row(g)))
    }

    /// Row index of a group label.
    pub fn group_index(&self, label: &str) -> Option<usize> {
        self.groups.iter().position(|g| g == label)
    }

    /// Value lookup by labels.
    pub fn value(&self, group: &str, ion: &str) -> Option<f64> {
        let g = self.group_index(group)?;
        let i = self.ions.iter().position(|x| x == ion)?;
        self.get(g, i)
    }

    /// True when both matrices have the same group and ion keys in the same order.
    pub fn same_keys(&self, other: &IonMatrix) -> bool {
        self.groups == other.groups && self.ions == other.ions
    }

    /// Apply `f` to every cell, keeping the keys.
    pub fn map<F>(&self, f: F) -> IonMatrix
    where
        F: Fn(Option<f64>) -> Option<f64>,
    {
        IonMatrix {
            groups: self.groups.clone(),
            ions: self.ions.clone(),
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Combine two matrices cell by cell. Fails if their keys differ.
    pub fn zip_with<F>(&self, other: &IonMatrix, f: F) -> Result<IonMatrix>
    where
        F: Fn(Option<f64>, Option<f64>) -> Option<f64>,
    {
        self.ensure_same_keys(other)?;
        Ok(IonMatrix {
            groups: self.groups.clone(),
            ions: self.ions.clone(),
            values: self
                .values
                .iter()
                .zip(other.values.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        })
    }

    pub(crate) fn ensure_same_keys(&self, other: &IonMatrix) -> Result<()> {
        if self.groups != other.groups {
            return Err(FacError::KeyMismatch(format!(
                "groups {:?} vs {:?}",
                self.groups, other.groups
            )));
        }
        if self.ions != other.ions {
            return Err(FacError::KeyMismatch(format!(
                "{} ions vs {} ions",
                self.ions.len(),
                other.ions.len()
            )));
        }
        Ok(())
    }
}
