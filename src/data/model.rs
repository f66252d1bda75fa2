use std::collections::BTreeMap;

use thiserror::Error;

// ---------------------------------------------------------------------------
// HeaderEntry – one line of the LAS well-information / parameter sections
// ---------------------------------------------------------------------------

/// A single header entry: `MNEM.UNIT  VALUE : DESCRIPTION`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderEntry {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// CurveTable – depth-indexed columns of measurements
// ---------------------------------------------------------------------------

/// Errors raised when a curve table violates its construction invariants.
#[derive(Debug, Error)]
pub enum CurveTableError {
    #[error("curve table has no depth samples")]
    Empty,
    #[error("curve '{curve}' has {got} values for {expected} depth samples")]
    LengthMismatch {
        curve: String,
        got: usize,
        expected: usize,
    },
    #[error("depth index is not strictly monotonic at sample {index}")]
    NonMonotonicDepth { index: usize },
    #[error("curve '{0}' appears more than once")]
    DuplicateCurve(String),
}

/// Depth-indexed mapping of named curves.
///
/// Invariants, enforced by [`CurveTable::new`]:
/// * depths are strictly monotonic (ascending or descending), hence unique;
/// * every curve holds exactly one value (possibly null) per depth sample.
#[derive(Debug, Clone)]
pub struct CurveTable {
    depths: Vec<f64>,
    /// Curve names in file order.
    columns: Vec<String>,
    values: BTreeMap<String, Vec<Option<f64>>>,
}

impl CurveTable {
    /// Build a table from a depth index and `(name, values)` columns.
    pub fn new(
        depths: Vec<f64>,
        curves: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, CurveTableError> {
        if depths.is_empty() {
            return Err(CurveTableError::Empty);
        }
        if depths.len() > 1 {
            let ascending = depths[1] > depths[0];
            for (i, pair) in depths.windows(2).enumerate() {
                let ok = if ascending {
                    pair[1] > pair[0]
                } else {
                    pair[1] < pair[0]
                };
                if !ok {
                    return Err(CurveTableError::NonMonotonicDepth { index: i + 1 });
                }
            }
        }

        let mut columns = Vec::with_capacity(curves.len());
        let mut values = BTreeMap::new();
        for (name, column) in curves {
            if column.len() != depths.len() {
                return Err(CurveTableError::LengthMismatch {
                    curve: name,
                    got: column.len(),
                    expected: depths.len(),
                });
            }
            if values.insert(name.clone(), column).is_some() {
                return Err(CurveTableError::DuplicateCurve(name));
            }
            columns.push(name);
        }

        Ok(CurveTable {
            depths,
            columns,
            values,
        })
    }

    /// The depth index.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Curve names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of a named curve, aligned to [`CurveTable::depths`].
    pub fn curve(&self, name: &str) -> Option<&[Option<f64>]> {
        self.values.get(name).map(|v| v.as_slice())
    }

    pub fn has_curve(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of depth samples.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Minimum and maximum non-null value of a curve, if it has any data.
    pub fn curve_range(&self, name: &str) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for v in self.curve(name)?.iter().flatten() {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
                None => (*v, *v),
            });
        }
        range
    }
}

// ---------------------------------------------------------------------------
// WellLog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A parsed well log: identity, header metadata, and the curve table.
#[derive(Debug, Clone)]
pub struct WellLog {
    /// Well name from the LAS `WELL` entry (file stem as fallback).
    pub name: String,
    /// Raw header entries from the well-information sections.
    pub header: Vec<HeaderEntry>,
    pub table: CurveTable,
}
