use crate::prelude::Epoch;

/// Typed [Column], where each entry may be undefined (missing).
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numerical values. NaN is never stored: it is converted to `None`.
    Numeric(Vec<Option<f64>>),
    /// Timestamps
    Epochs(Vec<Option<Epoch>>),
}

impl Default for Column {
    fn default() -> Self {
        Self::Numeric(Vec::new())
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::Numeric(
            values
                .into_iter()
                .map(|v| v.filter(|v| !v.is_nan()))
                .collect(),
        )
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Self::from(values.into_iter().map(Some).collect::<Vec<_>>())
    }
}

impl From<Vec<Option<Epoch>>> for Column {
    fn from(values: Vec<Option<Epoch>>) -> Self {
        Self::Epochs(values)
    }
}

impl From<Vec<Epoch>> for Column {
    fn from(values: Vec<Epoch>) -> Self {
        Self::Epochs(values.into_iter().map(Some).collect())
    }
}

impl Column {
    /// Number of entries, defined or not
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Epochs(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of defined entries
    pub fn count(&self) -> usize {
        match self {
            Self::Numeric(v) => v.iter().flatten().count(),
            Self::Epochs(v) => v.iter().flatten().count(),
        }
    }

    /// Describes the type of data we're holding
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Epochs(_) => "epochs",
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_epochs(&self) -> Option<&[Option<Epoch>]> {
        match self {
            Self::Epochs(v) => Some(v),
            _ => None,
        }
    }

    /// Builds an entirely undefined [Column] of same type as self.
    pub(crate) fn blank_like(&self, len: usize) -> Self {
        match self {
            Self::Numeric(_) => Self::Numeric(vec![None; len]),
            Self::Epochs(_) => Self::Epochs(vec![None; len]),
        }
    }
}
