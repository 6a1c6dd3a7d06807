//! Tables held in a [crate::store::Store]
use crate::prelude::{Epoch, Error};

mod column;
mod frame;
mod panel;

pub use column::Column;
pub use frame::Frame;
pub use panel::Panel;

/// Row [Label]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Label {
    /// Row number, for tables that were never time indexed
    Ordinal(u64),
    /// Numerical key
    Value(f64),
    /// Timestamp
    Epoch(Epoch),
}

impl Label {
    pub fn as_epoch(&self) -> Option<Epoch> {
        match self {
            Self::Epoch(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<Epoch> for Label {
    fn from(t: Epoch) -> Self {
        Self::Epoch(t)
    }
}

/// One dimensional table: a single [Column] with its own row index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    index: Vec<Label>,
    data: Column,
}

impl Series {
    pub fn new(index: Vec<Label>, data: Column) -> Result<Self, Error> {
        if index.len() != data.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                found: data.len(),
            });
        }
        Ok(Self { index, data })
    }

    pub fn index(&self) -> &[Label] {
        &self.index
    }

    pub fn data(&self) -> &Column {
        &self.data
    }
}

/// [Table] is either flat, a [Panel] or a [Series].
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Frame(Frame),
    Panel(Panel),
    Series(Series),
}

impl Table {
    /// Describes the shape of this [Table]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frame(_) => "flat table",
            Self::Panel(_) => "panel",
            Self::Series(_) => "series",
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_panel(&self) -> Option<&Panel> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }
}

impl From<Frame> for Table {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<Panel> for Table {
    fn from(panel: Panel) -> Self {
        Self::Panel(panel)
    }
}

impl From<Series> for Table {
    fn from(series: Series) -> Self {
        Self::Series(series)
    }
}
