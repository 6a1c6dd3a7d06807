//! Batch processing configuration
use crate::{
    clock::TimeOrigin,
    constants::{APPROX_GPS_TIME, REFERENCE_TABLE},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Config] drives clock fitting, backfilling and reindexing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Reference table the clock model is fitted on
    pub reference: String,
    /// Column to be backfilled, then used as new index
    pub column: String,
    /// Defines GPS time origin of the clock model
    pub origin: TimeOrigin,
    /// Reports progress ([crate::report::Event::Processing]) for each table
    pub verbose: bool,
    /// Silences missing table warnings. They are still reported.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: REFERENCE_TABLE.to_string(),
            column: APPROX_GPS_TIME.to_string(),
            origin: TimeOrigin::default(),
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Copies and returns [Self] with custom reference table
    pub fn with_reference(&self, reference: &str) -> Self {
        let mut s = self.clone();
        s.reference = reference.to_string();
        s
    }

    /// Copies and returns [Self] with custom target (or key) column
    pub fn with_column(&self, column: &str) -> Self {
        let mut s = self.clone();
        s.column = column.to_string();
        s
    }

    /// Copies and returns [Self] with custom [TimeOrigin]
    pub fn with_origin(&self, origin: TimeOrigin) -> Self {
        let mut s = self.clone();
        s.origin = origin;
        s
    }

    pub fn verbose(&self) -> Self {
        let mut s = self.clone();
        s.verbose = true;
        s
    }

    pub fn quiet(&self) -> Self {
        let mut s = self.clone();
        s.quiet = true;
        s
    }
}
