#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

pub mod backfill;
pub mod cfg;
pub mod clock;
pub mod constants;
pub mod differential;
pub mod reindex;
pub mod report;
pub mod sampling;
pub mod smoothing;
pub mod store;
pub mod table;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        backfill::{backfill, backfill_with_model},
        cfg::Config,
        clock::{ClockModel, TimeOrigin},
        differential::{
            double_diff, reference_satellite, single_diff, truthified_double_diff, DiffTable,
            ObservationType,
        },
        error::Error,
        reindex::reindex,
        report::{Event, Report},
        sampling::find_largest_gaps,
        smoothing::{MedianFilter, TruthEstimator},
        store::{MemoryStore, Store},
        table::{Column, Frame, Label, Panel, Series, Table},
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}
