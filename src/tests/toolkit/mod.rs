use std::str::FromStr;

use itertools::Itertools;

use crate::{
    constants::{HOST_OFFSET, REFERENCE_TABLE},
    differential::DiffTable,
    prelude::{Duration, Epoch, SV},
    store::MemoryStore,
    table::{Column, Frame, Panel},
};

/// GPS time of the first sample of all test setups
const GPST_ORIGIN_SECONDS: f64 = 1_117_584_000.0;

/*
 * Epoch (GPST) located `s` seconds after the test origin
 */
pub fn gpst(s: f64) -> Epoch {
    Epoch::from_gpst_seconds(GPST_ORIGIN_SECONDS) + Duration::from_seconds(s)
}

/*
 * Panics if both epochs are further apart than `tolerance` seconds
 */
pub fn assert_epoch_near(found: Epoch, expected: Epoch, tolerance: f64) {
    let err = (found - expected).to_seconds().abs();
    assert!(
        err <= tolerance,
        "{} differs from {} by {}s (tolerance: {}s)",
        found,
        expected,
        err,
        tolerance
    );
}

/*
 * Builds a reference (rover_spp like) frame from (host_offset_ms, gps time) samples
 */
pub fn reference_frame(samples: &[(f64, Epoch)]) -> Frame {
    let epochs = samples.iter().map(|(_, t)| *t).collect::<Vec<_>>();
    let offsets = samples.iter().map(|(ms, _)| *ms).collect::<Vec<_>>();
    Frame::time_indexed(&epochs)
        .with_column(HOST_OFFSET, Column::from(offsets))
        .unwrap()
}

/*
 * Builds SV list from csv description
 */
pub fn build_sv_csv(csv: &str) -> Vec<SV> {
    csv.split(',')
        .map(|c| SV::from_str(c.trim()).unwrap())
        .unique()
        .collect()
}

/*
 * Builds an observation panel, from (sv, field, data) descriptions
 */
pub fn observation_panel(epochs: &[Epoch], data: &[(&str, &str, Vec<Option<f64>>)]) -> Panel {
    let mut panel = Panel::new(epochs.to_vec());
    for (sv, field, values) in data {
        let sv = SV::from_str(sv).unwrap();
        panel
            .insert(sv, field, Column::from(values.clone()))
            .unwrap();
    }
    panel
}

/*
 * Builds a DiffTable from row major data, columns being described in csv
 */
pub fn diff_table(epochs: &[Epoch], sv_csv: &str, rows: Vec<Vec<Option<f64>>>) -> DiffTable {
    DiffTable::new(epochs.to_vec(), build_sv_csv(sv_csv), rows).unwrap()
}

/*
 * Store with a 10 sample reference table, offset by 250ms from the log start:
 * the fitted model is slope=1, intercept=-0.25s.
 *  - "msg_print": flat table, ordinal index, one undefined host offset
 *  - "tracking": panel, G01 has an undefined host offset
 */
pub fn test_store() -> MemoryStore {
    let samples = (0..10)
        .map(|i| (250.0 + 1000.0 * i as f64, gpst(i as f64)))
        .collect::<Vec<_>>();

    let msg_print = Frame::ordinal(4)
        .with_column(
            HOST_OFFSET,
            Column::from(vec![Some(250.0), Some(1250.0), None, Some(4750.0)]),
        )
        .unwrap()
        .with_column("text", Column::from(vec![1.0, 2.0, 3.0, 4.0]))
        .unwrap();

    let epochs = (0..3).map(|i| gpst(i as f64)).collect::<Vec<_>>();
    let tracking = observation_panel(
        &epochs,
        &[
            ("G01", HOST_OFFSET, vec![Some(250.0), None, Some(2250.0)]),
            ("G01", "cn0", vec![Some(41.0), Some(42.0), Some(43.0)]),
            ("G02", HOST_OFFSET, vec![Some(250.0), Some(1250.0), Some(2250.0)]),
            ("G02", "cn0", vec![Some(38.0), None, Some(39.0)]),
        ],
    );

    MemoryStore::new()
        .with_table(REFERENCE_TABLE, reference_frame(&samples))
        .with_table("msg_print", msg_print)
        .with_table("tracking", tracking)
}
