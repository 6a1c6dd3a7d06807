//! Approximate GPS time interpolation, for tables that only
//! carry the receiver's host log offset.
use std::collections::BTreeMap;

use crate::{
    cfg::Config,
    clock::ClockModel,
    constants::HOST_OFFSET,
    prelude::{Epoch, Error},
    report::{Event, Report},
    store::Store,
    table::{Column, Frame, Panel, Table},
};

#[cfg(feature = "log")]
use log::{info, warn};

/// Fits the [ClockModel] on the [Config] reference table, then
/// interpolates the approximate GPS time column of each requested table.
/// See [backfill_with_model].
pub fn backfill<S, I, T>(store: &mut S, tables: I, cfg: &Config) -> Result<Report, Error>
where
    S: Store + ?Sized,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let model = ClockModel::from_store(&*store, cfg)?;
    backfill_with_model(store, &model, tables, cfg)
}

/// Interpolates the approximate GPS time column (`cfg.column`) of each
/// requested table, from its host offsets, and writes it back to the [Store].
/// An existing column is overwritten.
///
/// - tables that do not exist are skipped (and reported), because
///   the table set varies from one log to another
/// - flat tables receive one [Epoch] per row
/// - panels receive one [Epoch] per satellite and per sample
/// - any other table shape aborts the batch
pub fn backfill_with_model<S, I, T>(
    store: &mut S,
    model: &ClockModel,
    tables: I,
    cfg: &Config,
) -> Result<Report, Error>
where
    S: Store + ?Sized,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut report = Report::default();

    for name in tables {
        let name = name.as_ref();

        if cfg.verbose {
            #[cfg(feature = "log")]
            info!("interpolating {} for {}", cfg.column, name);
            report.push(Event::Processing {
                table: name.to_string(),
                column: cfg.column.clone(),
            });
        }

        let table = match store.get(name) {
            Some(table) => table,
            None => {
                #[cfg(feature = "log")]
                if !cfg.quiet {
                    warn!("{} not found in store", name);
                }
                report.push(Event::Skipped {
                    table: name.to_string(),
                });
                continue;
            },
        };

        let (table, rows): (Table, usize) = match table {
            Table::Frame(frame) => {
                let rows = frame.len();
                (backfill_frame(frame, model, &cfg.column)?.into(), rows)
            },
            Table::Panel(panel) => {
                let rows = panel.len();
                (backfill_panel(panel, model, &cfg.column)?.into(), rows)
            },
            Table::Series(_) => {
                return Err(Error::UnsupportedTableType {
                    table: name.to_string(),
                    kind: "series",
                });
            },
        };

        store.insert(name, table);

        report.push(Event::Updated {
            table: name.to_string(),
            rows,
        });
    }

    Ok(report)
}

fn interpolate(model: &ClockModel, offsets: &[Option<f64>]) -> Vec<Option<Epoch>> {
    offsets
        .iter()
        .map(|ms| ms.map(|ms| model.apply(ms)))
        .collect()
}

fn backfill_frame(mut frame: Frame, model: &ClockModel, column: &str) -> Result<Frame, Error> {
    let approx = interpolate(model, frame.numeric(HOST_OFFSET)?);
    frame.insert(column, Column::Epochs(approx))?;
    Ok(frame)
}

fn backfill_panel(mut panel: Panel, model: &ClockModel, column: &str) -> Result<Panel, Error> {
    let mut columns = BTreeMap::new();
    for sv in panel.satellites() {
        if let Some(offsets) = panel.numeric(sv, HOST_OFFSET)? {
            columns.insert(sv, Column::Epochs(interpolate(model, offsets)));
        }
    }
    panel.insert_field(column, columns)?;
    Ok(panel)
}
