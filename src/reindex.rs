//! Re-keys stored tables by a previously interpolated column
use crate::{
    cfg::Config,
    prelude::Error,
    report::{Event, Report},
    store::Store,
    table::Table,
};

#[cfg(feature = "log")]
use log::{info, warn};

/// Re-keys each requested flat table by `cfg.column`, usually
/// obtained with [crate::backfill::backfill] beforehand.
/// Column values become the new row labels (in row order), and the
/// column is removed from the table.
///
/// Tables that do not exist are skipped (and reported).
/// Re-indexing a [crate::table::Panel] is not supported and
/// aborts the batch with [Error::NotImplemented].
pub fn reindex<S, I, T>(store: &mut S, tables: I, cfg: &Config) -> Result<Report, Error>
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
            info!("reindexing {} with {}", name, cfg.column);
            report.push(Event::Processing {
                table: name.to_string(),
                column: cfg.column.clone(),
            });
        }

        match store.get(name) {
            None => {
                #[cfg(feature = "log")]
                if !cfg.quiet {
                    warn!("{} not found in store", name);
                }
                report.push(Event::Skipped {
                    table: name.to_string(),
                });
            },
            Some(Table::Frame(frame)) => {
                let frame = frame.set_index(&cfg.column)?;
                let rows = frame.len();
                store.insert(name, frame.into());
                report.push(Event::Updated {
                    table: name.to_string(),
                    rows,
                });
            },
            Some(Table::Panel(_)) => {
                return Err(Error::NotImplemented("panel reindexing"));
            },
            Some(Table::Series(_)) => {
                return Err(Error::UnsupportedTableType {
                    table: name.to_string(),
                    kind: "series",
                });
            },
        }
    }

    Ok(report)
}
