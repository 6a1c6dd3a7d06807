//! Receiver log clock to GPS time model.
//!
//! Receivers stamp some of their messages with a local (host) log offset
//! only. Messages that do carry a GPS time (for example the rover SPP
//! solutions) let us fit a linear model between both clocks, which is then
//! used to interpolate an approximate GPS time for every other message.
use crate::{
    cfg::Config,
    constants::{HOST_OFFSET, MSEC_TO_SEC},
    prelude::{Duration, Epoch, Error},
    store::Store,
    table::{Frame, Table},
};

#[cfg(feature = "log")]
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [TimeOrigin] defines the epoch zero of the GPS time axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeOrigin {
    /// GPS time of the first sample is considered as the true initial GPS time
    #[default]
    FirstSample,
    /// Custom epoch zero
    Epoch(Epoch),
}

/// [ClockModel] is an ordinary least squares fit
/// `gps_offset_s = slope * host_offset_s + intercept`,
/// GPS offsets being expressed from `init_date`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockModel {
    slope: f64,
    intercept: f64,
    init_date: Epoch,
    samples: usize,
    rms: f64,
}

impl ClockModel {
    /// Builds a [ClockModel] from known coefficients
    pub fn new(slope: f64, intercept: f64, init_date: Epoch) -> Self {
        Self {
            slope,
            intercept,
            init_date,
            samples: 0,
            rms: 0.0,
        }
    }

    /// Fits a [ClockModel] on a reference [Frame], indexed by GPS [Epoch]s,
    /// that has a `host_offset` column expressed in milliseconds.
    /// Rows with undefined host offset do not contribute.
    pub fn fit(frame: &Frame, origin: TimeOrigin) -> Result<Self, Error> {
        let offsets = frame.numeric(HOST_OFFSET)?;

        let epochs = frame
            .index()
            .iter()
            .enumerate()
            .map(|(row, label)| label.as_epoch().ok_or(Error::NotTimeIndexed(row)))
            .collect::<Result<Vec<_>, _>>()?;

        let init_date = match origin {
            TimeOrigin::Epoch(t) => t,
            TimeOrigin::FirstSample => *epochs.first().ok_or(Error::InsufficientData(0))?,
        };

        let (x, y): (Vec<f64>, Vec<f64>) = epochs
            .iter()
            .zip(offsets.iter())
            .filter_map(|(t, offset)| {
                offset.map(|ms| (ms * MSEC_TO_SEC, (*t - init_date).to_seconds()))
            })
            .unzip();

        let n = x.len();
        if n < 2 {
            return Err(Error::InsufficientData(n));
        }

        let x_mean = x.iter().sum::<f64>() / n as f64;
        let y_mean = y.iter().sum::<f64>() / n as f64;

        let (mut sxx, mut sxy) = (0.0_f64, 0.0_f64);
        for (xi, yi) in x.iter().zip(y.iter()) {
            sxx += (xi - x_mean).powi(2);
            sxy += (xi - x_mean) * (yi - y_mean);
        }

        if sxx == 0.0 {
            return Err(Error::DegenerateFit);
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let rms = (x
            .iter()
            .zip(y.iter())
            .map(|(xi, yi)| (yi - slope * xi - intercept).powi(2))
            .sum::<f64>()
            / n as f64)
            .sqrt();

        #[cfg(feature = "log")]
        debug!(
            "clock fit: slope={} intercept={}s init={} n={} rms={}s",
            slope, intercept, init_date, n, rms
        );

        Ok(Self {
            slope,
            intercept,
            init_date,
            samples: n,
            rms,
        })
    }

    /// Fits a [ClockModel] on the [Config] reference table.
    pub fn from_store<S: Store + ?Sized>(store: &S, cfg: &Config) -> Result<Self, Error> {
        let table = store
            .get(&cfg.reference)
            .ok_or_else(|| Error::MissingReferenceTable(cfg.reference.clone()))?;
        match table {
            Table::Frame(frame) => Self::fit(&frame, cfg.origin),
            other => Err(Error::UnsupportedTableType {
                table: cfg.reference.clone(),
                kind: other.kind(),
            }),
        }
    }

    /// Evaluates the linear model: returns GPS offset (s) from
    /// [Self::init_date], for given host offset (s).
    pub fn gps_offset(&self, host_offset_s: f64) -> f64 {
        self.slope * host_offset_s + self.intercept
    }

    /// Interpolates GPS [Epoch] for given host offset in milliseconds.
    /// ```
    /// use gnss_analysis::prelude::*;
    /// let t0 = Epoch::from_gpst_seconds(1.0E9);
    /// let model = ClockModel::new(1.0, 0.0, t0);
    /// assert_eq!(model.apply(500.0), t0 + Duration::from_milliseconds(500.0));
    /// ```
    pub fn apply(&self, host_offset_ms: f64) -> Epoch {
        let offset_s = self.gps_offset(host_offset_ms * MSEC_TO_SEC);
        self.init_date + Duration::from_seconds(offset_s)
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept, in seconds
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Epoch zero of the GPS time axis
    pub fn init_date(&self) -> Epoch {
        self.init_date
    }

    /// Number of samples this model was fitted on
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Root mean square of the fit residuals, in seconds
    pub fn rms(&self) -> f64 {
        self.rms
    }
}
