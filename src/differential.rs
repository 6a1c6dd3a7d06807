//! Single and double differenced observations.
//!
//! Differential positioning cancels out the errors that are common to
//! two receivers (rover and base) tracking the same satellite (single
//! difference), then the receiver clock errors that are common to all
//! satellites, by differencing against a reference satellite (double
//! difference). Rover and base panels are expected to be time aligned
//! beforehand.
use std::{collections::BTreeMap, fmt, str::FromStr};

use itertools::Itertools;

use crate::{
    prelude::{Epoch, Error, SV},
    smoothing::TruthEstimator,
    table::Panel,
};

/// Observation types that may be differenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationType {
    /// Pseudo range (`P` field)
    PseudoRange,
    /// Carrier phase (`L` field)
    Phase,
}

impl ObservationType {
    /// Panel field holding this observation
    pub fn field(&self) -> &'static str {
        match self {
            Self::PseudoRange => "P",
            Self::Phase => "L",
        }
    }
}

impl FromStr for ObservationType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Self::PseudoRange),
            "L" => Ok(Self::Phase),
            _ => Err(Error::InvalidObservationType(s.to_string())),
        }
    }
}

impl fmt::Display for ObservationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// [DiffTable] stores differenced observations:
/// one row per [Epoch], one column per [SV].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffTable {
    epochs: Vec<Epoch>,
    satellites: Vec<SV>,
    /// row major
    data: Vec<Vec<Option<f64>>>,
}

impl DiffTable {
    /// Builds a new [DiffTable] from row major data.
    /// NaN values are considered undefined.
    pub fn new(
        epochs: Vec<Epoch>,
        satellites: Vec<SV>,
        data: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, Error> {
        let expected = (epochs.len(), satellites.len());
        let cols = data.first().map(|row| row.len()).unwrap_or(expected.1);
        if data.len() != expected.0 || data.iter().any(|row| row.len() != expected.1) {
            return Err(Error::ShapeMismatch {
                expected,
                found: (data.len(), cols),
            });
        }
        let data = data
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| v.filter(|v| !v.is_nan()))
                    .collect()
            })
            .collect();
        Ok(Self {
            epochs,
            satellites,
            data,
        })
    }

    /// Row labels
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Column labels
    pub fn satellites(&self) -> &[SV] {
        &self.satellites
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.epochs.len(), self.satellites.len())
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty() || self.satellites.is_empty()
    }

    /// Returns value at given coordinates, if defined
    pub fn get(&self, t: Epoch, sv: SV) -> Option<f64> {
        let row = self.epochs.iter().position(|e| *e == t)?;
        let col = self.position(sv)?;
        self.data[row][col]
    }

    /// Iterates rows, in chronological order
    pub fn rows(&self) -> impl Iterator<Item = (Epoch, &[Option<f64>])> + '_ {
        self.epochs
            .iter()
            .copied()
            .zip(self.data.iter().map(|row| row.as_slice()))
    }

    /// Returns column of this [SV]
    pub fn column(&self, sv: SV) -> Option<Vec<Option<f64>>> {
        let col = self.position(sv)?;
        Some(self.data.iter().map(|row| row[col]).collect())
    }

    /// Number of defined values, per column
    pub fn count(&self) -> Vec<(SV, usize)> {
        self.satellites
            .iter()
            .enumerate()
            .map(|(col, sv)| {
                let count = self.data.iter().filter(|row| row[col].is_some()).count();
                (*sv, count)
            })
            .collect()
    }

    fn position(&self, sv: SV) -> Option<usize> {
        self.satellites.iter().position(|s| *s == sv)
    }

    /// Applies `f` to each column, which must preserve the column length.
    pub fn map_columns<F>(&self, f: F) -> Self
    where
        F: Fn(SV, &[Option<f64>]) -> Vec<Option<f64>>,
    {
        let mut data = vec![vec![None; self.satellites.len()]; self.epochs.len()];
        for (col, sv) in self.satellites.iter().enumerate() {
            let column = self.data.iter().map(|row| row[col]).collect::<Vec<_>>();
            for (row, value) in f(*sv, &column).into_iter().enumerate().take(self.epochs.len()) {
                data[row][col] = value;
            }
        }
        Self {
            epochs: self.epochs.clone(),
            satellites: self.satellites.clone(),
            data,
        }
    }

    /// Elementwise `self - rhs`, both tables having identical labels.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, Error> {
        if self.epochs != rhs.epochs || self.satellites != rhs.satellites {
            return Err(Error::ShapeMismatch {
                expected: self.shape(),
                found: rhs.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(lhs, rhs)| {
                lhs.iter()
                    .zip(rhs.iter())
                    .map(|(lhs, rhs)| difference(*lhs, *rhs))
                    .collect()
            })
            .collect();
        Ok(Self {
            epochs: self.epochs.clone(),
            satellites: self.satellites.clone(),
            data,
        })
    }

    /// Drops rows and columns that are entirely undefined
    fn drop_undefined(self) -> Self {
        let cols = (0..self.satellites.len())
            .filter(|col| self.data.iter().any(|row| row[*col].is_some()))
            .collect::<Vec<_>>();
        let rows = (0..self.epochs.len())
            .filter(|row| self.data[*row].iter().any(|v| v.is_some()))
            .collect::<Vec<_>>();
        Self {
            epochs: rows.iter().map(|row| self.epochs[*row]).collect(),
            satellites: cols.iter().map(|col| self.satellites[*col]).collect(),
            data: rows
                .iter()
                .map(|row| cols.iter().map(|col| self.data[*row][*col]).collect())
                .collect(),
        }
    }
}

fn difference(lhs: Option<f64>, rhs: Option<f64>) -> Option<f64> {
    Some(lhs? - rhs?)
}

/// Forms single differences (`rover - base`) of one [ObservationType],
/// on the union of both time axes and both satellite sets.
/// A value is defined only when both sides observed it.
/// Rows and columns that end up entirely undefined are dropped.
pub fn single_diff(
    obs_type: ObservationType,
    rover: &Panel,
    base: &Panel,
) -> Result<DiffTable, Error> {
    let field = obs_type.field();

    let epochs = rover
        .index()
        .iter()
        .chain(base.index().iter())
        .copied()
        .sorted()
        .dedup()
        .collect::<Vec<_>>();

    let satellites = rover
        .satellites()
        .chain(base.satellites())
        .sorted()
        .dedup()
        .collect::<Vec<_>>();

    let rover_rows = rover
        .index()
        .iter()
        .enumerate()
        .map(|(i, t)| (*t, i))
        .collect::<BTreeMap<_, _>>();

    let base_rows = base
        .index()
        .iter()
        .enumerate()
        .map(|(i, t)| (*t, i))
        .collect::<BTreeMap<_, _>>();

    let mut data = vec![vec![None; satellites.len()]; epochs.len()];

    for (col, sv) in satellites.iter().enumerate() {
        let (rover_obs, base_obs) = match (rover.numeric(*sv, field)?, base.numeric(*sv, field)?) {
            (Some(rover_obs), Some(base_obs)) => (rover_obs, base_obs),
            _ => continue, // not observed on both sides
        };
        for (row, t) in epochs.iter().enumerate() {
            let rover_value = rover_rows.get(t).and_then(|i| rover_obs[*i]);
            let base_value = base_rows.get(t).and_then(|i| base_obs[*i]);
            data[row][col] = difference(rover_value, base_value);
        }
    }

    let sdiff = DiffTable {
        epochs,
        satellites,
        data,
    };

    Ok(sdiff.drop_undefined())
}

/// Selects the reference satellite: the one with the most observations.
/// Ties go to the first satellite, in column order.
pub fn reference_satellite(sdiff: &DiffTable) -> Result<SV, Error> {
    let mut best: Option<(SV, usize)> = None;
    for (sv, count) in sdiff.count() {
        match best {
            Some((_, best_count)) if count <= best_count => {},
            _ => best = Some((sv, count)),
        }
    }
    best.map(|(sv, _)| sv).ok_or(Error::EmptyTable)
}

/// Forms double differences: every column minus the `ref_sat` column.
/// The `ref_sat` column is null wherever it is defined.
pub fn double_diff(ref_sat: SV, sdiff: &DiffTable) -> Result<DiffTable, Error> {
    let pos = sdiff
        .position(ref_sat)
        .ok_or(Error::UnknownSatellite(ref_sat))?;

    let data = sdiff
        .data
        .iter()
        .map(|row| {
            let reference = row[pos];
            row.iter().map(|v| difference(*v, reference)).collect()
        })
        .collect();

    Ok(DiffTable {
        epochs: sdiff.epochs.clone(),
        satellites: sdiff.satellites.clone(),
        data,
    })
}

/// Removes the "truth" (as estimated by the [TruthEstimator]) from
/// double differences, exposing residual noise.
pub fn truthified_double_diff<E: TruthEstimator + ?Sized>(
    ddiff: &DiffTable,
    estimator: &E,
) -> Result<DiffTable, Error> {
    let truth = estimator.estimate(ddiff);
    ddiff.try_sub(&truth)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Constellation;
    use crate::smoothing::MedianFilter;
    use crate::tests::toolkit::{diff_table, gpst, observation_panel};

    fn sv(prn: u8) -> SV {
        SV::new(Constellation::GPS, prn)
    }

    #[test]
    fn observation_type() {
        assert_eq!(ObservationType::from_str("P"), Ok(ObservationType::PseudoRange));
        assert_eq!(ObservationType::from_str("L"), Ok(ObservationType::Phase));
        for invalid in ["X", "", "p", "C1C", "PL", " P"] {
            assert_eq!(
                ObservationType::from_str(invalid),
                Err(Error::InvalidObservationType(invalid.to_string()))
            );
        }
        assert_eq!(ObservationType::Phase.to_string(), "L");
    }

    #[test]
    fn sdiff() {
        let t = [gpst(0.0), gpst(1.0), gpst(2.0)];
        let rover = observation_panel(
            &t,
            &[
                ("G01", "P", vec![Some(10.0), Some(11.0), Some(12.0)]),
                ("G02", "P", vec![Some(20.0), None, Some(22.0)]),
                ("G03", "P", vec![Some(30.0), Some(31.0), None]),
            ],
        );
        let base = observation_panel(
            &t[..2],
            &[
                ("G01", "P", vec![Some(1.0), Some(2.0)]),
                ("G02", "P", vec![Some(5.0), Some(6.0)]),
                ("G04", "P", vec![Some(0.0), Some(0.0)]),
            ],
        );

        let sdiff = single_diff(ObservationType::PseudoRange, &rover, &base).unwrap();

        // G03/G04 only observed on one side, t=2 only observed by the rover
        assert_eq!(sdiff.satellites(), &[sv(1), sv(2)]);
        assert_eq!(sdiff.epochs(), &[gpst(0.0), gpst(1.0)]);
        assert_eq!(sdiff.get(gpst(0.0), sv(1)), Some(9.0));
        assert_eq!(sdiff.get(gpst(1.0), sv(1)), Some(9.0));
        assert_eq!(sdiff.get(gpst(0.0), sv(2)), Some(15.0));
        assert_eq!(sdiff.get(gpst(1.0), sv(2)), None);
    }

    #[test]
    fn sdiff_antisymmetry() {
        let t = [gpst(0.0), gpst(1.0)];
        let a = observation_panel(
            &t,
            &[
                ("G01", "L", vec![Some(1.5), Some(-2.25)]),
                ("G07", "L", vec![None, Some(4.0)]),
            ],
        );
        let b = observation_panel(
            &t,
            &[
                ("G01", "L", vec![Some(0.5), Some(3.0)]),
                ("G07", "L", vec![Some(1.0), Some(1.0)]),
            ],
        );
        let ab = single_diff(ObservationType::Phase, &a, &b).unwrap();
        let ba = single_diff(ObservationType::Phase, &b, &a).unwrap();
        assert_eq!(ab.shape(), ba.shape());
        for (t, row) in ab.rows() {
            for (sv, value) in ab.satellites().iter().zip(row.iter()) {
                assert_eq!(*value, ba.get(t, *sv).map(|v| -v));
            }
        }
    }

    #[test]
    fn sdiff_missing_field() {
        let t = [gpst(0.0)];
        let rover = observation_panel(&t, &[("G01", "P", vec![Some(1.0)])]);
        assert_eq!(
            single_diff(ObservationType::Phase, &rover, &rover),
            Err(Error::MissingColumn("L".to_string()))
        );
    }

    #[test]
    fn ref_sat() {
        let t = [gpst(0.0), gpst(1.0), gpst(2.0)];
        let sdiff = diff_table(
            &t,
            "G01, G02, G03",
            vec![
                vec![Some(1.0), Some(1.0), None],
                vec![None, Some(1.0), Some(1.0)],
                vec![Some(1.0), Some(1.0), Some(1.0)],
            ],
        );
        assert_eq!(reference_satellite(&sdiff), Ok(sv(2)));

        // all equal: first column
        let sdiff = diff_table(
            &t,
            "G05, G02, G03",
            vec![
                vec![Some(1.0), Some(1.0), None],
                vec![None, Some(1.0), Some(1.0)],
                vec![Some(1.0), None, Some(1.0)],
            ],
        );
        assert_eq!(reference_satellite(&sdiff), Ok(sv(5)));

        let empty = DiffTable::new(t.to_vec(), vec![], vec![vec![]; 3]).unwrap();
        assert_eq!(reference_satellite(&empty), Err(Error::EmptyTable));
    }

    #[test]
    fn ddiff() {
        let t = [gpst(0.0), gpst(1.0)];
        let sdiff = diff_table(
            &t,
            "G01, G02, G03",
            vec![
                vec![Some(3.0), Some(1.0), None],
                vec![Some(5.0), None, Some(2.5)],
            ],
        );
        let ddiff = double_diff(sv(1), &sdiff).unwrap();
        assert_eq!(ddiff.column(sv(1)), Some(vec![Some(0.0), Some(0.0)]));
        assert_eq!(ddiff.column(sv(2)), Some(vec![Some(-2.0), None]));
        assert_eq!(ddiff.column(sv(3)), Some(vec![None, Some(-2.5)]));

        assert_eq!(double_diff(sv(9), &sdiff), Err(Error::UnknownSatellite(sv(9))));
    }

    #[test]
    fn truthified_ddiff() {
        let t = (0..5).map(|i| gpst(i as f64)).collect::<Vec<_>>();
        let ddiff = diff_table(
            &t,
            "G01, G02",
            vec![
                vec![Some(0.0), Some(1.0)],
                vec![None, Some(1.0)],
                vec![Some(0.0), Some(9.0)],
                vec![Some(0.0), Some(1.0)],
                vec![Some(0.0), Some(1.0)],
            ],
        );
        let residuals = truthified_double_diff(&ddiff, &MedianFilter::new(3)).unwrap();
        assert_eq!(residuals.shape(), ddiff.shape());
        assert_eq!(
            residuals.column(sv(1)),
            Some(vec![Some(0.0), None, Some(0.0), Some(0.0), Some(0.0)])
        );
        assert_eq!(
            residuals.column(sv(2)),
            Some(vec![Some(0.0), Some(0.0), Some(8.0), Some(0.0), Some(0.0)])
        );
    }

    #[test]
    fn shape_check() {
        assert!(DiffTable::new(vec![gpst(0.0)], vec![sv(1)], vec![vec![]]).is_err());
        assert!(DiffTable::new(vec![gpst(0.0)], vec![sv(1)], vec![]).is_err());
    }
}
