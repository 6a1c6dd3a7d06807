use crate::{
    prelude::{Epoch, Error},
    table::{Column, Label},
};

/// [Frame] is a flat table: named [Column]s sharing a single row index.
/// Rows are time ordered samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    index: Vec<Label>,
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// Builds an empty [Frame] (no columns) with given row index
    pub fn new(index: Vec<Label>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Builds an empty [Frame] indexed by row number
    pub fn ordinal(rows: usize) -> Self {
        Self::new((0..rows as u64).map(Label::Ordinal).collect())
    }

    /// Builds an empty [Frame] indexed by [Epoch]s
    pub fn time_indexed(epochs: &[Epoch]) -> Self {
        Self::new(epochs.iter().copied().map(Label::Epoch).collect())
    }

    /// Copies and returns [Self] with given column
    pub fn with_column(mut self, name: &str, column: Column) -> Result<Self, Error> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Inserts a new column. A column with identical name is replaced
    /// and retains its position.
    pub fn insert(&mut self, name: &str, column: Column) -> Result<(), Error> {
        if column.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                expected: self.index.len(),
                found: column.len(),
            });
        }
        if let Some((_, existing)) = self.columns.iter_mut().find(|(k, _)| k == name) {
            *existing = column;
        } else {
            self.columns.push((name.to_string(), column));
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|(k, _)| k == name)?;
        Some(self.columns.remove(pos).1)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find_map(|(k, col)| if k == name { Some(col) } else { None })
    }

    /// Returns numerical column, or an error if it does not exist
    /// or is not numerical.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>], Error> {
        let column = self
            .column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        column.as_numeric().ok_or_else(|| Error::ColumnType {
            column: name.to_string(),
            expected: "numeric",
        })
    }

    /// Returns [Epoch] column, or an error if it does not exist
    /// or is not made of [Epoch]s.
    pub fn epochs(&self, name: &str) -> Result<&[Option<Epoch>], Error> {
        let column = self
            .column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        column.as_epochs().ok_or_else(|| Error::ColumnType {
            column: name.to_string(),
            expected: "epochs",
        })
    }

    pub fn index(&self) -> &[Label] {
        &self.index
    }

    /// Column names, in order of insertion
    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Re-keys [Self] using given column. The column values become
    /// the new row labels, in row order, and the column is removed.
    pub fn set_index(&self, name: &str) -> Result<Self, Error> {
        let column = self
            .column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;

        let index = match column {
            Column::Epochs(values) => values
                .iter()
                .enumerate()
                .map(|(row, t)| {
                    t.map(Label::Epoch).ok_or_else(|| Error::MissingLabel {
                        column: name.to_string(),
                        row,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Column::Numeric(values) => values
                .iter()
                .enumerate()
                .map(|(row, v)| {
                    v.map(Label::Value).ok_or_else(|| Error::MissingLabel {
                        column: name.to_string(),
                        row,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let columns = self
            .columns
            .iter()
            .filter(|(k, _)| k != name)
            .cloned()
            .collect();

        Ok(Self { index, columns })
    }
}
