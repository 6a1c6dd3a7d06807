use std::collections::BTreeMap;

use crate::{
    prelude::{Epoch, Error, SV},
    table::Column,
};

/// [Panel] is a three dimensional table: satellite × field × time.
/// All satellites share the same time axis and the same field axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    index: Vec<Epoch>,
    fields: Vec<String>,
    items: BTreeMap<SV, Vec<Column>>,
}

impl Panel {
    /// Builds an empty [Panel] sampled at given [Epoch]s
    pub fn new(index: Vec<Epoch>) -> Self {
        Self {
            index,
            fields: Vec::new(),
            items: BTreeMap::new(),
        }
    }

    /// Copies and returns [Self] with given column
    pub fn with_field(mut self, sv: SV, field: &str, column: Column) -> Result<Self, Error> {
        self.insert(sv, field, column)?;
        Ok(self)
    }

    /// Inserts (or replaces) the `field` column of this [SV].
    /// When `sv` is new, or `field` is new, the other cells of the panel
    /// are filled with undefined columns, to preserve the shared axes.
    pub fn insert(&mut self, sv: SV, field: &str, column: Column) -> Result<(), Error> {
        if column.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                expected: self.index.len(),
                found: column.len(),
            });
        }

        let len = self.index.len();

        let pos = match self.fields.iter().position(|f| f == field) {
            Some(pos) => pos,
            None => {
                for columns in self.items.values_mut() {
                    columns.push(column.blank_like(len));
                }
                self.fields.push(field.to_string());
                self.fields.len() - 1
            },
        };

        if !self.items.contains_key(&sv) {
            let template = self.items.values().next().cloned();
            let blank = match template {
                Some(columns) => columns.iter().map(|c| c.blank_like(len)).collect(),
                None => vec![column.blank_like(len); self.fields.len()],
            };
            self.items.insert(sv, blank);
        }

        if let Some(columns) = self.items.get_mut(&sv) {
            columns[pos] = column;
        }
        Ok(())
    }

    /// Attaches one column per satellite under a single `field` name,
    /// replacing any previous content of that field.
    /// Satellites not described in `columns` receive an undefined column.
    /// The field is registered even when the panel has no satellites.
    pub fn insert_field(&mut self, field: &str, columns: BTreeMap<SV, Column>) -> Result<(), Error> {
        let len = self.index.len();
        let blank = match columns.values().next() {
            Some(column) => column.blank_like(len),
            None => Column::default().blank_like(len),
        };

        let undescribed = self
            .satellites()
            .filter(|sv| !columns.contains_key(sv))
            .collect::<Vec<_>>();

        for sv in undescribed {
            self.insert(sv, field, blank.clone())?;
        }
        for (sv, column) in columns {
            self.insert(sv, field, column)?;
        }

        // empty panel
        if !self.has_field(field) {
            self.fields.push(field.to_string());
        }
        Ok(())
    }

    pub fn get(&self, sv: SV, field: &str) -> Option<&Column> {
        let pos = self.fields.iter().position(|f| f == field)?;
        self.items.get(&sv).map(|columns| &columns[pos])
    }

    /// Returns numerical `field` for this [SV].
    /// An undescribed [SV] is not an error: it is entirely undefined.
    pub fn numeric(&self, sv: SV, field: &str) -> Result<Option<&[Option<f64>]>, Error> {
        if !self.has_field(field) {
            return Err(Error::MissingColumn(field.to_string()));
        }
        match self.get(sv, field) {
            Some(column) => column.as_numeric().map(Some).ok_or_else(|| Error::ColumnType {
                column: field.to_string(),
                expected: "numeric",
            }),
            None => Ok(None),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Shared time axis
    pub fn index(&self) -> &[Epoch] {
        &self.index
    }

    /// Field names, in order of insertion
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.as_str())
    }

    /// Satellites (items), in increasing order
    pub fn satellites(&self) -> impl Iterator<Item = SV> + '_ {
        self.items.keys().copied()
    }

    /// Number of samples (time axis length)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
