//! Batch query results.
//!
//! A batch of states can be restructured into one array per field (a
//! [`FieldTable`]) when every state declares the same [`StateSchema`].
//! Otherwise the batch stays a plain ordered sequence. Either way element
//! `i` is the state at the `i`-th query point.

use log::debug;
use serde::Serialize;

use crate::state::StateSchema;

/// Fields-of-arrays view of a batch of states.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldTable {
    names: &'static [&'static str],
    columns: Vec<Vec<f64>>,
    len: usize,
}

impl FieldTable {
    /// Field names, in schema order.
    #[inline]
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Number of rows (query points).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All values of the named field.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let index = self.names.iter().position(|&n| n == name)?;
        Some(&self.columns[index])
    }

    /// All columns, in schema order.
    #[inline]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Field values of row `i`, in schema order.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        (i < self.len).then(|| self.columns.iter().map(|c| c[i]).collect())
    }
}

/// Result of an aggregated batch query.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchStates<S> {
    /// One array per declared field.
    Fields(FieldTable),
    /// Plain ordered states, used when no uniform schema exists.
    Sequence(Vec<S>),
}

impl<S> BatchStates<S> {
    /// Number of query points covered.
    pub fn len(&self) -> usize {
        match self {
            Self::Fields(table) => table.len(),
            Self::Sequence(states) => states.len(),
        }
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The field table, if the batch was restructured.
    pub fn as_fields(&self) -> Option<&FieldTable> {
        match self {
            Self::Fields(table) => Some(table),
            Self::Sequence(_) => None,
        }
    }

    /// The plain states, if the batch fell back to a sequence.
    pub fn as_sequence(&self) -> Option<&[S]> {
        match self {
            Self::Fields(_) => None,
            Self::Sequence(states) => Some(states),
        }
    }
}

impl<S: StateSchema> BatchStates<S> {
    /// Field values at row `i`, regardless of representation.
    pub fn row_values(&self, i: usize) -> Option<Vec<f64>> {
        match self {
            Self::Fields(table) => table.row(i),
            Self::Sequence(states) => states.get(i).map(StateSchema::field_values),
        }
    }
}

/// Restructure `states` into a [`FieldTable`] when possible.
///
/// Falls back to [`BatchStates::Sequence`] when a state declares no schema,
/// when schemas differ between states, when a state reports a value count
/// that does not match its schema, or when the batch is empty (an empty
/// batch carries no schema to build columns from).
///
/// ```
/// use wavefan::{aggregate, BatchStates, PrimitiveState};
///
/// let states = vec![
///     PrimitiveState::new(1.0, 0.0, 1.0),
///     PrimitiveState::new(0.125, 0.0, 0.1),
/// ];
///
/// let BatchStates::Fields(table) = aggregate(states) else { unreachable!() };
/// assert_eq!(table.column("density"), Some(&[1.0, 0.125][..]));
/// assert_eq!(table.row(1), Some(vec![0.125, 0.0, 0.1]));
/// ```
pub fn aggregate<S: StateSchema>(states: Vec<S>) -> BatchStates<S> {
    match build_field_table(&states) {
        Ok(table) => BatchStates::Fields(table),
        Err(reason) => {
            debug!(
                "batch of {} states kept as a sequence: {reason}",
                states.len()
            );
            BatchStates::Sequence(states)
        }
    }
}

fn build_field_table<S: StateSchema>(states: &[S]) -> Result<FieldTable, String> {
    let first = states.first().ok_or("empty batch")?;
    let names = first
        .field_names()
        .ok_or("state 0 declares no field schema")?;

    let mut columns: Vec<Vec<f64>> = (0..names.len())
        .map(|_| Vec::with_capacity(states.len()))
        .collect();
    for (i, state) in states.iter().enumerate() {
        match state.field_names() {
            Some(other) if other == names => {}
            Some(_) => return Err(format!("state {i} has a different field schema")),
            None => return Err(format!("state {i} declares no field schema")),
        }

        let values = state.field_values();
        if values.len() != names.len() {
            return Err(format!(
                "state {i} reports {} values for {} fields",
                values.len(),
                names.len()
            ));
        }
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    Ok(FieldTable {
        names,
        columns,
        len: states.len(),
    })
}
