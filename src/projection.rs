use crate::components::airport::AirportRecord;
use crate::ExplorerError;

/// Rows of airports restricted to a set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct Table {
    /// The column names, in display order
    pub columns: Vec<String>,
    /// One row per airport, values aligned with `columns`
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// The number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects `records` onto `selected`, in the order given.
///
/// `columns` is the header of the file the records were read from.
/// # Errors
/// If a selected column is not in the header.
#[inline]
pub fn project<'a, I>(
    columns: &[String],
    records: I,
    selected: &[String],
) -> Result<Table, ExplorerError>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let indices = selected
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| ExplorerError::UnknownColumn(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = records
        .into_iter()
        .map(|record| {
            indices
                .iter()
                .map(|index| record.field(*index).to_owned())
                .collect()
        })
        .collect();

    Ok(Table {
        columns: selected.to_vec(),
        rows,
    })
}
