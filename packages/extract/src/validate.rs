//! Structural acceptance tests for caption tables and data tables.
//!
//! Tables that fail these checks are skipped entirely and take no part in
//! the ordinal pairing done by [`crate::assemble`].

use std::sync::LazyLock;

use dart_fs_statement_models::{DataTable, TitleTable};
use regex::Regex;

use crate::ExtractError;
use crate::normalize::normalize;

/// Minimum number of rows a caption table must have.
pub const MIN_TITLE_ROWS: usize = 5;

/// Caption-table rows that must each carry a period label.
pub const TITLE_PERIOD_ROWS: [usize; 3] = [1, 2, 3];

/// Number of header cells a data table must have (name column plus three
/// periods), not counting a notes column.
pub const DATA_HEADER_CELLS: usize = 4;

/// Header text of the notes column.
pub const NOTES_HEADER: &str = "주석";

/// Period label such as `제 56 기` or `제56기`.
static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제\s*\d+\s*기").expect("valid regex"));

/// Returns `true` if `text` contains a `제 N 기` period label.
#[must_use]
pub fn is_period_label(text: &str) -> bool {
    PERIOD_RE.is_match(text)
}

fn is_notes_cell(text: &str) -> bool {
    normalize(text) == NOTES_HEADER
}

/// Checks a caption table against the standard shape, requiring at least
/// `min_rows` rows.
///
/// # Errors
///
/// Returns [`ExtractError::Format`] describing the first failed check.
pub fn check_title_table(table: &TitleTable, min_rows: usize) -> Result<(), ExtractError> {
    let min_rows = min_rows.max(TITLE_PERIOD_ROWS[2] + 1);
    if table.rows.len() < min_rows {
        return Err(ExtractError::Format(format!(
            "title table has {} rows, expected at least {min_rows}",
            table.rows.len()
        )));
    }

    for index in TITLE_PERIOD_ROWS {
        if !table.rows[index].iter().any(|cell| is_period_label(cell)) {
            return Err(ExtractError::Format(format!(
                "title table row {index} has no period label"
            )));
        }
    }

    Ok(())
}

/// Returns `true` if `table` is a standard caption table.
#[must_use]
pub fn is_standard_title_table(table: &TitleTable) -> bool {
    check_title_table(table, MIN_TITLE_ROWS).is_ok()
}

/// Where the header, notes column and account rows of a data table are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    /// Header cells with the notes column removed.
    pub header: Vec<String>,
    /// Index of the notes column in the full row, if the table has one.
    pub notes_column: Option<usize>,
    /// Index of the first account row in [`DataTable::rows`].
    pub body_start: usize,
}

impl DataLayout {
    /// Locates the header of `table`.
    ///
    /// Explicit header cells win. Otherwise the first body row is taken as
    /// the header when it carries a period label or a notes cell, and account
    /// rows start after it. Returns `None` when no header can be found.
    #[must_use]
    pub fn discover(table: &DataTable) -> Option<Self> {
        let (cells, body_start) = match &table.header {
            Some(header) if !header.is_empty() => (header, 0),
            _ => {
                let first = table.rows.first()?;
                let looks_like_header = first
                    .iter()
                    .any(|cell| is_period_label(cell) || is_notes_cell(cell));
                if !looks_like_header {
                    return None;
                }
                (first, 1)
            }
        };

        let notes_column = cells.iter().position(|cell| is_notes_cell(cell));
        let header = cells
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != notes_column)
            .map(|(_, cell)| cell.trim().to_owned())
            .collect();

        Some(Self {
            header,
            notes_column,
            body_start,
        })
    }

    /// The period cells of the header (columns 1..=3), if present.
    #[must_use]
    pub fn period_cells(&self) -> &[String] {
        self.header.get(1..).unwrap_or_default()
    }
}

/// Checks a data table against the standard shape and returns its layout.
///
/// # Errors
///
/// Returns [`ExtractError::Format`] when no header can be found, the header
/// does not have exactly four cells, the first header cell is not blank, or
/// all three period cells are filled and one is not a `제 N 기` label.
pub fn check_data_table(table: &DataTable) -> Result<DataLayout, ExtractError> {
    let layout = DataLayout::discover(table)
        .ok_or_else(|| ExtractError::Format("data table has no header row".to_owned()))?;

    if layout.header.len() != DATA_HEADER_CELLS {
        return Err(ExtractError::Format(format!(
            "data table header has {} cells, expected {DATA_HEADER_CELLS}",
            layout.header.len()
        )));
    }

    if !layout.header[0].is_empty() {
        return Err(ExtractError::Format(format!(
            "data table header starts with {:?}, expected a blank cell",
            layout.header[0]
        )));
    }

    let periods = layout.period_cells();
    if periods.iter().all(|cell| !cell.is_empty())
        && let Some(bad) = periods.iter().find(|cell| !is_period_label(cell))
    {
        return Err(ExtractError::Format(format!(
            "data table header cell {bad:?} is not a period label"
        )));
    }

    Ok(layout)
}

/// Returns `true` if `table` is a standard data table.
#[must_use]
pub fn is_standard_data_table(table: &DataTable) -> bool {
    check_data_table(table).is_ok()
}
