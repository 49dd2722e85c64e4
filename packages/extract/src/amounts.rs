//! Multi-year amount alignment and parsing.

use std::collections::BTreeMap;
use std::str::FromStr as _;

use dart_fs_statement_models::FISCAL_YEAR_COUNT;
use rust_decimal::Decimal;

use crate::ExtractError;

/// Cell texts that stand for a nil amount.
const NIL_MARKERS: [&str; 3] = ["-", "\u{2013}", "\u{2014}"];

/// Derives `[year, year - 1, year - 2]` from a filing's reporting year.
#[must_use]
pub const fn derive_years(reporting_year: i32) -> [i32; FISCAL_YEAR_COUNT] {
    [reporting_year, reporting_year - 1, reporting_year - 2]
}

/// Parses one amount cell.
///
/// - blank, whitespace-only or dash cells are zero
/// - `(1,234)` is `-1234`
/// - `1,234` is `1234`
///
/// # Errors
///
/// Returns [`ExtractError::RowParse`] if the cell is not a number.
pub fn parse_amount(cell: &str) -> Result<Decimal, ExtractError> {
    let text = cell.trim();
    if text.is_empty() || NIL_MARKERS.contains(&text) {
        return Ok(Decimal::ZERO);
    }

    let (digits, negative) = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (text, false),
    };

    let digits: String = digits
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = Decimal::from_str(&digits)
        .map_err(|e| ExtractError::RowParse(format!("invalid amount {cell:?}: {e}")))?;

    Ok(if negative { -value } else { value })
}

/// Aligns the amount cells of one row with the statement's fiscal years.
///
/// `cells` are the row's cells after the account-name column, and
/// `skip_column` is the notes column's index within `cells`. Cells are
/// assigned to `years` in order; cells beyond the last year are ignored and
/// years without a cell are zero.
///
/// # Errors
///
/// Returns [`ExtractError::RowParse`] if an assigned cell is not a number.
pub fn extract_amounts(
    cells: &[String],
    years: &[i32; FISCAL_YEAR_COUNT],
    skip_column: Option<usize>,
) -> Result<BTreeMap<i32, Decimal>, ExtractError> {
    let values = cells
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip_column)
        .map(|(_, cell)| cell);

    let mut amounts: BTreeMap<i32, Decimal> =
        years.iter().map(|&year| (year, Decimal::ZERO)).collect();

    for (year, cell) in years.iter().zip(values) {
        amounts.insert(*year, parse_amount(cell)?);
    }

    let extra = cells.len().saturating_sub(usize::from(skip_column.is_some()) + FISCAL_YEAR_COUNT);
    if extra > 0 {
        log::debug!("Ignoring {extra} amount cells beyond {FISCAL_YEAR_COUNT} fiscal years");
    }

    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn parses_parenthesized_amount_as_negative() {
        assert_eq!(parse_amount("(1,234)").unwrap(), Decimal::from(-1234));
    }

    #[test]
    fn parses_blank_amount_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("-").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_amount("1,234").unwrap(), Decimal::from(1234));
        assert_eq!(
            parse_amount(" 12,345,678,901,234 ").unwrap(),
            Decimal::from(12_345_678_901_234_i64)
        );
    }

    #[test]
    fn keeps_explicit_sign_and_fraction() {
        assert_eq!(parse_amount("-500").unwrap(), Decimal::from(-500));
        assert_eq!(parse_amount("1,234.5").unwrap().to_string(), "1234.5");
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!(matches!(
            parse_amount("해당없음"),
            Err(ExtractError::RowParse(_))
        ));
    }

    #[test]
    fn derives_descending_years() {
        assert_eq!(derive_years(2024), [2024, 2023, 2022]);
    }

    #[test]
    fn aligns_cells_with_years() {
        let amounts =
            extract_amounts(&cells(&["1,000", "(200)", ""]), &[2024, 2023, 2022], None).unwrap();
        assert_eq!(amounts[&2024], Decimal::from(1000));
        assert_eq!(amounts[&2023], Decimal::from(-200));
        assert_eq!(amounts[&2022], Decimal::ZERO);
    }

    #[test]
    fn notes_column_does_not_consume_a_year() {
        let amounts = extract_amounts(
            &cells(&["5,6", "1,000", "900", "800"]),
            &[2024, 2023, 2022],
            Some(0),
        )
        .unwrap();
        assert_eq!(amounts[&2024], Decimal::from(1000));
        assert_eq!(amounts[&2022], Decimal::from(800));
    }

    #[test]
    fn missing_cells_are_zero() {
        let amounts = extract_amounts(&cells(&["10"]), &[2024, 2023, 2022], None).unwrap();
        assert_eq!(amounts.len(), 3);
        assert_eq!(amounts[&2023], Decimal::ZERO);
    }

    #[test]
    fn extra_cells_are_ignored() {
        let amounts =
            extract_amounts(&cells(&["1", "2", "3", "4"]), &[2024, 2023, 2022], None).unwrap();
        assert_eq!(amounts.len(), 3);
        assert_eq!(amounts[&2022], Decimal::from(3));
    }
}
