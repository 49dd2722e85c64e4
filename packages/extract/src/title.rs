//! Metadata carried by caption tables: the caption itself, the fiscal-year
//! periods and the unit row.

use std::sync::LazyLock;

use dart_fs_statement_models::{FISCAL_YEAR_COUNT, TitleTable};
use regex::Regex;

use crate::normalize::normalize;
use crate::resolve::{is_statement_caption, is_target_caption};
use crate::validate::TITLE_PERIOD_ROWS;

/// `(단위 : 원)` with arbitrary spacing.
static UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*단위\s*:\s*([^)]+)\)").expect("valid regex"));

/// `2024.12.31 현재`, capturing the year.
static AS_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\.\d{2}\.\d{2}\s*현재").expect("valid regex"));

/// Any `YYYY.MM.DD` date, capturing the year.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\.\d{2}\.\d{2}").expect("valid regex"));

/// Returns the caption of `table`, normalized.
///
/// The first cell naming one concrete statement wins. An umbrella caption
/// such as `재무제표` is returned only when no cell names a statement.
#[must_use]
pub fn caption(table: &TitleTable) -> Option<String> {
    let mut umbrella = None;
    for text in table.rows.iter().flatten().map(|cell| normalize(cell)) {
        if is_statement_caption(&text) {
            return Some(text);
        }
        if umbrella.is_none() && is_target_caption(&text) {
            umbrella = Some(text);
        }
    }
    umbrella
}

/// Extracts the unit label from the trailing row of `table`.
#[must_use]
pub fn unit(table: &TitleTable) -> Option<String> {
    let last = table.rows.last()?;
    last.iter().find_map(|cell| {
        UNIT_RE
            .captures(cell)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_owned())
            .filter(|unit| !unit.is_empty())
    })
}

/// Extracts the year a period description refers to.
///
/// - `제 10 기 2024.12.31 현재` yields the `현재` date's year
/// - `제 10 기 2024.01.01 부터 2024.12.31 까지` yields the ending year
#[must_use]
pub fn period_year(text: &str) -> Option<i32> {
    if text.contains("현재") {
        return AS_OF_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
    }

    if text.contains("부터") && text.contains("까지") {
        return DATE_RE
            .captures_iter(text)
            .nth(1)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
    }

    None
}

/// Collects one year from each of `texts`. Returns `None` unless every text
/// yields a year.
#[must_use]
pub fn period_years<'a>(
    texts: impl IntoIterator<Item = &'a str>,
) -> Option<[i32; FISCAL_YEAR_COUNT]> {
    let years: Vec<i32> = texts.into_iter().map(period_year).collect::<Option<_>>()?;
    years.try_into().ok()
}

/// Extracts the three fiscal years from the period rows of `table`.
#[must_use]
pub fn fiscal_years(table: &TitleTable) -> Option<[i32; FISCAL_YEAR_COUNT]> {
    let rows = TITLE_PERIOD_ROWS
        .iter()
        .map(|&index| table.rows.get(index).map(|row| row.join(" ")))
        .collect::<Option<Vec<_>>>()?;
    period_years(rows.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> TitleTable {
        TitleTable::new(
            rows.iter()
                .map(|row| row.iter().map(|&s| s.to_owned()).collect())
                .collect(),
        )
    }

    #[test]
    fn finds_caption_in_any_cell() {
        let t = table(&[&["", "연 결 재 무 상 태 표"], &["제 10 기"]]);
        assert_eq!(caption(&t).as_deref(), Some("연결재무상태표"));
    }

    #[test]
    fn prefers_statement_caption_over_umbrella_caption() {
        let t = table(&[&["재무제표", "재무상태표"], &["제 10 기"]]);
        assert_eq!(caption(&t).as_deref(), Some("재무상태표"));
        let t = table(&[&["연결재무제표"], &["제 10 기"]]);
        assert_eq!(caption(&t).as_deref(), Some("연결재무제표"));
    }

    #[test]
    fn ignores_non_target_captions() {
        let t = table(&[&["자본변동표"], &["제 10 기"]]);
        assert_eq!(caption(&t), None);
    }

    #[test]
    fn extracts_unit_with_loose_spacing() {
        let t = table(&[&["재무상태표"], &["( 단위 :  백만원 )"]]);
        assert_eq!(unit(&t).as_deref(), Some("백만원"));
        let t = table(&[&["재무상태표"], &["(단위:원)"]]);
        assert_eq!(unit(&t).as_deref(), Some("원"));
    }

    #[test]
    fn unit_is_unknown_without_unit_row() {
        let t = table(&[&["재무상태표"], &["제 8 기 2022.12.31 현재"]]);
        assert_eq!(unit(&t), None);
    }

    #[test]
    fn reads_as_of_year() {
        assert_eq!(period_year("제 64 기          2015.12.31 현재"), Some(2015));
    }

    #[test]
    fn reads_ending_year_of_range() {
        assert_eq!(
            period_year("제 64 기 2014.07.01 부터 2015.06.30 까지"),
            Some(2015)
        );
    }

    #[test]
    fn period_without_date_has_no_year() {
        assert_eq!(period_year("제 10 기"), None);
        assert_eq!(period_year("제 10 기 2024.01.01 부터"), None);
    }

    #[test]
    fn extracts_fiscal_years_from_period_rows() {
        let t = table(&[
            &["포괄손익계산서"],
            &["제 10 기", "2024.01.01 부터 2024.12.31 까지"],
            &["제 9 기", "2023.01.01 부터 2023.12.31 까지"],
            &["제 8 기", "2022.01.01 부터 2022.12.31 까지"],
            &["(단위 : 원)"],
        ]);
        assert_eq!(fiscal_years(&t), Some([2024, 2023, 2022]));
    }

    #[test]
    fn missing_period_year_yields_none() {
        let t = table(&[
            &["재무상태표"],
            &["제 10 기 2024.12.31 현재"],
            &["제 9 기"],
            &["제 8 기 2022.12.31 현재"],
            &["(단위 : 원)"],
        ]);
        assert_eq!(fiscal_years(&t), None);
    }
}
