//! Filing metadata read from report titles and filing URLs.

use std::sync::LazyLock;

use dart_fs_statement_models::FilingContext;
use regex::Regex;

/// `(2024.03)` or `(202403)` inside a report title.
static TITLE_YEAR_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4})\.?\d{2}\)").expect("valid regex"));

/// `2024.03` or `202403` anywhere in a report title.
static TITLE_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\.?\d{2}").expect("valid regex"));

/// `rcpNo=` followed by the 14-digit reception number.
static RCP_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rcpNo=(\d{4})\d{10}").expect("valid regex"));

/// Extracts the year from a report title such as `사업보고서 (2024.03)` or
/// `[기재정정]사업보고서 (2019.12)`.
#[must_use]
pub fn year_from_report_title(title: &str) -> Option<i32> {
    TITLE_YEAR_PAREN_RE
        .captures(title)
        .or_else(|| TITLE_YEAR_RE.captures(title))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extracts the filing year from a filing URL carrying `rcpNo=`.
#[must_use]
pub fn year_from_filing_url(url: &str) -> Option<i32> {
    RCP_NO_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Reception number of a filing: the text after the URL's last `=`.
#[must_use]
pub fn reception_id_from_url(url: &str) -> Option<&str> {
    url.rsplit_once('=')
        .map(|(_, id)| id)
        .filter(|id| !id.is_empty())
}

/// Builds a [`FilingContext`] for a filing listed under `report_title` at
/// `url`.
///
/// The reporting year comes from the report title; the URL's filing year is
/// the fallback.
#[must_use]
pub fn filing_context(company_identifier: &str, report_title: &str, url: &str) -> FilingContext {
    let reporting_year = year_from_report_title(report_title).or_else(|| year_from_filing_url(url));
    if reporting_year.is_none() {
        log::warn!("No reporting year found in {report_title:?} or {url}");
    }

    FilingContext {
        company_identifier: company_identifier.to_owned(),
        reception_id: reception_id_from_url(url).unwrap_or_default().to_owned(),
        reporting_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://dart.fss.or.kr/dsaf001/main.do?rcpNo=20150921000093";

    #[test]
    fn reads_year_from_report_titles() {
        assert_eq!(year_from_report_title("사업보고서 (2024.06)"), Some(2024));
        assert_eq!(
            year_from_report_title("사업보고서제출기한연장신고서 (2021.06)"),
            Some(2021)
        );
        assert_eq!(year_from_report_title("[기재정정]사업보고서 (2019.06)"), Some(2019));
        assert_eq!(year_from_report_title("사업보고서 201812"), Some(2018));
        assert_eq!(year_from_report_title("사업보고서"), None);
    }

    #[test]
    fn reads_year_from_filing_url() {
        assert_eq!(year_from_filing_url(URL), Some(2015));
        assert_eq!(year_from_filing_url("https://dart.fss.or.kr/main.do"), None);
    }

    #[test]
    fn reads_reception_id_from_url() {
        assert_eq!(reception_id_from_url(URL), Some("20150921000093"));
        assert_eq!(reception_id_from_url("https://dart.fss.or.kr/main.do"), None);
    }

    #[test]
    fn builds_filing_context() {
        let filing = filing_context("005930", "사업보고서 (2014.12)", URL);
        assert_eq!(filing.reporting_year, Some(2014));
        assert_eq!(filing.reception_id, "20150921000093");
        assert_eq!(filing.company_identifier, "005930");
    }

    #[test]
    fn falls_back_to_url_year() {
        let filing = filing_context("005930", "정정신고", URL);
        assert_eq!(filing.reporting_year, Some(2015));
    }
}
