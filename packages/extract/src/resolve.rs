//! Statement type resolution from normalized captions.
//!
//! Maps a caption such as `연결포괄손익계산서` to its [`StatementKind`] and
//! [`FsDivision`]. Patterns are checked most specific first, because
//! `포괄손익계산서` contains `손익계산서`.

use dart_fs_statement_models::{FsDivision, StatementCode, StatementKind};

/// Every caption that may name a target statement, after normalization.
pub const TARGET_CAPTIONS: [&str; 8] = [
    "연결재무제표",
    "재무제표",
    "연결재무상태표",
    "연결손익계산서",
    "연결포괄손익계산서",
    "재무상태표",
    "손익계산서",
    "포괄손익계산서",
];

/// Captions naming one concrete statement.
pub const STATEMENT_CAPTIONS: [&str; 6] = [
    "재무상태표",
    "손익계산서",
    "포괄손익계산서",
    "연결재무상태표",
    "연결손익계산서",
    "연결포괄손익계산서",
];

const CONSOLIDATED_MARKER: &str = "연결";

/// Kind patterns in evaluation order.
const KIND_PATTERNS: [(&str, StatementKind); 3] = [
    ("포괄손익계산서", StatementKind::Cis),
    ("재무상태표", StatementKind::Bs),
    ("손익계산서", StatementKind::Is),
];

/// Returns `true` if `caption` is one of the [`TARGET_CAPTIONS`].
#[must_use]
pub fn is_target_caption(caption: &str) -> bool {
    TARGET_CAPTIONS.contains(&caption)
}

/// Returns `true` if `caption` names one concrete statement.
#[must_use]
pub fn is_statement_caption(caption: &str) -> bool {
    STATEMENT_CAPTIONS.contains(&caption)
}

/// Consolidated if the caption mentions `연결`, separate otherwise.
#[must_use]
pub fn fs_division(caption: &str) -> FsDivision {
    if caption.contains(CONSOLIDATED_MARKER) {
        FsDivision::Cfs
    } else {
        FsDivision::Ofs
    }
}

/// Resolves a normalized caption into its statement kind and division.
///
/// Returns `None` for captions outside [`TARGET_CAPTIONS`] and for the
/// umbrella captions (`재무제표`, `연결재무제표`) that name no single
/// statement.
#[must_use]
pub fn resolve(caption: &str) -> Option<(StatementKind, FsDivision)> {
    if !is_target_caption(caption) {
        return None;
    }

    KIND_PATTERNS
        .iter()
        .find(|(pattern, _)| caption.contains(pattern))
        .map(|&(_, kind)| (kind, fs_division(caption)))
}

/// Resolves a normalized caption straight into a [`StatementCode`].
#[must_use]
pub fn resolve_code(caption: &str) -> Option<StatementCode> {
    resolve(caption).map(|(kind, division)| StatementCode::new(division, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_consolidated_comprehensive_income_before_income() {
        assert_eq!(
            resolve("연결포괄손익계산서"),
            Some((StatementKind::Cis, FsDivision::Cfs))
        );
        assert_eq!(
            resolve("포괄손익계산서"),
            Some((StatementKind::Cis, FsDivision::Ofs))
        );
    }

    #[test]
    fn resolves_separate_balance_sheet() {
        assert_eq!(
            resolve("재무상태표"),
            Some((StatementKind::Bs, FsDivision::Ofs))
        );
    }

    #[test]
    fn resolves_every_concrete_caption() {
        let expected = [
            StatementCode::OfsBs,
            StatementCode::OfsIs,
            StatementCode::OfsCis,
            StatementCode::CfsBs,
            StatementCode::CfsIs,
            StatementCode::CfsCis,
        ];
        for (caption, code) in STATEMENT_CAPTIONS.iter().zip(expected) {
            assert_eq!(resolve_code(caption), Some(code), "{caption}");
        }
    }

    #[test]
    fn umbrella_captions_resolve_to_nothing() {
        assert!(is_target_caption("연결재무제표"));
        assert_eq!(resolve("연결재무제표"), None);
        assert_eq!(resolve("재무제표"), None);
    }

    #[test]
    fn rejects_captions_outside_target_set() {
        assert_eq!(resolve("자본변동표"), None);
        assert_eq!(resolve("현금흐름표"), None);
        assert_eq!(resolve("요약재무상태표"), None);
        assert_eq!(resolve(""), None);
    }
}
