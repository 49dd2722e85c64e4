//! Text normalization for account names and captions.
//!
//! A single deterministic pipeline is applied to every account cell and every
//! caption so that `"Ⅰ. 유동자산 (주3,4)"` and `"유 동 자 산"` compare equal.

use std::sync::LazyLock;

use regex::Regex;

/// Unit annotation that appears verbatim in caption cells.
const UNIT_TOKEN: &str = "(단위:원)";

/// Straight and curly quote characters.
const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Standalone ASCII Roman numerals, optionally followed by a period.
static ASCII_ROMAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[IVXLCDM]+\b\.?").expect("valid regex"));

/// Unicode Roman numeral glyphs (`Ⅰ` through `ↈ`).
static UNICODE_ROMAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{2160}-\u{2188}]").expect("valid regex"));

/// Footnote references such as `(주3)` or `(주 4,5)`.
static FOOTNOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(주[0-9,\s]*\)").expect("valid regex"));

static HALF_WIDTH_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

static FULL_WIDTH_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（[^）]*）").expect("valid regex"));

/// Single-syllable enumeration prefixes such as `가.` or `나. `.
static ENUMERATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]\.\s*").expect("valid regex"));

/// Digits, periods, hyphens, underscores, lenticular brackets and any
/// parenthesis left unbalanced by the span removal.
static NOISE_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Nd}.\-_【】()（）]").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalizes an account name or caption.
///
/// The pipeline, in order:
/// 1. Trim
/// 2. Strip the `(단위:원)` token and quote characters
/// 3. Strip Roman numerals (ASCII tokens and Unicode glyphs)
/// 4. Strip `(주…)` footnote references
/// 5. Strip every remaining parenthetical span, half- and full-width
/// 6. Strip `가.`-style enumeration prefixes anywhere in the text
/// 7. Strip digits, periods, hyphens, underscores and `【】`
/// 8. Strip the full-width space
/// 9. Strip all remaining whitespace
///
/// Never fails; empty input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace(UNIT_TOKEN, "").replace(QUOTES, "");
    let text = ASCII_ROMAN_RE.replace_all(&text, "");
    let text = UNICODE_ROMAN_RE.replace_all(&text, "");
    let text = FOOTNOTE_RE.replace_all(&text, "");
    let text = HALF_WIDTH_PAREN_RE.replace_all(&text, "");
    let text = FULL_WIDTH_PAREN_RE.replace_all(&text, "");
    let text = ENUMERATION_RE.replace_all(&text, "");
    let text = NOISE_CHAR_RE.replace_all(&text, "");
    let text = text.replace(FULL_WIDTH_SPACE, "");

    WHITESPACE_RE.replace_all(&text, "").into_owned()
}

/// Replaces full-width spaces with regular spaces, leaving everything else
/// untouched so that indentation can still be measured.
#[must_use]
pub fn widen_spaces(raw: &str) -> String {
    raw.replace(FULL_WIDTH_SPACE, " ")
}

/// Counts the leading whitespace characters of `text`.
#[must_use]
pub fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_clean(output: &str) {
        assert!(!output.chars().any(char::is_numeric), "digit in {output:?}");
        assert!(
            !output.contains(['(', ')', '（', '）']),
            "parenthesis in {output:?}"
        );
        assert!(
            !output.chars().any(char::is_whitespace),
            "whitespace in {output:?}"
        );
        assert!(
            !output.chars().any(|c| ('\u{2160}'..='\u{2188}').contains(&c)),
            "roman numeral in {output:?}"
        );
    }

    #[test]
    fn removes_spaces_between_characters() {
        assert_eq!(normalize("재 무 상 태 표"), "재무상태표");
    }

    #[test]
    fn removes_unicode_roman_numerals() {
        assert_eq!(normalize("Ⅰ. 유동자산"), "유동자산");
        assert_eq!(normalize("Ⅱ.비유동자산"), "비유동자산");
    }

    #[test]
    fn removes_ascii_roman_numerals() {
        assert_eq!(normalize("II. 비유동부채"), "비유동부채");
        assert_eq!(normalize("IV 자본잉여금"), "자본잉여금");
    }

    #[test]
    fn removes_footnote_references() {
        assert_eq!(normalize("현금및현금성자산 (주3,4)"), "현금및현금성자산");
        assert_eq!(normalize("매출채권(주 5)"), "매출채권");
    }

    #[test]
    fn removes_all_parenthetical_spans() {
        assert_eq!(normalize("당기순이익(손실)"), "당기순이익");
        assert_eq!(normalize("기타포괄손익（세후）"), "기타포괄손익");
    }

    #[test]
    fn removes_enumeration_prefixes_anywhere() {
        assert_eq!(normalize("가. 매출원가"), "매출원가");
        assert_eq!(normalize("영업비용 나. 판매비"), "영업비용판매비");
    }

    #[test]
    fn removes_unit_token_and_quotes() {
        assert_eq!(normalize("\"재무상태표\" (단위:원)"), "재무상태표");
        assert_eq!(normalize("\u{201C}손익계산서\u{201D}"), "손익계산서");
    }

    #[test]
    fn removes_digits_and_punctuation() {
        assert_eq!(normalize("1. 매출액"), "매출액");
        assert_eq!(normalize("【자본_총계】-"), "자본총계");
    }

    #[test]
    fn removes_full_width_spaces() {
        assert_eq!(normalize("\u{3000}\u{3000}유동부채"), "유동부채");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \u{3000} "), "");
    }

    #[test]
    fn output_is_always_clean() {
        let inputs = [
            "Ⅲ. 재고자산 (주7)",
            "  (1) 유형자산  ",
            "자산(",
            "）부채",
            "제 56 기 2024.12.31 현재",
            "１２ 전각숫자",
            "VI. 이익잉여금\t(결손금)",
            "(단위 : 백만원)",
        ];
        for input in inputs {
            assert_clean(&normalize(input));
        }
    }

    #[test]
    fn counts_leading_whitespace_after_widening() {
        assert_eq!(leading_whitespace(&widen_spaces("\u{3000}\u{3000}현금")), 2);
        assert_eq!(leading_whitespace("    현금"), 4);
        assert_eq!(leading_whitespace("현금"), 0);
    }
}
