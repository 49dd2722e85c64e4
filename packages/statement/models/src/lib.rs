#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Financial statement record types and the raw table shapes they are
//! extracted from.
//!
//! The navigation layer captures the cells of a disclosure page into
//! [`PageTables`]. The extraction engine turns those into zero or more
//! [`StatementTable`] records, which persistence collaborators store keyed by
//! [`StatementKey`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of fiscal years carried by every statement.
pub const FISCAL_YEAR_COUNT: usize = 3;

/// Whether a statement covers the consolidated group or the separate entity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FsDivision {
    /// Consolidated financial statements (연결)
    Cfs,
    /// Separate financial statements (별도)
    Ofs,
}

/// The kind of financial statement.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementKind {
    /// Balance sheet (재무상태표)
    Bs,
    /// Income statement (손익계산서)
    Is,
    /// Statement of comprehensive income (포괄손익계산서)
    Cis,
}

/// Canonical statement code combining [`FsDivision`] and [`StatementKind`].
///
/// Serialized as `CFS_BS`, `OFS_CIS`, etc.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementCode {
    CfsBs,
    CfsIs,
    CfsCis,
    OfsBs,
    OfsIs,
    OfsCis,
}

impl StatementCode {
    /// Combines a division and a kind into a statement code.
    #[must_use]
    pub const fn new(division: FsDivision, kind: StatementKind) -> Self {
        match (division, kind) {
            (FsDivision::Cfs, StatementKind::Bs) => Self::CfsBs,
            (FsDivision::Cfs, StatementKind::Is) => Self::CfsIs,
            (FsDivision::Cfs, StatementKind::Cis) => Self::CfsCis,
            (FsDivision::Ofs, StatementKind::Bs) => Self::OfsBs,
            (FsDivision::Ofs, StatementKind::Is) => Self::OfsIs,
            (FsDivision::Ofs, StatementKind::Cis) => Self::OfsCis,
        }
    }

    #[must_use]
    pub const fn division(self) -> FsDivision {
        match self {
            Self::CfsBs | Self::CfsIs | Self::CfsCis => FsDivision::Cfs,
            Self::OfsBs | Self::OfsIs | Self::OfsCis => FsDivision::Ofs,
        }
    }

    #[must_use]
    pub const fn kind(self) -> StatementKind {
        match self {
            Self::CfsBs | Self::OfsBs => StatementKind::Bs,
            Self::CfsIs | Self::OfsIs => StatementKind::Is,
            Self::CfsCis | Self::OfsCis => StatementKind::Cis,
        }
    }
}

/// One line item of a financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// 1-based position among the emitted accounts of the statement.
    pub ord_value: u32,
    /// Cell text exactly as captured, indentation included.
    pub raw_name: String,
    /// Normalized account name.
    pub account_name: String,
    /// Indentation depth; 0 is a root account.
    pub account_level: usize,
    /// Names of the enclosing accounts, root first.
    pub ancestors: Vec<String>,
    /// Amount per fiscal year. Blank or missing cells are zero.
    pub amounts: BTreeMap<i32, Decimal>,
}

/// One financial statement extracted from one disclosure page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTable {
    pub statement_code: StatementCode,
    /// Fiscal years, most recent first.
    pub fiscal_years: [i32; FISCAL_YEAR_COUNT],
    /// Currency/scale label from the `(단위 : …)` row, if one was found.
    pub unit: Option<String>,
    /// Account rows in table order.
    pub accounts: Vec<AccountRecord>,
}

impl StatementTable {
    /// The most recent fiscal year covered by this statement.
    #[must_use]
    pub const fn latest_fiscal_year(&self) -> i32 {
        self.fiscal_years[0]
    }
}

/// Cells of a caption table (the small table naming the statement, its
/// periods and its unit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTable {
    pub rows: Vec<Vec<String>>,
}

impl TitleTable {
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// Cells of a bordered data table holding account rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Header cells from the table head, when the table has one.
    pub header: Option<Vec<String>>,
    /// Body rows. The first cell of each row keeps its raw, untrimmed text.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    #[must_use]
    pub const fn new(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }
}

/// Every table captured from a single disclosure page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTables {
    pub title_tables: Vec<TitleTable>,
    pub data_tables: Vec<DataTable>,
    /// Normalized paragraph captions naming concrete statements, in page
    /// order and without duplicates.
    #[serde(default)]
    pub captions: Vec<String>,
}

/// Filing-level metadata supplied alongside a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingContext {
    /// Company identifier (stock code or registry code).
    pub company_identifier: String,
    /// Reception number of the filing (`rcpNo`).
    pub reception_id: String,
    /// Business year the filing reports on, when known.
    pub reporting_year: Option<i32>,
}

/// Upsert key used by persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementKey {
    pub company_identifier: String,
    pub fiscal_year: i32,
    pub filing_reception_id: String,
    pub statement_code: StatementCode,
}

impl StatementKey {
    /// Builds the key for `statement` extracted from the filing described by
    /// `filing`.
    #[must_use]
    pub fn new(filing: &FilingContext, statement: &StatementTable) -> Self {
        Self {
            company_identifier: filing.company_identifier.clone(),
            fiscal_year: statement.latest_fiscal_year(),
            filing_reception_id: filing.reception_id.clone(),
            statement_code: statement.statement_code,
        }
    }
}
