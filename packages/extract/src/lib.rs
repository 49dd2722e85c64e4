#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Financial statement table extraction and normalization engine.
//!
//! Turns the captured cells of a disclosure page's caption tables and
//! bordered data tables into validated, hierarchically structured,
//! multi-year [`StatementTable`] records.
//!
//! The pipeline is pure and synchronous:
//!
//! 1. [`validate`] accepts or rejects each table by shape
//! 2. [`resolve`] and [`title`] read the statement code, periods and unit
//!    from each accepted caption table
//! 3. [`hierarchy`] and [`amounts`] turn data-table rows into accounts
//! 4. [`assemble`] pairs the Nth accepted caption table with the Nth
//!    accepted data table and isolates failures per table and per row
//!
//! [`page`] adapts raw page HTML into [`PageTables`], [`filing`] reads filing
//! metadata from report titles and URLs, and [`sink`] defines the boundary to
//! persistence collaborators.
//!
//! [`StatementTable`]: dart_fs_statement_models::StatementTable
//! [`PageTables`]: dart_fs_statement_models::PageTables

pub mod amounts;
pub mod assemble;
pub mod config;
pub mod filing;
pub mod hierarchy;
pub mod normalize;
pub mod page;
pub mod resolve;
pub mod sink;
pub mod title;
pub mod validate;

pub use assemble::{
    ExtractionReport, Extractor, SkipRecord, SkipScope, assemble, assemble_with_report,
};
pub use config::{ConfigError, ExtractionConfig, parse_config_toml};

/// Reasons a table, pair or row is left out of the output.
///
/// None of these are fatal: the assembler logs them, records them in the
/// [`ExtractionReport`] and moves on to the next table or row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A table does not have the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    /// A caption is not a target statement, or names no statement kind.
    #[error("Classification miss: {0}")]
    ClassificationMiss(String),

    /// A single row could not be turned into an account.
    #[error("Row parse error: {0}")]
    RowParse(String),

    /// No fiscal years could be determined for a statement.
    #[error("Missing fiscal years: {0}")]
    MissingFiscalYears(String),

    /// Accepted caption tables and data tables differ in count.
    #[error("Pairing shortfall: {title_tables} title tables, {data_tables} data tables")]
    PairingShortfall {
        /// Number of accepted caption tables.
        title_tables: usize,
        /// Number of accepted data tables.
        data_tables: usize,
    },
}
