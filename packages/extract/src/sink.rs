//! Boundary to persistence collaborators.
//!
//! Statements are handed to a [`StatementSink`] keyed by [`StatementKey`], so
//! extracting the same filing twice overwrites instead of duplicating.

use std::collections::BTreeMap;
use std::convert::Infallible;

use dart_fs_statement_models::{FilingContext, StatementKey, StatementTable};

/// A store that upserts statements by [`StatementKey`].
pub trait StatementSink {
    /// Error returned by the underlying store.
    type Error;

    /// Inserts `statement` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    fn upsert(&mut self, key: StatementKey, statement: &StatementTable) -> Result<(), Self::Error>;
}

/// Upserts every statement extracted from `filing` into `sink`, returning the
/// number written.
///
/// # Errors
///
/// Returns the first error reported by `sink`.
pub fn persist_all<S: StatementSink>(
    sink: &mut S,
    filing: &FilingContext,
    statements: &[StatementTable],
) -> Result<usize, S::Error> {
    for statement in statements {
        let key = StatementKey::new(filing, statement);
        log::debug!(
            "Upserting {} {} for {} ({})",
            key.statement_code,
            key.fiscal_year,
            key.company_identifier,
            key.filing_reception_id
        );
        sink.upsert(key, statement)?;
    }
    Ok(statements.len())
}

/// An in-memory [`StatementSink`].
#[derive(Debug, Default)]
pub struct MemorySink {
    statements: BTreeMap<StatementKey, StatementTable>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &StatementKey) -> Option<&StatementTable> {
        self.statements.get(key)
    }
}

impl StatementSink for MemorySink {
    type Error = Infallible;

    fn upsert(&mut self, key: StatementKey, statement: &StatementTable) -> Result<(), Self::Error> {
        self.statements.insert(key, statement.clone());
        Ok(())
    }
}
