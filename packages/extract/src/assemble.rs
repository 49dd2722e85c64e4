//! Statement assembly.
//!
//! Pairs the Nth accepted caption table with the Nth accepted data table,
//! then builds one [`StatementTable`] per pair. Every table, pair and row is
//! processed in isolation: a failure skips only that unit, is logged, and is
//! recorded in the [`ExtractionReport`].

use std::collections::BTreeMap;

use dart_fs_statement_models::{
    AccountRecord, DataTable, FISCAL_YEAR_COUNT, FilingContext, PageTables, StatementCode,
    StatementTable, TitleTable,
};
use rust_decimal::Decimal;

use crate::ExtractError;
use crate::amounts::{derive_years, extract_amounts};
use crate::config::ExtractionConfig;
use crate::hierarchy::{HEADER_ROW_NAME, HierarchyBuilder, HierarchyEntry};
use crate::normalize::normalize;
use crate::resolve::resolve_code;
use crate::title::{self, period_years};
use crate::validate::{DataLayout, check_data_table, check_title_table};

/// What a [`SkipRecord`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipScope {
    /// The whole page (pairing shortfall).
    Page,
    /// The caption table at this index in the input.
    TitleTable(usize),
    /// The data table at this index in the input.
    DataTable(usize),
    /// The Nth pair of accepted tables.
    Pair(usize),
    /// A row of the Nth pair's data table.
    Row {
        /// Pair index.
        pair: usize,
        /// Row index within [`DataTable::rows`].
        row: usize,
    },
}

/// One thing left out of the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub scope: SkipScope,
    pub reason: ExtractError,
}

/// Diagnostics for one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Everything skipped, in the order it was encountered.
    pub skipped: Vec<SkipRecord>,
    /// Number of emitted statements per statement code.
    pub collected: BTreeMap<StatementCode, usize>,
}

impl ExtractionReport {
    fn skip(&mut self, scope: SkipScope, reason: ExtractError) {
        self.skipped.push(SkipRecord { scope, reason });
    }

    /// Skips recorded at table or pair scope (rows excluded).
    pub fn skipped_tables(&self) -> impl Iterator<Item = &SkipRecord> {
        self.skipped
            .iter()
            .filter(|record| !matches!(record.scope, SkipScope::Row { .. }))
    }
}

/// The extraction engine, configured once and reused across pages.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    #[must_use]
    pub const fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts every statement on `page`.
    #[must_use]
    pub fn extract(&self, page: &PageTables, filing: &FilingContext) -> Vec<StatementTable> {
        self.extract_with_report(page, filing).0
    }

    /// Extracts every statement on `page`, along with what was skipped.
    #[must_use]
    pub fn extract_with_report(
        &self,
        page: &PageTables,
        filing: &FilingContext,
    ) -> (Vec<StatementTable>, ExtractionReport) {
        self.assemble_tables(&page.title_tables, &page.data_tables, &page.captions, filing)
    }

    fn assemble_tables(
        &self,
        title_tables: &[TitleTable],
        data_tables: &[DataTable],
        captions: &[String],
        filing: &FilingContext,
    ) -> (Vec<StatementTable>, ExtractionReport) {
        let mut report = ExtractionReport::default();

        let mut titles = Vec::new();
        for (index, table) in title_tables.iter().enumerate() {
            match check_title_table(table, self.config.min_title_rows) {
                Ok(()) => titles.push(table),
                Err(e) => {
                    log::debug!("Skipping title table {index}: {e}");
                    report.skip(SkipScope::TitleTable(index), e);
                }
            }
        }

        let mut datas = Vec::new();
        for (index, table) in data_tables.iter().enumerate() {
            match check_data_table(table) {
                Ok(layout) => datas.push((table, layout)),
                Err(e) => {
                    log::debug!("Skipping data table {index}: {e}");
                    report.skip(SkipScope::DataTable(index), e);
                }
            }
        }

        if titles.len() != datas.len() {
            let shortfall = ExtractError::PairingShortfall {
                title_tables: titles.len(),
                data_tables: datas.len(),
            };
            log::info!("{shortfall}; pairing the first {}", titles.len().min(datas.len()));
            report.skip(SkipScope::Page, shortfall);
        }

        let mut statements = Vec::new();
        for (pair, (&title_table, (data_table, layout))) in titles.iter().zip(&datas).enumerate() {
            let fallback_caption = if self.config.caption_fallback {
                captions.get(pair).map(String::as_str)
            } else {
                None
            };

            match self.build_statement(
                pair,
                (title_table, *data_table, layout),
                fallback_caption,
                filing,
                &mut report,
            ) {
                Ok(statement) => {
                    log::debug!(
                        "Pair {pair}: {} with {} accounts",
                        statement.statement_code,
                        statement.accounts.len()
                    );
                    *report.collected.entry(statement.statement_code).or_default() += 1;
                    statements.push(statement);
                }
                Err(e) => {
                    log::warn!("Skipping pair {pair}: {e}");
                    report.skip(SkipScope::Pair(pair), e);
                }
            }
        }

        log::info!(
            "Extracted {} statements ({} skipped)",
            statements.len(),
            report.skipped.len()
        );

        (statements, report)
    }

    fn build_statement(
        &self,
        pair: usize,
        (title_table, data_table, layout): (&TitleTable, &DataTable, &DataLayout),
        fallback_caption: Option<&str>,
        filing: &FilingContext,
        report: &mut ExtractionReport,
    ) -> Result<StatementTable, ExtractError> {
        let statement_code = resolve_statement_code(title_table, fallback_caption)?;
        let fiscal_years = resolve_fiscal_years(title_table, layout, filing)?;
        let unit = title::unit(title_table).or_else(|| self.config.unknown_unit.clone());
        let accounts = build_accounts(pair, data_table, layout, &fiscal_years, report);

        Ok(StatementTable {
            statement_code,
            fiscal_years,
            unit,
            accounts,
        })
    }
}

fn resolve_statement_code(
    title_table: &TitleTable,
    fallback_caption: Option<&str>,
) -> Result<StatementCode, ExtractError> {
    let caption = title::caption(title_table);
    if let Some(code) = caption.as_deref().and_then(resolve_code) {
        return Ok(code);
    }

    if let Some(code) = fallback_caption.and_then(resolve_code) {
        log::debug!("Caption {caption:?} names no statement, using paragraph caption");
        return Ok(code);
    }

    Err(ExtractError::ClassificationMiss(caption.map_or_else(
        || "title table has no target caption".to_owned(),
        |caption| format!("caption {caption:?} names no single statement"),
    )))
}

/// Header years win over caption-table years, which win over years derived
/// from the filing's reporting year.
fn resolve_fiscal_years(
    title_table: &TitleTable,
    layout: &DataLayout,
    filing: &FilingContext,
) -> Result<[i32; FISCAL_YEAR_COUNT], ExtractError> {
    period_years(layout.period_cells().iter().map(String::as_str))
        .or_else(|| title::fiscal_years(title_table))
        .or_else(|| filing.reporting_year.map(derive_years))
        .ok_or_else(|| {
            ExtractError::MissingFiscalYears(
                "no dated periods and no reporting year".to_owned(),
            )
        })
}

fn build_accounts(
    pair: usize,
    data_table: &DataTable,
    layout: &DataLayout,
    years: &[i32; FISCAL_YEAR_COUNT],
    report: &mut ExtractionReport,
) -> Vec<AccountRecord> {
    let amount_skip = layout.notes_column.and_then(|column| column.checked_sub(1));
    let mut builder = HierarchyBuilder::new();
    let mut accounts = Vec::new();
    let mut ord_value: u32 = 0;

    for (row_index, row) in data_table.rows.iter().enumerate().skip(layout.body_start) {
        match build_row(&mut builder, row, years, amount_skip) {
            Ok(Some((entry, amounts))) => {
                ord_value += 1;
                accounts.push(AccountRecord {
                    ord_value,
                    raw_name: row[0].clone(),
                    account_name: entry.name,
                    account_level: entry.level,
                    ancestors: entry.ancestors,
                    amounts,
                });
            }
            Ok(None) => log::trace!("Pair {pair} row {row_index}: repeated header"),
            Err(e) => {
                log::debug!("Pair {pair} row {row_index}: {e}");
                report.skip(
                    SkipScope::Row {
                        pair,
                        row: row_index,
                    },
                    e,
                );
            }
        }
    }

    accounts
}

/// Builds one account row. Returns `Ok(None)` for repeated header rows.
///
/// Amounts are parsed before the row enters the hierarchy, so a rejected row
/// never becomes an ancestor.
fn build_row(
    builder: &mut HierarchyBuilder,
    row: &[String],
    years: &[i32; FISCAL_YEAR_COUNT],
    amount_skip: Option<usize>,
) -> Result<Option<(HierarchyEntry, BTreeMap<i32, Decimal>)>, ExtractError> {
    if row.len() < 2 {
        return Err(ExtractError::RowParse(format!(
            "row has {} cells, expected an account cell and amounts",
            row.len()
        )));
    }

    let name = normalize(&row[0]);
    if name.is_empty() {
        return Err(ExtractError::RowParse(format!(
            "account cell {:?} is empty after normalization",
            row[0]
        )));
    }
    if name == HEADER_ROW_NAME {
        return Ok(None);
    }

    let amounts = extract_amounts(&row[1..], years, amount_skip)?;

    Ok(builder.push(&row[0]).map(|entry| (entry, amounts)))
}

/// Assembles statements from caption tables and data tables with the default
/// configuration and no filing metadata.
#[must_use]
pub fn assemble(title_tables: &[TitleTable], data_tables: &[DataTable]) -> Vec<StatementTable> {
    assemble_with_report(title_tables, data_tables).0
}

/// Like [`assemble`], also returning what was skipped.
#[must_use]
pub fn assemble_with_report(
    title_tables: &[TitleTable],
    data_tables: &[DataTable],
) -> (Vec<StatementTable>, ExtractionReport) {
    Extractor::default().assemble_tables(title_tables, data_tables, &[], &FilingContext::default())
}
