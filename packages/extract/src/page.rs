//! Disclosure page HTML adapter.
//!
//! Splits an already-fetched page into caption tables (`table.nb`), data
//! tables (`table[border="1"]`) and paragraph captions, producing the
//! [`PageTables`] the assembler consumes. No fetching happens here.

use dart_fs_statement_models::{DataTable, PageTables, TitleTable};
use scraper::{ElementRef, Html, Selector};

use crate::normalize::normalize;
use crate::resolve::is_statement_caption;

/// Errors that can occur while preparing the page parser.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A CSS selector failed to parse.
    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector {
        /// The offending selector.
        selector: String,
        /// Parser message.
        message: String,
    },
}

/// Compiled selectors for disclosure pages.
#[derive(Debug)]
pub struct PageParser {
    title_table: Selector,
    data_table: Selector,
    head_row: Selector,
    head_cell: Selector,
    body_row: Selector,
    body_cell: Selector,
    paragraph: Selector,
}

impl PageParser {
    /// Compiles the selectors.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Selector`] if a selector fails to parse.
    pub fn new() -> Result<Self, PageError> {
        Ok(Self {
            title_table: parse_selector("table.nb")?,
            data_table: parse_selector(r#"table[border="1"]"#)?,
            head_row: parse_selector("thead tr")?,
            head_cell: parse_selector("th, td")?,
            body_row: parse_selector("tbody tr")?,
            body_cell: parse_selector("td")?,
            paragraph: parse_selector("p")?,
        })
    }

    /// Splits `html` into its caption tables, data tables and paragraph
    /// captions, in document order.
    #[must_use]
    pub fn parse(&self, html: &str) -> PageTables {
        let document = Html::parse_document(html);

        let title_tables: Vec<TitleTable> = document
            .select(&self.title_table)
            .map(|table| TitleTable::new(self.body_rows(table, false)))
            .collect();

        let data_tables: Vec<DataTable> = document
            .select(&self.data_table)
            .map(|table| DataTable::new(self.header(table), self.body_rows(table, true)))
            .collect();

        let mut captions: Vec<String> = Vec::new();
        for paragraph in document.select(&self.paragraph) {
            let caption = normalize(&element_text(paragraph));
            if is_statement_caption(&caption) && !captions.contains(&caption) {
                captions.push(caption);
            }
        }

        log::debug!(
            "Page has {} title tables, {} data tables, captions {captions:?}",
            title_tables.len(),
            data_tables.len()
        );

        PageTables {
            title_tables,
            data_tables,
            captions,
        }
    }

    /// Header cells from the last `thead` row, trimmed.
    fn header(&self, table: ElementRef<'_>) -> Option<Vec<String>> {
        let row = table.select(&self.head_row).last()?;
        Some(
            row.select(&self.head_cell)
                .map(|cell| element_text(cell).trim().to_owned())
                .collect(),
        )
    }

    /// Body rows. With `keep_indent`, the first cell keeps its leading
    /// whitespace (preferring the text of an inner `<p>`).
    fn body_rows(&self, table: ElementRef<'_>, keep_indent: bool) -> Vec<Vec<String>> {
        table
            .select(&self.body_row)
            .map(|row| {
                row.select(&self.body_cell)
                    .enumerate()
                    .map(|(index, cell)| {
                        if keep_indent && index == 0 {
                            self.account_cell_text(cell)
                        } else {
                            element_text(cell).trim().to_owned()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn account_cell_text(&self, cell: ElementRef<'_>) -> String {
        let text = cell
            .select(&self.paragraph)
            .next()
            .map_or_else(|| element_text(cell), element_text);
        text.trim_start_matches(['\r', '\n'])
            .trim_end()
            .to_owned()
    }
}

/// Parses `html` with a freshly compiled [`PageParser`].
///
/// # Errors
///
/// Returns [`PageError::Selector`] if a selector fails to parse.
pub fn parse_page(html: &str) -> Result<PageTables, PageError> {
    Ok(PageParser::new()?.parse(html))
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::Selector {
        selector: selector.to_owned(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
