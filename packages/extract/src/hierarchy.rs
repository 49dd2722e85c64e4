//! Account hierarchy reconstruction from indentation.
//!
//! Data tables express parent/child relationships only through leading
//! whitespace on the account cell. [`HierarchyBuilder`] walks the rows of one
//! table in document order and remembers the most recent account seen at
//! each indentation level.

use std::collections::BTreeMap;

use crate::normalize::{leading_whitespace, normalize, widen_spaces};

/// Normalized text of a repeated header row.
pub const HEADER_ROW_NAME: &str = "과목";

/// Position of one account row in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyEntry {
    /// Indentation depth (leading whitespace count).
    pub level: usize,
    /// Names of the enclosing accounts, root first.
    pub ancestors: Vec<String>,
    /// Normalized account name.
    pub name: String,
}

/// Level-to-name map for a single table scan.
///
/// Create one per data table; it is never shared across tables.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    levels: BTreeMap<usize, String>,
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the next row's raw account cell in the hierarchy.
    ///
    /// Full-width spaces count as indentation. A level keeps its name until
    /// another row at that exact level replaces it. Returns `None` for
    /// repeated `과목` header rows, which leave the map untouched.
    pub fn push(&mut self, raw: &str) -> Option<HierarchyEntry> {
        let widened = widen_spaces(raw);
        let level = leading_whitespace(&widened);
        let name = normalize(&widened);

        if name == HEADER_ROW_NAME {
            return None;
        }

        let ancestors = self.levels.range(..level).map(|(_, n)| n.clone()).collect();
        self.levels.insert(level, name.clone());

        Some(HierarchyEntry {
            level,
            ancestors,
            name,
        })
    }
}
