use std::collections::HashSet;

/// Include/exclude lists deciding which tables are visible to the planner.
///
/// The lists are not combined: a non-empty exclude list wins and the include
/// list is ignored entirely. Only when the exclude list is empty does a
/// non-empty include list restrict the selection. Both empty selects every
/// table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelection {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl TableSelection {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Selects every table.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn selects_all(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn is_selected(&self, table: &str) -> bool {
        if self.selects_all() {
            return true;
        }
        if !self.exclude.is_empty() {
            return !self.exclude.contains(table);
        }
        self.include.contains(table)
    }
}
