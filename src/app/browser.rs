//! Database selector and schema tree state

use crate::api::SchemaMap;

/// Selectable databases, one of which is active
#[derive(Clone, Debug, Default)]
pub struct DatabaseSelector {
    databases: Vec<String>,
    selected: Option<usize>,
}

impl DatabaseSelector {
    /// Replace the list, selecting `default` if listed, otherwise the first entry
    pub fn populate(&mut self, databases: Vec<String>, default: &str) {
        self.selected = databases
            .iter()
            .position(|d| d == default)
            .or(if databases.is_empty() { None } else { Some(0) });
        self.databases = databases;
    }

    pub fn databases(&self) -> &[String] {
        &self.databases
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.databases.get(i))
            .map(String::as_str)
    }

    /// Select by index. Returns true if the active database changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.databases.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Index of the next entry, wrapping around
    pub fn next_index(&self) -> Option<usize> {
        let len = self.databases.len();
        if len == 0 {
            return None;
        }
        Some(self.selected.map_or(0, |i| (i + 1) % len))
    }

    /// Index of the previous entry, wrapping around
    pub fn prev_index(&self) -> Option<usize> {
        let len = self.databases.len();
        if len == 0 {
            return None;
        }
        Some(self.selected.map_or(0, |i| if i == 0 { len - 1 } else { i - 1 }))
    }
}

/// One table in the schema tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaTable {
    pub name: String,
    pub columns: Vec<String>,
    pub expanded: bool,
}

/// Content of the schema panel. Every load replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaPanel {
    Loading,
    Failed,
    Loaded(Vec<SchemaTable>),
}

/// A visible line of the schema tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaLine<'a> {
    Table { index: usize, table: &'a SchemaTable },
    Column { table: usize, name: &'a str },
}

impl SchemaPanel {
    /// Build a collapsed tree from a freshly loaded schema
    pub fn from_schema(schema: SchemaMap) -> Self {
        SchemaPanel::Loaded(
            schema
                .tables
                .into_iter()
                .map(|t| SchemaTable {
                    name: t.name,
                    columns: t.columns,
                    expanded: false,
                })
                .collect(),
        )
    }

    pub fn tables(&self) -> &[SchemaTable] {
        match self {
            SchemaPanel::Loaded(tables) => tables,
            _ => &[],
        }
    }

    /// Flip one table between expanded and collapsed. Other tables are untouched.
    pub fn toggle(&mut self, index: usize) -> bool {
        if let SchemaPanel::Loaded(tables) = self {
            if let Some(table) = tables.get_mut(index) {
                table.expanded = !table.expanded;
                return true;
            }
        }
        false
    }

    /// Flattened tree for display: table headers, plus columns of expanded tables
    pub fn visible_lines(&self) -> Vec<SchemaLine<'_>> {
        let mut lines = Vec::new();
        for (index, table) in self.tables().iter().enumerate() {
            lines.push(SchemaLine::Table { index, table });
            if table.expanded {
                lines.extend(table.columns.iter().map(|name| SchemaLine::Column {
                    table: index,
                    name: name.as_str(),
                }));
            }
        }
        lines
    }

    /// Table owning the visible line at `line`
    pub fn table_at_line(&self, line: usize) -> Option<usize> {
        self.visible_lines().get(line).map(|l| match l {
            SchemaLine::Table { index, .. } => *index,
            SchemaLine::Column { table, .. } => *table,
        })
    }

    /// Visible line index of a table header
    pub fn line_of_table(&self, table: usize) -> Option<usize> {
        self.visible_lines()
            .iter()
            .position(|l| matches!(l, SchemaLine::Table { index, .. } if *index == table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TableSchema;

    fn panel() -> SchemaPanel {
        SchemaPanel::from_schema(SchemaMap {
            tables: vec![
                TableSchema {
                    name: "orders".into(),
                    columns: vec!["id".into(), "total".into()],
                },
                TableSchema {
                    name: "customers".into(),
                    columns: vec!["id".into(), "name".into(), "email".into()],
                },
            ],
        })
    }

    #[test]
    fn test_populate_prefers_default() {
        let mut selector = DatabaseSelector::default();
        selector.populate(vec!["sales".into(), "engdb".into()], "engdb");
        assert_eq!(selector.selected_name(), Some("engdb"));

        selector.populate(vec!["sales".into(), "hr".into()], "engdb");
        assert_eq!(selector.selected_name(), Some("sales"));

        selector.populate(Vec::new(), "engdb");
        assert_eq!(selector.selected_name(), None);
        assert_eq!(selector.next_index(), None);
    }

    #[test]
    fn test_select_reports_change() {
        let mut selector = DatabaseSelector::default();
        selector.populate(vec!["a".into(), "b".into()], "a");
        assert!(!selector.select(0));
        assert!(selector.select(1));
        assert!(!selector.select(5));
        assert_eq!(selector.next_index(), Some(0));
        assert_eq!(selector.prev_index(), Some(0));
    }

    #[test]
    fn test_tables_start_collapsed() {
        let panel = panel();
        assert!(panel.tables().iter().all(|t| !t.expanded));
        assert_eq!(panel.visible_lines().len(), 2);
    }

    #[test]
    fn test_toggle_twice_collapses() {
        let mut panel = panel();
        panel.toggle(0);
        assert!(panel.tables()[0].expanded);
        panel.toggle(0);
        assert!(!panel.tables()[0].expanded);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut panel = panel();
        panel.toggle(0);
        panel.toggle(1);
        assert!(panel.tables()[0].expanded);
        assert!(panel.tables()[1].expanded);
        assert_eq!(panel.visible_lines().len(), 2 + 2 + 3);
    }

    #[test]
    fn test_line_lookup_through_columns() {
        let mut panel = panel();
        panel.toggle(0);
        // orders, id, total, customers
        assert_eq!(panel.table_at_line(2), Some(0));
        assert_eq!(panel.table_at_line(3), Some(1));
        assert_eq!(panel.line_of_table(1), Some(3));
        assert_eq!(panel.table_at_line(9), None);
    }

    #[test]
    fn test_toggle_outside_loaded_is_noop() {
        let mut panel = SchemaPanel::Loading;
        assert!(!panel.toggle(0));
        assert!(panel.visible_lines().is_empty());
    }
}
