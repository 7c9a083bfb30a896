//! Table descriptors: listing columns and their display formatting.

use serde::Serialize;
use utoipa::ToSchema;

use super::style::BadgeDomain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    Desc,
}

/// How a cell value is rendered.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum CellFormat {
    Text,
    /// `chrono` format string, e.g. `%d %b %Y`.
    Date { pattern: &'static str },
    DateTime { pattern: &'static str },
    Time,
    /// Amount in the smallest currency unit.
    Money,
    Toggle,
    /// Colored badge keyed by the cell's enum value.
    Badge { domain: BadgeDomain },
    /// Label of a related record.
    Relation {
        resource: &'static str,
        label_field: &'static str,
    },
}

/// One column of a resource listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnDef {
    pub name: &'static str,
    pub label: &'static str,
    pub format: CellFormat,
    pub sortable: bool,
    pub searchable: bool,
}

impl ColumnDef {
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, format: CellFormat) -> Self {
        Self {
            name,
            label,
            format,
            sortable: false,
            searchable: false,
        }
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

/// The listing table of a resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableSchema {
    pub columns: Vec<ColumnDef>,
    /// Column applied when the request specifies no sort.
    pub default_sort_column: &'static str,
    pub default_sort_direction: SortDir,
}

impl TableSchema {
    #[must_use]
    pub fn new(columns: Vec<ColumnDef>, default_sort: (&'static str, SortDir)) -> Self {
        Self {
            columns,
            default_sort_column: default_sort.0,
            default_sort_direction: default_sort.1,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_builders_set_flags() {
        let column = ColumnDef::new("name", "Name", CellFormat::Text)
            .sortable()
            .searchable();
        assert!(column.sortable);
        assert!(column.searchable);
    }

    #[test]
    fn badge_cell_serializes_domain() {
        let column = ColumnDef::new(
            "status",
            "Status",
            CellFormat::Badge {
                domain: BadgeDomain::ProcedureStatus,
            },
        );
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["format"]["format"], "badge");
    }
}
