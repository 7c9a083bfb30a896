//! Declarative resource descriptors.
//!
//! A [`ResourceDescriptor`] is pure configuration: it tells the host UI what
//! form to render, which table columns to show, which filters and actions
//! exist, and where the resource's pages live. Handlers serve it verbatim
//! from the `/schema` route of every resource router; nothing in here touches
//! the database.

pub mod form;
pub mod pages;
pub mod style;
pub mod table;

pub use form::{FieldDef, FormSchema, HiddenDefault, SelectOption, SelectSource, Widget};
pub use pages::PageMap;
pub use style::{BadgeColor, BadgeDomain, BadgeStyle, badge_for};
pub use table::{CellFormat, ColumnDef, SortDir, TableSchema};

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Role;
use crate::filtering::FilterKind;

/// A filter as presented to the UI. The executable side of the same filter is
/// the resource's [`crate::filtering::FilterBinding`] with the matching name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
    /// Choices for select filters; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FilterDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: FilterKind) -> Self {
        Self {
            name,
            label,
            kind,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

/// A record-level or bulk action offered on the listing page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    /// Applies to a selection of records rather than a single row.
    pub bulk: bool,
    /// A precondition check runs before the mutation and may veto it.
    pub guarded: bool,
    /// Confirmation prompt shown before the action runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<&'static str>,
}

impl ActionDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            bulk: false,
            guarded: false,
            confirm: None,
        }
    }

    #[must_use]
    pub const fn bulk(mut self) -> Self {
        self.bulk = true;
        self
    }

    #[must_use]
    pub const fn guarded(mut self) -> Self {
        self.guarded = true;
        self
    }

    #[must_use]
    pub const fn with_confirm(mut self, prompt: &'static str) -> Self {
        self.confirm = Some(prompt);
        self
    }
}

/// The complete declarative binding of one resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceDescriptor {
    pub name_singular: &'static str,
    pub name_plural: &'static str,
    pub description: &'static str,
    /// Read-only resources expose no form and no mutating actions.
    pub read_only: bool,
    /// Role required to see or use the resource; `None` means any
    /// authenticated actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,
    pub pages: PageMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormSchema>,
    pub table: TableSchema,
    pub filters: Vec<FilterDescriptor>,
    pub actions: Vec<ActionDescriptor>,
}
