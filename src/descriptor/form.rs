//! Form descriptors: editable fields and their widgets.

use serde::Serialize;
use utoipa::ToSchema;

/// One choice of a static select widget or filter.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    #[must_use]
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Where a select widget gets its choices from.
///
/// Relation-backed selects require the related resource to expose a label
/// field (usually `name`); the UI resolves choices through that resource's
/// own listing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SelectSource {
    Static { options: Vec<SelectOption> },
    Relation {
        resource: &'static str,
        label_field: &'static str,
    },
}

/// Server-computed default of a hidden field.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HiddenDefault {
    /// Filled with the acting identity's id (e.g. a creator column).
    CurrentActor,
    /// Filled with the request timestamp.
    Timestamp,
}

/// Editable or display widget bound to a persisted field.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    TextArea {
        rows: u8,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Amount in the smallest currency unit.
    Money,
    Date,
    Time,
    DateTime,
    Toggle,
    Select {
        source: SelectSource,
    },
    /// Not rendered; the server computes the value.
    Hidden {
        default: HiddenDefault,
    },
}

impl Widget {
    #[must_use]
    pub const fn text() -> Self {
        Self::Text { max_length: None }
    }

    #[must_use]
    pub const fn text_with_max(max_length: u32) -> Self {
        Self::Text {
            max_length: Some(max_length),
        }
    }

    #[must_use]
    pub fn select_static(options: Vec<SelectOption>) -> Self {
        Self::Select {
            source: SelectSource::Static { options },
        }
    }

    #[must_use]
    pub const fn select_relation(resource: &'static str, label_field: &'static str) -> Self {
        Self::Select {
            source: SelectSource::Relation {
                resource,
                label_field,
            },
        }
    }
}

/// One field of a resource form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub required: bool,
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

impl FieldDef {
    #[must_use]
    pub const fn required(name: &'static str, label: &'static str, widget: Widget) -> Self {
        Self {
            name,
            label,
            widget,
            required: true,
            read_only: false,
            help: None,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, label: &'static str, widget: Widget) -> Self {
        Self {
            name,
            label,
            widget,
            required: false,
            read_only: false,
            help: None,
        }
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[must_use]
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

/// The editable form of a resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormSchema {
    pub fields: Vec<FieldDef>,
}

impl FormSchema {
    #[must_use]
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_builders_set_flags() {
        let field = FieldDef::required("name", "Name", Widget::text_with_max(150));
        assert!(field.required);
        assert!(!field.read_only);

        let hidden = FieldDef::optional(
            "created_by",
            "Created by",
            Widget::Hidden {
                default: HiddenDefault::CurrentActor,
            },
        )
        .read_only();
        assert!(hidden.read_only);
    }

    #[test]
    fn form_schema_lists_field_names() {
        let form = FormSchema::new(vec![
            FieldDef::required("name", "Name", Widget::text()),
            FieldDef::optional("description", "Description", Widget::TextArea { rows: 3 }),
        ]);
        assert_eq!(form.field_names(), vec!["name", "description"]);
    }

    #[test]
    fn select_serializes_with_source_tag() {
        let widget = Widget::select_relation("employees", "name");
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["widget"], "select");
        assert_eq!(json["source"]["source"], "relation");
        assert_eq!(json["source"]["label_field"], "name");
    }
}
