use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, SimpleExpr},
};
use std::collections::HashMap;
use uuid::Uuid;

// Basic safety limits
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// How a declared filter translates its input into a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Plain equality on the column (strings compared case-insensitively).
    Equals,
    /// Inclusive date range via `<name>_gte` / `<name>_lte` keys; each bound
    /// is optional and an absent bound is a no-op.
    DateRange,
    /// Membership test (`IN`) over the chosen values, OR semantics.
    Select,
    /// Tri-state flag: `true` / `false` constrain, an absent key means any.
    Ternary,
    /// Column nullability: `true` means the value is present.
    Existence,
}

/// Binds a filter name from the query string to an entity column.
#[derive(Debug, Clone, Copy)]
pub struct FilterBinding<C> {
    pub name: &'static str,
    pub column: C,
    pub kind: FilterKind,
}

impl<C> FilterBinding<C> {
    pub const fn new(name: &'static str, column: C, kind: FilterKind) -> Self {
        Self { name, column, kind }
    }
}

fn is_valid_field_name(field_name: &str) -> bool {
    !field_name.is_empty()
        && field_name.len() <= 100
        && !field_name.starts_with('_')
        && !field_name.contains("..")
}

const fn validate_field_value(value: &str) -> bool {
    value.len() <= MAX_FIELD_VALUE_LENGTH
}

fn parse_filter_json(filter_str: Option<&str>) -> HashMap<String, serde_json::Value> {
    filter_str.map_or_else(HashMap::new, |filter| match serde_json::from_str(filter) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed filter JSON");
            HashMap::new()
        }
    })
}

fn parse_date(value: &serde_json::Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    if !validate_field_value(raw) {
        return None;
    }
    // Accept a bare date or a datetime prefix like "2024-01-31T00:00:00"
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Inclusive lower/upper bound on a date column; an absent bound contributes
/// nothing, so a range with both bounds absent leaves the query unchanged.
pub fn date_range_exprs<C>(column: C, after: Option<NaiveDate>, until: Option<NaiveDate>) -> Vec<SimpleExpr>
where
    C: ColumnTrait,
{
    let mut exprs = Vec::new();
    if let Some(after) = after {
        exprs.push(column.gte(after));
    }
    if let Some(until) = until {
        exprs.push(column.lte(until));
    }
    exprs
}

/// Membership over the chosen discrete values; empty selections are a no-op.
pub fn select_expr<C>(column: C, values: &[String]) -> Option<SimpleExpr>
where
    C: ColumnTrait,
{
    if values.is_empty() {
        return None;
    }
    Some(column.is_in(values.iter().cloned()))
}

/// Tri-state flag filter; `None` means "any" and contributes nothing.
pub fn ternary_expr<C>(column: C, value: Option<bool>) -> Option<SimpleExpr>
where
    C: ColumnTrait,
{
    value.map(|flag| column.eq(flag))
}

/// Nullability predicate: `present` selects rows where the column holds a
/// value.
pub fn existence_expr<C>(column: C, present: bool) -> SimpleExpr
where
    C: ColumnTrait,
{
    if present { column.is_not_null() } else { column.is_null() }
}

fn equals_expr<C>(column: C, value: &serde_json::Value) -> Option<SimpleExpr>
where
    C: ColumnTrait + Copy,
{
    match value {
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() || !validate_field_value(trimmed) {
                return None;
            }
            if let Ok(uuid_value) = Uuid::parse_str(trimmed) {
                return Some(column.eq(uuid_value));
            }
            Some(
                SimpleExpr::FunctionCall(Func::upper(Expr::col(column)))
                    .eq(trimmed.to_uppercase()),
            )
        }
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(|int_value| column.eq(int_value))
            .or_else(|| number.as_f64().map(|float_value| column.eq(float_value))),
        serde_json::Value::Bool(flag) => Some(column.eq(*flag)),
        serde_json::Value::Null => Some(column.is_null()),
        _ => None,
    }
}

fn select_values(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        serde_json::Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn search_condition<C>(query: &str, searchable_columns: &[(&'static str, C)]) -> Option<Condition>
where
    C: ColumnTrait + Copy,
{
    let trimmed = query.trim();
    if trimmed.is_empty() || !validate_field_value(trimmed) || searchable_columns.is_empty() {
        return None;
    }
    let mut or_conditions = Condition::any();
    for (_, column) in searchable_columns {
        or_conditions = or_conditions.add(
            SimpleExpr::FunctionCall(Func::upper(Expr::col(*column)))
                .like(format!("%{}%", trimmed.to_uppercase())),
        );
    }
    Some(or_conditions)
}

/// Build the listing condition from the JSON `filter` parameter.
///
/// Declared bindings translate their keys into predicates, all conjoined;
/// the `q` key produces a case-insensitive substring search over the
/// searchable columns. Everything unknown is skipped.
pub fn apply_filters<C>(
    filter_str: Option<&str>,
    bindings: &[FilterBinding<C>],
    searchable_columns: &[(&'static str, C)],
) -> Condition
where
    C: ColumnTrait + Copy,
{
    let filters = parse_filter_json(filter_str);
    let mut condition = Condition::all();

    if let Some(q_value) = filters.get("q").and_then(|v| v.as_str())
        && let Some(search) = search_condition(q_value, searchable_columns)
    {
        condition = condition.add(search);
    }

    for binding in bindings {
        match binding.kind {
            FilterKind::Equals => {
                if let Some(value) = filters.get(binding.name)
                    && is_valid_field_name(binding.name)
                    && let Some(expr) = equals_expr(binding.column, value)
                {
                    condition = condition.add(expr);
                }
            }
            FilterKind::DateRange => {
                let after = filters
                    .get(&format!("{}_gte", binding.name))
                    .and_then(parse_date);
                let until = filters
                    .get(&format!("{}_lte", binding.name))
                    .and_then(parse_date);
                for expr in date_range_exprs(binding.column, after, until) {
                    condition = condition.add(expr);
                }
            }
            FilterKind::Select => {
                if let Some(value) = filters.get(binding.name) {
                    let values = select_values(value);
                    if let Some(expr) = select_expr(binding.column, &values) {
                        condition = condition.add(expr);
                    }
                }
            }
            FilterKind::Ternary => {
                let flag = filters.get(binding.name).and_then(serde_json::Value::as_bool);
                if let Some(expr) = ternary_expr(binding.column, flag) {
                    condition = condition.add(expr);
                }
            }
            FilterKind::Existence => {
                if let Some(flag) = filters.get(binding.name).and_then(serde_json::Value::as_bool) {
                    condition = condition.add(existence_expr(binding.column, flag));
                }
            }
        }
    }

    condition
}
