use sea_orm::{ColumnTrait, sea_query::Order};

use crate::models::ListParams;

const DEFAULT_SORT_ORDER: &str = "ASC";

/// Parse sort column and order from the JSON pair format `["col", "ASC"]`.
fn parse_json_sort(json: &str, default_column: &str) -> (String, String) {
    let sort_vec: Vec<String> = serde_json::from_str(json).unwrap_or_default();
    (
        sort_vec
            .first()
            .cloned()
            .unwrap_or_else(|| default_column.to_string()),
        sort_vec
            .get(1)
            .cloned()
            .unwrap_or_else(|| DEFAULT_SORT_ORDER.to_string()),
    )
}

fn parse_order(sort_order: &str) -> Order {
    if sort_order.eq_ignore_ascii_case("ASC") {
        Order::Asc
    } else {
        Order::Desc
    }
}

fn find_column<C>(column_name: &str, columns: &[(&str, C)], default: C) -> C
where
    C: ColumnTrait + Copy,
{
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == column_name)
        .map_or(default, |&(_, col)| col)
}

/// Resolve the sort column and direction from [`ListParams`], supporting both
/// the JSON-pair and the `sort_by`/`order` formats. Unknown columns fall back
/// to the resource default.
pub fn parse_sorting<C>(
    params: &ListParams,
    sortable_columns: &[(&str, C)],
    default_column_name: &str,
    default_column: C,
) -> (C, Order)
where
    C: ColumnTrait + Copy,
{
    let (sort_column, sort_order) = if let Some(sort_by) = &params.sort_by {
        (
            sort_by.clone(),
            params
                .order
                .as_deref()
                .unwrap_or(DEFAULT_SORT_ORDER)
                .to_string(),
        )
    } else if let Some(sort) = &params.sort {
        if sort.starts_with('[') {
            parse_json_sort(sort, default_column_name)
        } else {
            (
                sort.clone(),
                params
                    .order
                    .as_deref()
                    .unwrap_or(DEFAULT_SORT_ORDER)
                    .to_string(),
            )
        }
    } else {
        (default_column_name.to_string(), DEFAULT_SORT_ORDER.to_string())
    };

    let order_direction = parse_order(&sort_order);
    let order_column = find_column(&sort_column, sortable_columns, default_column);

    (order_column, order_direction)
}
