use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing pages: filtering, pagination, and sorting.
///
/// # Filtering
/// The `filter` parameter is a JSON-encoded object. Supported keys depend on
/// the resource's declared filter set:
/// - Free text search: `{"q": "sari"}`
/// - Select filters: `{"status": ["scheduled", "completed"]}` (OR semantics)
/// - Date ranges: `{"performed_at_gte": "2024-01-01", "performed_at_lte": "2024-01-31"}`
///   (either bound may be omitted)
/// - Ternary flags: `{"active": true}`; omit the key for "any"
/// - Existence checks: `{"has_allocation": false}`
///
/// Unknown keys and malformed values are ignored rather than rejected.
///
/// # Pagination
/// Either `range=[0,24]` or `page=1&per_page=25`.
///
/// # Sorting
/// Either `sort=["name","ASC"]` or `sort_by=name&order=ASC`.
#[derive(Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON-encoded filter object, e.g. `{"q": "sari", "active": true}`.
    #[param(example = json!({"q": "sari", "status": ["scheduled"]}))]
    pub filter: Option<String>,
    /// Row range for pagination in the format `[start, end]` (inclusive).
    #[param(example = "[0,24]")]
    pub range: Option<String>,
    /// Page number for page-based pagination (1-based).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page for page-based pagination.
    #[param(example = 25)]
    pub per_page: Option<u64>,
    /// Sort as a JSON pair `["column", "ASC"|"DESC"]`, or a bare column name.
    #[param(example = r#"["name", "ASC"]"#)]
    pub sort: Option<String>,
    /// Sort column, used together with `order`.
    #[param(example = "name")]
    pub sort_by: Option<String>,
    /// Sort direction, `ASC` or `DESC`.
    #[param(example = "ASC")]
    pub order: Option<String>,
}
