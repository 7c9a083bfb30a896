use axum::http::header::HeaderMap;

use crate::models::ListParams;

/// Strip control characters so the resource name is safe in an HTTP header.
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Parse the `[start, end]` range parameter, falling back to the first page.
#[must_use]
pub fn parse_range(range_str: Option<&str>) -> (u64, u64) {
    range_str.map_or((0, 24), |r| {
        serde_json::from_str::<[u64; 2]>(r)
            .map(|range| (range[0], range[1]))
            .unwrap_or((0, 24))
    })
}

/// Resolve `(offset, limit)` from either pagination format.
#[must_use]
pub fn parse_pagination(params: &ListParams) -> (u64, u64) {
    if let (Some(page), Some(per_page)) = (params.page, params.per_page) {
        let offset = page.saturating_sub(1) * per_page;
        (offset, per_page)
    } else if let Some(range) = params.range.as_deref() {
        let (start, end) = parse_range(Some(range));
        let limit = end.saturating_sub(start) + 1;
        (start, limit)
    } else {
        (0, 25)
    }
}

/// Build the `Content-Range` header for a listing response.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    limit: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let max_offset_limit = (offset + limit.saturating_sub(1)).min(total_count);
    let safe_name = sanitize_resource_name(resource_name);
    let content_range = format!("{safe_name} {offset}-{max_offset_limit}/{total_count}");

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert("Content-Range", value);
    } else {
        headers.insert(
            "Content-Range",
            format!("items {offset}-{max_offset_limit}/{total_count}")
                .parse()
                .unwrap_or_else(|_| "items 0-0/0".parse().unwrap()),
        );
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_normal() {
        let headers = calculate_content_range(0, 25, 100, "patients");
        let value = headers.get("Content-Range").unwrap().to_str().unwrap();
        assert_eq!(value, "patients 0-24/100");
    }

    #[test]
    fn content_range_sanitizes_header_injection() {
        let headers = calculate_content_range(0, 10, 100, "patients\r\nInjected: evil");
        let value = headers.get("Content-Range").expect("header present");
        let val_str = value.to_str().unwrap_or("");
        assert!(!val_str.contains('\r'));
        assert!(!val_str.contains('\n'));
    }

    #[test]
    fn range_parameter_parsing() {
        assert_eq!(parse_range(Some("[0,9]")), (0, 9));
        assert_eq!(parse_range(Some("garbage")), (0, 24));
        assert_eq!(parse_range(None), (0, 24));
    }

    #[test]
    fn page_based_pagination() {
        let params = ListParams {
            page: Some(3),
            per_page: Some(10),
            ..Default::default()
        };
        assert_eq!(parse_pagination(&params), (20, 10));
    }

    #[test]
    fn range_based_pagination() {
        let params = ListParams {
            range: Some("[25,49]".to_string()),
            ..Default::default()
        };
        assert_eq!(parse_pagination(&params), (25, 25));
    }

    #[test]
    fn default_pagination() {
        assert_eq!(parse_pagination(&ListParams::default()), (0, 25));
    }
}
