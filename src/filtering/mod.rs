//! Translation of listing query parameters into Sea-ORM query fragments.
//!
//! Every predicate here is conjoined onto the resource's base listing query;
//! nothing executes SQL directly. Filter input arrives as the JSON-encoded
//! `filter` query parameter ([`crate::models::ListParams`]); unknown keys and
//! malformed values are ignored rather than rejected, so a stale UI never
//! breaks the listing.

pub mod conditions;
pub mod pagination;
pub mod sort;

pub use conditions::{FilterBinding, FilterKind, apply_filters};
pub use pagination::{calculate_content_range, parse_pagination, parse_range};
pub use sort::parse_sorting;
