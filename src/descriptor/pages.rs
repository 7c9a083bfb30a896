//! Named page routes of a resource.

use serde::Serialize;
use utoipa::ToSchema;

/// Route map consumed by the external router: which paths the resource's
/// list, create, edit and view pages live at. `{id}` marks the record id
/// segment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMap {
    pub index: &'static str,
    pub create: &'static str,
    pub edit: &'static str,
    pub view: &'static str,
}

impl PageMap {
    #[must_use]
    pub const fn new(
        index: &'static str,
        create: &'static str,
        edit: &'static str,
        view: &'static str,
    ) -> Self {
        Self {
            index,
            create,
            edit,
            view,
        }
    }
}
