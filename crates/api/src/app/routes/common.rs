use axum::http::StatusCode;

use shopdesk_auth::Permission;
use shopdesk_core::ItemId;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Gate a handler on `required`, producing the 403 body on denial.
pub fn require(principal: &PrincipalContext, required: &Permission) -> Result<(), axum::response::Response> {
    crate::authz::authorize_request(principal, required).map_err(errors::forbidden)
}

pub fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<ItemId>()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"))
}
