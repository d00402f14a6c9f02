//! API-side role gate.
//!
//! Every handler checks its permission here before touching the store or the
//! generation service.

use shopdesk_auth::{authorize, AuthzError, Permission};

use crate::context::PrincipalContext;

pub fn authorize_request(principal: &PrincipalContext, required: &Permission) -> Result<(), AuthzError> {
    authorize(principal.principal(), required)
}
