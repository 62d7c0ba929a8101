use pinboard_types::api::Claims;
use pinboard_types::models::Action;
use tracing::warn;

use crate::error::ApiError;

/// Check the role carried by a verified token against what `action` needs.
/// The role is trusted as of token issuance.
pub fn authorize(claims: &Claims, action: Action) -> Result<(), ApiError> {
    if claims.role.allows(action) {
        return Ok(());
    }

    warn!(
        "Permission denied: user {} ({}) attempted {:?}",
        claims.id, claims.role, action
    );
    Err(ApiError::Forbidden(match action {
        Action::PostMessage => "Permission denied. Admin role required.",
        Action::ReadMessages => "Permission denied",
    }))
}
