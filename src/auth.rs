//! Session resolution boundary.
//!
//! Session issuance lives in the upstream auth gateway; by the time a
//! request reaches this service the gateway has translated the session
//! into an identity header. Handlers take [`CurrentUser`] as an
//! extractor argument, so identity is resolved exactly once per request
//! and every operation receives an explicit, verified user id.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::Json,
};
use sea_orm::EntityTrait;
use tracing::{error, warn};

use model::entities::user;

use crate::schemas::{AppState, ErrorResponse};

/// Name of the header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user of the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i32,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                warn!("Request without {} header", USER_ID_HEADER);
                unauthorized()
            })?;

        let id: i32 = raw.parse().map_err(|_| {
            warn!("Malformed {} header: {}", USER_ID_HEADER, raw);
            unauthorized()
        })?;

        // The id must name a real user; a stale session for a deleted
        // account is indistinguishable from no session.
        match user::Entity::find_by_id(id).one(&state.db).await {
            Ok(Some(_)) => Ok(CurrentUser { id }),
            Ok(None) => {
                warn!("Identity header names unknown user {}", id);
                Err(unauthorized())
            }
            Err(db_error) => {
                error!("Failed to resolve user {}: {}", id, db_error);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to resolve session".to_string(),
                        code: "ERROR".to_string(),
                        success: false,
                    }),
                ))
            }
        }
    }
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Unauthorized".to_string(),
            code: "UNAUTHORIZED".to_string(),
            success: false,
        }),
    )
}
