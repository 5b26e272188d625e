//! Interactive "Follow Now" endpoint: probe, subscribe, re-verify.

use crate::api::error::ErrorResponse;
use crate::api::handlers::GateState;
use crate::gate;
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FollowParams {
    /// Bearer token handed to the callback page; used once, never stored.
    access_token: Option<String>,
}

#[utoipa::path(
    get,
    path = "/follow",
    params(FollowParams),
    responses(
        (status = 200, description = "All gated resources followed and verified"),
        (status = 400, description = "No access token provided", body = ErrorResponse),
        (status = 409, description = "Follow accepted but not observable yet; retry", body = ErrorResponse),
        (status = 502, description = "Remote service failure", body = ErrorResponse)
    ),
    tag = "gate"
)]
pub async fn follow(
    Query(params): Query<FollowParams>,
    state: Extension<Arc<GateState>>,
) -> Response {
    let Some(token) = params.access_token.filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No access token provided")),
        )
            .into_response();
    };

    match gate::verify_follow(state.globals(), &token, state.config()).await {
        Ok(()) => {
            info!("follow action verified");
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Err(err) => err.into_response(),
    }
}
