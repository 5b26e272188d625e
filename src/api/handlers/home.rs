use crate::api::pages;
use axum::{extract::Query, response::Html};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct HomeParams {
    /// Machine-readable failure tag from a previous redirect.
    error: Option<String>,
    /// Human-readable failure detail.
    details: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    params(HomeParams),
    responses(
        (status = 200, description = "Landing page", content_type = "text/html")
    ),
    tag = "gate"
)]
pub async fn home(Query(params): Query<HomeParams>) -> Html<String> {
    Html(pages::home(params.error.as_deref(), params.details.as_deref()))
}
