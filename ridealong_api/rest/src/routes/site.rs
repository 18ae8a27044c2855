use std::sync::Arc;

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use chrono::Utc;
use ridealong_core_site_contracts::SiteService;

use crate::errors::internal_server_error;

pub fn router(service: Arc<impl SiteService>) -> Router<()> {
    Router::new()
        .route("/manifest.json", routing::get(manifest))
        .route("/sitemap.xml", routing::get(sitemap))
        .route("/robots.txt", routing::get(robots))
        .with_state(service)
}

async fn manifest(service: State<Arc<impl SiteService>>) -> Response {
    Json(service.manifest()).into_response()
}

async fn sitemap(service: State<Arc<impl SiteService>>) -> Response {
    match service.sitemap(Utc::now()) {
        Ok(sitemap) => ([(CONTENT_TYPE, "application/xml")], sitemap).into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn robots(service: State<Arc<impl SiteService>>) -> Response {
    match service.robots() {
        Ok(robots) => ([(CONTENT_TYPE, "text/plain; charset=utf-8")], robots).into_response(),
        Err(err) => internal_server_error(err),
    }
}
