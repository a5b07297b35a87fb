//! Actix Web preview server exposing the read-only site content.
//!
//! Handlers only read the loaded content; there is no submission endpoint.

use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, http::header, web};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use view_state::{
    Content, EntityId, MapView, MarkerProjection, Page, PartnerGroup, PlacedMarker,
};

use crate::{config::ServeConfig, telemetry};

/// Shared state backing HTTP handlers.
pub(crate) struct ServerState {
    pub(crate) content: Arc<Content>,
    pub(crate) map_view: MapView,
}

#[derive(Serialize)]
struct PageEntry {
    id: Page,
    label: &'static str,
}

#[derive(Serialize)]
struct FaqItem<'a> {
    id: EntityId,
    question: &'a str,
    answer: &'a str,
}

#[derive(Serialize)]
struct NewsCard<'a> {
    title: &'a str,
    date: String,
    category: &'a str,
    description: &'a str,
    image_ref: &'a str,
}

#[derive(Serialize)]
struct MapResponse<'a> {
    view: &'a MapView,
    markers: Vec<PlacedMarker>,
}

/// Run the server on the current thread until it is stopped by a signal.
pub(crate) fn run(config: ServeConfig, content: Arc<Content>) -> Result<()> {
    let map_view = MapView::default();
    info!(
        host = %config.host,
        port = config.port,
        institutions = content.institutions().count(),
        "starting preview server"
    );

    actix_web::rt::System::new()
        .block_on(async move {
            HttpServer::new(move || {
                App::new()
                    .app_data(web::Data::new(ServerState {
                        content: content.clone(),
                        map_view: map_view.clone(),
                    }))
                    .configure(routes)
            })
            .bind((config.host.as_str(), config.port))?
            .run()
            .await
        })
        .context("HTTP server error")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/pages", web::get().to(pages_handler))
        .route("/api/partners", web::get().to(partners_handler))
        .route("/api/faq", web::get().to(faq_handler))
        .route("/api/news", web::get().to(news_handler))
        .route("/api/map", web::get().to(map_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .route("/healthz", web::get().to(health_handler));
}

async fn pages_handler() -> HttpResponse {
    let pages: Vec<PageEntry> = Page::ALL
        .into_iter()
        .map(|id| PageEntry {
            id,
            label: id.label(),
        })
        .collect();
    HttpResponse::Ok().json(pages)
}

async fn partners_handler(state: web::Data<ServerState>) -> HttpResponse {
    let groups: &[PartnerGroup] = &state.content.partners;
    HttpResponse::Ok().json(groups)
}

async fn faq_handler(state: web::Data<ServerState>) -> HttpResponse {
    let items: Vec<FaqItem<'_>> = state
        .content
        .faq_entries()
        .map(|(id, entry)| FaqItem {
            id,
            question: &entry.question,
            answer: &entry.answer,
        })
        .collect();
    HttpResponse::Ok().json(items)
}

async fn news_handler(state: web::Data<ServerState>) -> HttpResponse {
    let cards: Vec<NewsCard<'_>> = state
        .content
        .news
        .iter()
        .map(|item| NewsCard {
            title: &item.title,
            date: item.display_date(),
            category: &item.category,
            description: &item.description,
            image_ref: &item.image_ref,
        })
        .collect();
    HttpResponse::Ok().json(cards)
}

async fn map_handler(state: web::Data<ServerState>) -> HttpResponse {
    let markers =
        MarkerProjection::new(&state.content.coordinates).place(state.content.institutions());
    HttpResponse::Ok().json(MapResponse {
        view: &state.map_view,
        markers,
    })
}

/// Render the Prometheus text exposition.
async fn metrics_handler() -> HttpResponse {
    match telemetry::prometheus_handle() {
        Some(handle) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/plain; version=0.0.4"))
            .body(handle.render()),
        None => HttpResponse::ServiceUnavailable().body("metrics recorder not installed"),
    }
}

async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
