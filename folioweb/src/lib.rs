//! The portfolio web site: server-rendered pages over the local content
//! store and the CMS.

use axum::{routing::get, Router};

mod api;
mod asset;
mod components;
pub mod error;
mod seo;
pub mod state;
mod views;

pub use state::AppState;

/// Builds the router for the whole site.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::home::home))
        .route("/projects", get(views::projects::projects))
        .route("/projects/:slug", get(views::projects::project))
        .route("/notes", get(views::notes::notes))
        .route("/notes/:id", get(views::notes::note))
        .route("/works", get(views::works::works))
        .route("/works/:id", get(views::works::work))
        .route("/art", get(views::art::artworks))
        .route("/art/:slug", get(views::art::artwork))
        .route("/photo", get(views::photo::photos))
        .route("/photo/:slug", get(views::photo::photo))
        .route("/about", get(views::about::about))
        .route("/contact", get(views::contact::contact))
        .route("/api/content", get(api::content::content))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .route("/assets/*file", get(asset::static_handler))
        .fallback(error::not_found_handler)
        .with_state(state)
}
