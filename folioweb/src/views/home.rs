use axum::extract::State;
use folio_core::model::{Artwork, Photo, Project};
use maud::{html, Markup};
use tracing::instrument;

use crate::{
    components::{
        nav::Nav,
        page::page,
        tags::truncated_tag_list,
    },
    error::ApiResult,
    state::AppState,
};

use super::{date_time, empty_state};

const LATEST_PROJECTS: usize = 3;
const LATEST_ARTWORK: usize = 2;
const LATEST_PHOTOS: usize = 2;

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> ApiResult<Markup> {
    let (projects, artwork, photos) = state
        .local(|store| -> Result<_, folio_core::FolioError> {
            let mut projects = store.all_projects()?;
            projects.truncate(LATEST_PROJECTS);
            let mut artwork = store.all_artwork()?;
            artwork.truncate(LATEST_ARTWORK);
            let mut photos = store.all_photos()?;
            photos.truncate(LATEST_PHOTOS);
            Ok((projects, artwork, photos))
        })
        .await??;

    let site = &state.site;
    let content = html! {
        section class="hero" {
            h1 { (site.name) }
            p class=(tagline_class(site.enable_typewriter)) { (site.tagline) }
            p class="muted" { (site.description) }
            div class="actions" {
                a class="button" href="/projects" { "View projects" }
                a class="button outline" href="/contact" { "Get in touch" }
            }
        }

        section {
            h2 { "Featured projects" }
            (project_cards(&projects))
        }

        section {
            h2 { "Creative work" }
            div class="gallery grid" {
                @for art in &artwork {
                    (artwork_tile(art))
                }
                @for photo in &photos {
                    (photo_tile(photo))
                }
            }
            @if artwork.is_empty() && photos.is_empty() {
                (empty_state("No creative work published yet."))
            }
        }
    };

    Ok(page(site, Some(Nav::Home), None, content))
}

fn tagline_class(typewriter: bool) -> &'static str {
    if typewriter {
        "tagline typewriter"
    } else {
        "tagline"
    }
}

fn project_cards(projects: &[Project]) -> Markup {
    html! {
        @if projects.is_empty() {
            (empty_state("No projects found."))
        } @else {
            div class="cards" {
                @for p in projects {
                    a class="card" href={ "/projects/" (p.slug) } {
                        h3 { (p.title) }
                        p class="muted" { (p.meta.summary) }
                        (truncated_tag_list(&p.meta.tech, 3))
                        p class="meta" { (date_time(p.date)) " • " (p.reading_time) }
                    }
                }
            }
        }
    }
}

fn artwork_tile(art: &Artwork) -> Markup {
    html! {
        a class="tile" href={ "/art/" (art.slug) } {
            @if let Some(img) = art.meta.images.first() {
                img src=(img.src) alt=(img.alt) loading="lazy";
            }
            span { (art.title) }
        }
    }
}

fn photo_tile(photo: &Photo) -> Markup {
    html! {
        a class="tile" href={ "/photo/" (photo.slug) } {
            @if let Some(img) = photo.meta.images.first() {
                img src=(img.src) alt=(img.alt) loading="lazy";
            }
            span { (photo.title) }
        }
    }
}
