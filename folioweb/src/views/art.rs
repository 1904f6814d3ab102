use axum::extract::{Path, State};
use maud::{html, Markup};
use tracing::instrument;

use crate::{
    components::page::page,
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::{article, back_link, date_time, empty_state, gallery_class, image_list, page_heading};

const TITLE: &str = "Digital Art";
const DESCRIPTION: &str = "Digital paintings, 3D renders and illustrations.";

#[instrument(skip(state))]
pub async fn artworks(State(state): State<AppState>) -> ApiResult<Markup> {
    let artwork = state.local(|store| store.all_artwork()).await??;

    let content = html! {
        (page_heading(TITLE, DESCRIPTION))
        @if artwork.is_empty() {
            (empty_state("No artwork available yet."))
        }
        div class=(gallery_class(state.site.gallery_layout)) {
            @for art in &artwork {
                a class="tile" href={ "/art/" (art.slug) } {
                    @if let Some(img) = art.meta.images.first() {
                        img src=(img.src) alt=(img.alt) loading="lazy";
                    }
                    h3 { (art.title) }
                    span class="muted small" { (art.meta.category) }
                }
            }
        }
    };

    Ok(page(&state.site, None, Some(TITLE), content))
}

#[instrument(skip(state))]
pub async fn artwork(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Markup> {
    let lookup = slug.clone();
    let art = state
        .local(move |store| store.artwork_by_slug(&lookup))
        .await?
        .ok_or_else(|| ApiError::not_found().message(format!("No artwork {slug}")))?;

    let content = html! {
        (back_link("/art", "Art"))
        header class="entry-header" {
            p class="meta" { (date_time(art.date)) " • " (art.meta.category) }
            h1 { (art.title) }
            p class="muted" { (art.meta.summary) }
        }
        (image_list(&art.meta.images))
        (article(&art.content))
    };

    Ok(page(&state.site, None, Some(&art.title), content))
}
