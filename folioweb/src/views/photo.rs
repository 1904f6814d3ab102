use axum::extract::{Path, State};
use folio_core::model::Exif;
use maud::{html, Markup};
use tracing::instrument;

use crate::{
    components::page::page,
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::{article, back_link, date_time, empty_state, gallery_class, image_list, page_heading};

const TITLE: &str = "Photography";
const DESCRIPTION: &str = "Landscapes, streets and everything in between.";

#[instrument(skip(state))]
pub async fn photos(State(state): State<AppState>) -> ApiResult<Markup> {
    let photos = state.local(|store| store.all_photos()).await??;

    let content = html! {
        (page_heading(TITLE, DESCRIPTION))
        @if photos.is_empty() {
            (empty_state("No photos available yet."))
        }
        div class=(gallery_class(state.site.gallery_layout)) {
            @for photo in &photos {
                a class="tile" href={ "/photo/" (photo.slug) } {
                    @if let Some(img) = photo.meta.images.first() {
                        img src=(img.src) alt=(img.alt) loading="lazy";
                    }
                    h3 { (photo.title) }
                    span class="muted small" { (date_time(photo.date)) }
                }
            }
        }
    };

    Ok(page(&state.site, None, Some(TITLE), content))
}

#[instrument(skip(state))]
pub async fn photo(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Markup> {
    let lookup = slug.clone();
    let photo = state
        .local(move |store| store.photo_by_slug(&lookup))
        .await?
        .ok_or_else(|| ApiError::not_found().message(format!("No photo {slug}")))?;

    let exif = photo.meta.meta.as_ref().and_then(|m| m.exif.as_ref());

    let content = html! {
        (back_link("/photo", "Photography"))
        header class="entry-header" {
            p class="meta" { (date_time(photo.date)) }
            h1 { (photo.title) }
            p class="muted" { (photo.meta.summary) }
        }
        (image_list(&photo.meta.images))
        @if let Some(exif) = exif {
            (exif_table(exif))
        }
        (article(&photo.content))
    };

    Ok(page(&state.site, None, Some(&photo.title), content))
}

fn exif_table(exif: &Exif) -> Markup {
    html! {
        dl class="exif" {
            dt { "Camera" } dd { (exif.camera) }
            dt { "Lens" } dd { (exif.lens) }
            dt { "ISO" } dd { (exif.iso) }
            dt { "Shutter" } dd { (exif.shutter) }
            dt { "Aperture" } dd { (exif.aperture) }
        }
    }
}
