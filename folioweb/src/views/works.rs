use axum::extract::{Path, Query, State};
use folio_core::{
    cms::{entry_naive_date, CmsClient, CmsWork},
    model::{Work, WorkCategory},
};
use maud::{html, Markup};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    components::{nav::Nav, page::page, tags::tag_list},
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::{article, back_link, date_time, empty_state, gallery_class, image_list, page_heading};

const TITLE: &str = "Works";
const DESCRIPTION: &str = "Creative works including digital art, 3D projects, interactive media, design, and photography.";

#[derive(Debug, Default, Deserialize)]
pub struct WorksQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Works from the CMS, then the local gallery, optionally narrowed down to
/// one category with `?category=`.
#[instrument(skip(state))]
pub async fn works(State(state): State<AppState>, Query(query): Query<WorksQuery>) -> ApiResult<Markup> {
    let category = match query.category.as_deref() {
        None | Some("") => None,
        Some(c) => Some(
            c.parse::<WorkCategory>()
                .map_err(|e| ApiError::not_found().message(e))?,
        ),
    };

    let cms_works = match (&state.cms, category) {
        (Some(cms), None) => cms.all_works().await?,
        _ => Vec::new(),
    };

    let local_works = state
        .local(move |store| match category {
            Some(c) => store.works_by_category(c),
            None => store.all_works(),
        })
        .await??;

    let content = html! {
        (page_heading(TITLE, DESCRIPTION))
        nav class="filters" {
            a class=[category.is_none().then_some("active")] href="/works" { "All" }
            @for c in WorkCategory::ALL {
                a class=[(category == Some(c)).then_some("active")] href={ "/works?category=" (c) } { (c) }
            }
        }
        @if cms_works.is_empty() && local_works.is_empty() {
            (empty_state("No works available yet."))
        }
        div class=(gallery_class(state.site.gallery_layout)) {
            @if let Some(cms) = &state.cms {
                @for w in &cms_works {
                    (cms_work_tile(cms, w))
                }
            }
            @for w in &local_works {
                (local_work_tile(w))
            }
        }
    };

    Ok(page(&state.site, Some(Nav::Works), Some(TITLE), content))
}

fn cms_work_tile(cms: &CmsClient, w: &CmsWork) -> Markup {
    html! {
        a class="tile" href={ "/works/" (w.document_id) } {
            @if let Some(cover) = w.cover.as_ref().filter(|c| c.is_image()) {
                img src=(cms.cover_url(cover)) alt=(w.title) loading="lazy";
            }
            h3 { (w.title) }
            @if let Some(date) = entry_naive_date(w) {
                span class="muted small" { (date_time(date)) }
            }
        }
    }
}

fn local_work_tile(w: &Work) -> Markup {
    html! {
        a class="tile" href={ "/works/" (w.slug) } {
            @if let Some(img) = w.meta.images.first() {
                img src=(img.src) alt=(img.alt) loading="lazy";
            }
            h3 { (w.title) }
            span class="muted small" { (w.meta.category) " • " (date_time(w.date)) }
        }
    }
}

/// A local work by slug, or failing that a CMS work by document id.
#[instrument(skip(state))]
pub async fn work(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Markup> {
    let lookup = id.clone();
    if let Some(w) = state.local(move |store| store.work_by_slug(&lookup)).await? {
        return Ok(local_work(&state, &w));
    }

    let cms = state.cms.as_ref().ok_or_else(ApiError::not_found)?;
    let w = cms
        .work_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found().message(format!("No work {id}")))?;

    let content = html! {
        (back_link("/works", "Works"))
        header class="entry-header" {
            @if let Some(date) = entry_naive_date(&w) {
                p class="meta" { (date_time(date)) }
            }
            h1 { (w.title) }
        }
        @if let Some(cover) = w.cover.as_ref().filter(|c| c.is_image()) {
            img class="cover" src=(cms.media_url(&cover.url)) alt=(w.title);
        }
        (article(&w.detail))
    };

    Ok(page(&state.site, Some(Nav::Works), Some(&w.title), content))
}

fn local_work(state: &AppState, w: &Work) -> Markup {
    let content = html! {
        (back_link("/works", "Works"))
        header class="entry-header" {
            p class="meta" { (date_time(w.date)) " • " (w.meta.category) }
            h1 { (w.title) }
            p class="muted" { (w.meta.summary) }
            @if !w.meta.tools.is_empty() {
                p class="small" { "Tools: " (w.meta.tools.join(", ")) }
            }
        }
        (image_list(&w.meta.images))
        @for v in &w.meta.videos {
            video controls preload="metadata" {
                source src=(v.src) type=(v.kind.mime());
                (v.alt)
            }
        }
        (article(&w.content))
        (tag_list(&w.meta.tags))
    };

    page(&state.site, Some(Nav::Works), Some(&w.title), content)
}
