use axum::extract::{Path, Query, State};
use folio_core::{
    cms::{display_date, entry_naive_date, filter_by_title, sort_undated_last, CmsTechNote},
    model::Note,
};
use maud::{html, Markup};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{
    components::{nav::Nav, page::page, tags::tag_list},
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::{article, back_link, date_time, empty_state, page_heading};

const TITLE: &str = "Tech Notes";
const DESCRIPTION: &str = "Technical notes, tutorials, and insights on cybersecurity, networking, and system administration.";

#[derive(Debug, Default, Deserialize)]
pub struct NotesQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Notes from the CMS: dated ones newest first, undated ones at the end.
/// `?q=` narrows the list down by title.
#[instrument(skip(state))]
pub async fn notes(State(state): State<AppState>, Query(query): Query<NotesQuery>) -> ApiResult<Markup> {
    let mut notes = match &state.cms {
        Some(cms) => cms.all_tech_notes().await?,
        None => {
            warn!("No CMS configured, the notes page is empty");
            Vec::new()
        }
    };
    sort_undated_last(&mut notes);

    let q = query.q.unwrap_or_default();
    let q = q.trim();
    let filtered = filter_by_title(&notes, q);

    let content = html! {
        (page_heading(TITLE, DESCRIPTION))
        form class="search" method="get" action="/notes" {
            input type="search" name="q" placeholder="Search notes..." value=(q);
            @if !q.is_empty() {
                a class="clear" href="/notes" { "✕" }
            }
        }
        @if filtered.is_empty() {
            @if q.is_empty() {
                (empty_state("No notes available yet."))
            } @else {
                (empty_state(&format!("No notes matching \"{q}\"")))
            }
        } @else {
            div class="entry-list" {
                @for note in &filtered {
                    (note_item(note))
                }
            }
            @if !q.is_empty() {
                p class="muted small" {
                    (filtered.len()) " result" @if filtered.len() != 1 { "s" } " for “" (q) "”"
                }
            }
        }
    };

    Ok(page(&state.site, Some(Nav::Notes), Some(TITLE), content))
}

fn note_item(note: &CmsTechNote) -> Markup {
    html! {
        a class="entry" href={ "/notes/" (note.document_id) } {
            h3 { (note.title) }
            @if let Some(date) = display_date(note) {
                span class="muted" { (date_time(date)) }
            } @else {
                span class="muted faint" { "No date" }
            }
        }
    }
}

/// A local note by slug, or failing that a CMS note by document id.
#[instrument(skip(state))]
pub async fn note(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Markup> {
    let lookup = id.clone();
    if let Some(note) = state.local(move |store| store.note_by_slug(&lookup)).await? {
        return Ok(local_note(&state, &note));
    }

    let cms = state.cms.as_ref().ok_or_else(ApiError::not_found)?;
    let note = cms
        .tech_note_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found().message(format!("No note {id}")))?;

    let content = html! {
        (back_link("/notes", "Notes"))
        header class="entry-header" {
            @if let Some(date) = entry_naive_date(&note) {
                p class="meta" { (date_time(date)) }
            }
            h1 { (note.title) }
        }
        (article(&note.note))
    };

    Ok(page(&state.site, Some(Nav::Notes), Some(&note.title), content))
}

fn local_note(state: &AppState, note: &Note) -> Markup {
    let content = html! {
        (back_link("/notes", "Notes"))
        header class="entry-header" {
            p class="meta" { (date_time(note.date)) " • " (note.reading_time) }
            h1 { (note.title) }
            @if let Some(summary) = &note.meta.summary {
                p class="muted" { (summary) }
            }
        }
        (article(&note.content))
        (tag_list(&note.meta.tags))
    };

    page(&state.site, Some(Nav::Notes), Some(&note.title), content)
}
