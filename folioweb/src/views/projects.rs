use axum::extract::{Path, State};
use folio_core::{
    cms::{display_date, CmsProject},
    model::{Project, ProjectStatus},
};
use maud::{html, Markup};
use tracing::instrument;

use crate::{
    components::{
        nav::Nav,
        page::page,
        tags::{tag_list, truncated_tag_list},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::{article, back_link, date_time, empty_state, page_heading};

const TITLE: &str = "IT Projects & Homelab";
const DESCRIPTION: &str =
    "Exploring network security, virtualization, automation, and infrastructure projects";

/// Local projects, followed by the write-ups kept in the CMS if there is one.
#[instrument(skip(state))]
pub async fn projects(State(state): State<AppState>) -> ApiResult<Markup> {
    let projects = state.local(|store| store.all_projects()).await??;

    let write_ups = match &state.cms {
        Some(cms) => cms.all_projects().await?,
        None => Vec::new(),
    };

    let content = html! {
        (page_heading(TITLE, DESCRIPTION))
        @if projects.is_empty() && write_ups.is_empty() {
            (empty_state("No projects found."))
        }
        div class="cards" {
            @for p in &projects {
                (project_card(p))
            }
        }
        @if !write_ups.is_empty() {
            h2 { "Write-ups" }
            ul class="entry-list" {
                @for w in &write_ups {
                    (write_up_item(w))
                }
            }
        }
    };

    Ok(page(&state.site, Some(Nav::Projects), Some(TITLE), content))
}

fn project_card(p: &Project) -> Markup {
    let status_class = match p.meta.status {
        ProjectStatus::Completed => "badge",
        ProjectStatus::Ongoing => "badge secondary",
    };

    html! {
        a class="card" href={ "/projects/" (p.slug) } {
            @if !p.meta.cover.is_empty() {
                img class="cover" src=(p.meta.cover) alt=(p.title) loading="lazy";
            }
            div class="card-header" {
                h3 { (p.title) }
                span class=(status_class) { (p.meta.status) }
            }
            p class="muted" { (p.meta.summary) }
            (truncated_tag_list(&p.meta.tech, 4))
            (tag_list(&p.meta.tags))
            p class="meta" { (p.meta.year) " • " (p.reading_time) }
        }
    }
}

fn write_up_item(w: &CmsProject) -> Markup {
    html! {
        li {
            a href={ "/projects/" (w.document_id) } { (w.title) }
            @if let Some(date) = display_date(w) {
                " " span class="muted" { (date_time(date)) }
            }
        }
    }
}

/// A local project by slug, or failing that a CMS project by document id.
#[instrument(skip(state))]
pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Markup> {
    let lookup = slug.clone();
    if let Some(p) = state.local(move |store| store.project_by_slug(&lookup)).await? {
        return Ok(local_project(&state, &p));
    }

    let cms = state.cms.as_ref().ok_or_else(ApiError::not_found)?;
    match cms.project_by_id(&slug).await? {
        Some(p) => Ok(cms_project(&state, &p)),
        None => Err(ApiError::not_found().message(format!("No project {slug}"))),
    }
}

fn local_project(state: &AppState, p: &Project) -> Markup {
    let content = html! {
        (back_link("/projects", "Projects"))
        header class="entry-header" {
            p class="meta" { (date_time(p.date)) " • " (p.reading_time) " • " (p.meta.status) }
            h1 { (p.title) }
            p class="muted" { (p.meta.summary) }
            (tag_list(&p.meta.tech))
            @if let Some(repo) = &p.meta.repo {
                a class="button outline" href=(repo) rel="noopener noreferrer" { "Source code" }
            }
        }
        @if !p.meta.cover.is_empty() {
            img class="cover" src=(p.meta.cover) alt=(p.title);
        }
        (article(&p.content))
        (tag_list(&p.meta.tags))
    };

    page(&state.site, Some(Nav::Projects), Some(&p.title), content)
}

fn cms_project(state: &AppState, p: &CmsProject) -> Markup {
    let content = html! {
        (back_link("/projects", "Projects"))
        header class="entry-header" {
            @if let Some(date) = display_date(p) {
                p class="meta" { (date_time(date)) }
            }
            h1 { (p.title) }
        }
        (article(&p.detail))
    };

    page(&state.site, Some(Nav::Projects), Some(&p.title), content)
}
