use axum::extract::State;
use maud::{html, Markup};

use crate::{
    components::{nav::Nav, page::page},
    state::AppState,
};

pub async fn about(State(state): State<AppState>) -> Markup {
    let site = &state.site;

    let content = html! {
        div class="page-heading" {
            h1 { "About" }
            p class="tagline" { (site.tagline) }
        }
        section {
            p { (site.description) }
        }
        @if !site.currently_learning.is_empty() {
            section {
                h2 { "Currently learning" }
                ul class="tags" {
                    @for item in &site.currently_learning {
                        li class="badge outline" { (item) }
                    }
                }
            }
        }
        section class="actions" {
            a class="button outline" href=(site.social.github) rel="noopener noreferrer" { "GitHub" }
            a class="button outline" href=(site.social.linkedin) rel="noopener noreferrer" { "LinkedIn" }
            a class="button outline" href={ "mailto:" (site.social.email) } { "Email" }
        }
    };

    page(site, Some(Nav::About), Some("About"), content)
}
