use axum::extract::State;
use maud::{html, Markup};

use crate::{
    components::{nav::Nav, page::page},
    state::AppState,
};

pub async fn contact(State(state): State<AppState>) -> Markup {
    let site = &state.site;

    let content = html! {
        div class="page-heading" {
            h1 { "Contact" }
            p class="muted" { "The quickest way to reach me is by email." }
        }
        dl class="contact" {
            dt { "Email" }
            dd { a href={ "mailto:" (site.social.email) } { (site.social.email) } }
            dt { "GitHub" }
            dd { a href=(site.social.github) rel="noopener noreferrer" { (site.social.github) } }
            dt { "LinkedIn" }
            dd { a href=(site.social.linkedin) rel="noopener noreferrer" { (site.social.linkedin) } }
        }
    };

    page(site, Some(Nav::Contact), Some("Contact"), content)
}
