use axum::http::StatusCode;
use chrono::{Datelike, Local};
use folio_core::site::SiteConfig;
use maud::{html, Markup, DOCTYPE};

use super::nav::{nav, Nav};

/// Takes 'content' and wraps the standard header, navigation and footer
/// around it. `title` is the page's own title, None for the home page.
pub fn page(site: &SiteConfig, current: Option<Nav>, title: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(site.description);
                title { (site.page_title(title)) }
                link rel="icon" href="/assets/favicon.svg" type="image/svg+xml";
                link href="/assets/site.css" rel="stylesheet" type="text/css";
                style { ":root { --accent: " (site.accent) "; }" }
            }
            body {
                header class="site-header" {
                    a class="brand" href="/" { (site.name) }
                    (nav(current))
                }
                main class="container" {
                    (content)
                }
                (footer(site))
            }
        }
    }
}

fn footer(site: &SiteConfig) -> Markup {
    html! {
        footer class="site-footer" {
            p { "© " (Local::now().year()) " " (site.name) }
            ul class="social" {
                li { a href=(site.social.github) rel="noopener noreferrer" { "GitHub" } }
                li { a href=(site.social.linkedin) rel="noopener noreferrer" { "LinkedIn" } }
                li { a href={ "mailto:" (site.social.email) } { "Email" } }
            }
        }
    }
}

/// A page for error responses. Takes no site config since errors are
/// rendered without access to the state.
pub fn error_page(code: StatusCode) -> Markup {
    let heading = match code {
        StatusCode::NOT_FOUND => "Page not found",
        c if c.is_server_error() => "Something went wrong",
        _ => code.canonical_reason().unwrap_or("Error"),
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (heading) }
                link href="/assets/site.css" rel="stylesheet" type="text/css";
            }
            body {
                main class="container error" {
                    h1 { (code.as_u16()) }
                    p { (heading) }
                    a href="/" { "Back to home" }
                }
            }
        }
    }
}
