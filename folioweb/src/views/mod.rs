//! The views module contains Maud templates that correspond to entire pages.
//! That is, each one corresponds to a route in the main router.
//!
//! Views are constructed from partials, which are contained in the components
//! module.

use chrono::NaiveDate;
use folio_core::{
    dates::{format_display_date, format_iso_date},
    markdown::render_with_toc,
    model::Image,
    site::GalleryLayout,
};
use maud::{html, Markup, PreEscaped};

use crate::components::toc::table_of_contents;

pub(crate) mod about;
pub(crate) mod art;
pub(crate) mod contact;
pub(crate) mod home;
pub(crate) mod notes;
pub(crate) mod photo;
pub(crate) mod projects;
pub(crate) mod works;

/// A `<time>` element showing `date` in long form.
pub(crate) fn date_time(date: NaiveDate) -> Markup {
    html! {
        time datetime=(format_iso_date(date)) { (format_display_date(date)) }
    }
}

/// The rendered markdown body of an entry, with its table of contents.
pub(crate) fn article(body: &str) -> Markup {
    let rendered = render_with_toc(body);
    html! {
        (table_of_contents(&rendered.toc))
        article class="prose" {
            (PreEscaped(rendered.html))
        }
    }
}

/// The heading block shared by every list page.
pub(crate) fn page_heading(title: &str, description: &str) -> Markup {
    html! {
        div class="page-heading" {
            h1 { (title) }
            p class="muted" { (description) }
        }
    }
}

/// A link back to a list page.
pub(crate) fn back_link(href: &str, label: &str) -> Markup {
    html! {
        a class="back" href=(href) { "← Back to " (label) }
    }
}

pub(crate) fn empty_state(message: &str) -> Markup {
    html! {
        div class="empty" { p class="muted" { (message) } }
    }
}

pub(crate) fn gallery_class(layout: GalleryLayout) -> &'static str {
    match layout {
        GalleryLayout::Masonry => "gallery masonry",
        GalleryLayout::Grid => "gallery grid",
    }
}

/// Every image of an entry, full width.
pub(crate) fn image_list(images: &[Image]) -> Markup {
    html! {
        @for img in images {
            figure {
                img src=(img.src) alt=(img.alt) width=(img.w) height=(img.h) loading="lazy";
                @if !img.alt.is_empty() {
                    figcaption { (img.alt) }
                }
            }
        }
    }
}
