use folio_core::markdown::TocEntry;
use maud::{html, Markup};

/// The "On this page" list. Only shown when there are at least two headings.
pub fn table_of_contents(entries: &[TocEntry]) -> Markup {
    html! {
        @if entries.len() > 1 {
            nav class="toc" {
                h2 { "On this page" }
                ul {
                    @for e in entries {
                        li class={ "toc-level-" (e.level) } {
                            a href={ "#" (e.id) } { (e.title) }
                        }
                    }
                }
            }
        }
    }
}
