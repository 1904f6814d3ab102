use maud::{html, Markup};

/// A row of badges, one per tag. Nothing at all for an empty list.
pub fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul class="tags" {
                @for tag in tags {
                    li class="badge" { (tag) }
                }
            }
        }
    }
}

/// Like [`tag_list`] but shows at most `max` badges followed by a "+n" badge
/// for the rest.
pub fn truncated_tag_list(tags: &[String], max: usize) -> Markup {
    let shown = &tags[..tags.len().min(max)];
    let hidden = tags.len() - shown.len();

    html! {
        @if !tags.is_empty() {
            ul class="tags" {
                @for tag in shown {
                    li class="badge outline" { (tag) }
                }
                @if hidden > 0 {
                    li class="badge outline" { "+" (hidden) }
                }
            }
        }
    }
}
