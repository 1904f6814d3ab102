use std::fmt::Display;

use maud::{html, Markup};

/// The entries in the site navigation, used to specify which one is
/// highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Home,
    Projects,
    Notes,
    Works,
    About,
    Contact,
}

impl Nav {
    pub const ALL: [Nav; 6] = [
        Nav::Home,
        Nav::Projects,
        Nav::Notes,
        Nav::Works,
        Nav::About,
        Nav::Contact,
    ];

    /// Returns the href that a navigation entry routes to.
    pub fn href(self) -> &'static str {
        match self {
            Nav::Home => "/",
            Nav::Projects => "/projects",
            Nav::Notes => "/notes",
            Nav::Works => "/works",
            Nav::About => "/about",
            Nav::Contact => "/contact",
        }
    }
}

impl Display for Nav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Nav::Home => write!(f, "Home"),
            Nav::Projects => write!(f, "Projects"),
            Nav::Notes => write!(f, "Notes"),
            Nav::Works => write!(f, "Works"),
            Nav::About => write!(f, "About"),
            Nav::Contact => write!(f, "Contact"),
        }
    }
}

/// Returns the markup for the navigation bar. `current` is highlighted;
/// pages outside the navigation pass None.
pub fn nav(current: Option<Nav>) -> Markup {
    html! {
        nav class="site-nav" {
            @for item in Nav::ALL {
                @if Some(item) == current {
                    a class="active" href=(item.href()) aria-current="page" { (item.to_string()) }
                } @else {
                    a href=(item.href()) { (item.to_string()) }
                }
            }
        }
    }
}
