//! The components module contains Maud "partials", such as the navigation,
//! tag badges and the table of contents, that are not complete pages in
//! themselves - complete pages are stored in the views folder.
//!
//! The highest-level component is 'page', which provides the common header and
//! footer for all views.

pub(crate) mod nav;
pub(crate) mod page;
pub(crate) mod tags;
pub(crate) mod toc;
