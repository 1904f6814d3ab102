//! JSON endpoints.

pub(crate) mod content;
