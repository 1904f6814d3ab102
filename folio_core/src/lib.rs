#![forbid(unsafe_code)]

mod byte_counter;
mod error;
pub mod cms;
pub mod content;
pub mod dates;
pub mod frontmatter;
pub mod markdown;
pub mod model;
pub mod reading_time;
pub mod seo;
pub mod site;

pub use error::FolioError;
