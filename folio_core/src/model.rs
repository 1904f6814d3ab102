//! The records that make up the local content of the site. Every record is an
//! [`Entry`]: the fields common to all content plus kind-specific metadata
//! read from the front-matter.

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{dates::serde_date, error::FolioError};

/// Implemented by the metadata of each kind of content. `DIR` is the
/// directory, relative to the content root, that holds the files.
pub trait ContentMeta: DeserializeOwned + Serialize + Send {
    const DIR: &'static str;
}

/// Content that carries a list of tags.
pub trait Tagged {
    fn tags(&self) -> &[String];
}

/// A single piece of content. The slug is the file name without its `.mdx`
/// extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry<M> {
    pub slug: String,
    pub title: String,
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    pub content: String,
    pub reading_time: String,
    #[serde(flatten)]
    pub meta: M,
}

impl<M: Tagged> Tagged for Entry<M> {
    fn tags(&self) -> &[String] {
        self.meta.tags()
    }
}

/// The shape of the front-matter of every file: title and date, plus
/// whatever the kind adds.
#[derive(Debug, Deserialize)]
pub(crate) struct FrontMatter<M> {
    pub title: String,
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub meta: M,
}

pub type Project = Entry<ProjectMeta>;
pub type Note = Entry<NoteMeta>;
pub type Work = Entry<WorkMeta>;
pub type Artwork = Entry<ArtworkMeta>;
pub type Photo = Entry<PhotoMeta>;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Completed,
    Ongoing,
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Ongoing => write!(f, "ongoing"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMeta {
    pub year: i32,
    pub summary: String,
    pub tags: Vec<String>,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    pub tech: Vec<String>,
    pub status: ProjectStatus,
}

impl ContentMeta for ProjectMeta {
    const DIR: &'static str = "projects";
}

impl Tagged for ProjectMeta {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteMeta {
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ContentMeta for NoteMeta {
    const DIR: &'static str = "notes";
}

impl Tagged for NoteMeta {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Mp4,
    Avi,
    Mkv,
}

impl VideoType {
    pub fn mime(self) -> &'static str {
        match self {
            VideoType::Mp4 => "video/mp4",
            VideoType::Avi => "video/x-msvideo",
            VideoType::Mkv => "video/x-matroska",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub src: String,
    pub alt: String,
    #[serde(rename = "type")]
    pub kind: VideoType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exif {
    pub camera: String,
    pub lens: String,
    pub iso: u32,
    pub shutter: String,
    pub aperture: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif: Option<Exif>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkCategory {
    #[serde(rename = "digital-art")]
    DigitalArt,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "interactive")]
    Interactive,
    #[serde(rename = "design")]
    Design,
    #[serde(rename = "photography")]
    Photography,
    #[serde(rename = "web-dev")]
    WebDev,
}

impl WorkCategory {
    pub const ALL: [WorkCategory; 6] = [
        WorkCategory::DigitalArt,
        WorkCategory::ThreeD,
        WorkCategory::Interactive,
        WorkCategory::Design,
        WorkCategory::Photography,
        WorkCategory::WebDev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkCategory::DigitalArt => "digital-art",
            WorkCategory::ThreeD => "3d",
            WorkCategory::Interactive => "interactive",
            WorkCategory::Design => "design",
            WorkCategory::Photography => "photography",
            WorkCategory::WebDev => "web-dev",
        }
    }
}

impl Display for WorkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid work category {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkMeta {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    pub category: WorkCategory,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MediaMeta>,
}

impl ContentMeta for WorkMeta {
    const DIR: &'static str = "works";
}

impl Tagged for WorkMeta {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtworkCategory {
    #[serde(rename = "digital-art")]
    DigitalArt,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "illustration")]
    Illustration,
}

impl Display for ArtworkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ArtworkCategory::DigitalArt => write!(f, "digital-art"),
            ArtworkCategory::ThreeD => write!(f, "3d"),
            ArtworkCategory::Illustration => write!(f, "illustration"),
        }
    }
}

/// Legacy artwork collection, kept alongside [`WorkMeta`] because the `art`
/// pages still read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkMeta {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub category: ArtworkCategory,
}

impl ContentMeta for ArtworkMeta {
    const DIR: &'static str = "art";
}

/// Legacy photo collection.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoMeta {
    pub summary: String,
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MediaMeta>,
}

impl ContentMeta for PhotoMeta {
    const DIR: &'static str = "photo";
}

/// The collections exposed through the JSON content endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentType {
    Projects,
    Notes,
    Artwork,
    Photos,
}

impl FromStr for ContentType {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(ContentType::Projects),
            "notes" => Ok(ContentType::Notes),
            "artwork" => Ok(ContentType::Artwork),
            "photos" => Ok(ContentType::Photos),
            _ => Err(FolioError::InvalidContentType(s.to_string())),
        }
    }
}

/// The collections that carry tags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagSource {
    Projects,
    Notes,
    Works,
}

impl FromStr for TagSource {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(TagSource::Projects),
            "notes" => Ok(TagSource::Notes),
            "works" => Ok(TagSource::Works),
            _ => Err(FolioError::InvalidTagSource(s.to_string())),
        }
    }
}
