//! Client for the headless CMS (a Strapi REST API) that backs the notes,
//! works and project write-ups.
//!
//! Every collection is fetched with a single authenticated GET. Responses are
//! kept for a fixed revalidation interval, after which the next request goes
//! back to the server. There are no retries: a failed request is an error for
//! the caller to surface.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{dates::parse_content_date, error::FolioError};

/// How long a response is served from the cache before being refetched.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(60);

/// Number of entries requested per collection.
pub const PAGE_SIZE: usize = 100;

/// Upper bound on the number of cached responses.
pub const MAX_CACHED_RESPONSES: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsMediaFormat {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsMediaFormats {
    #[serde(default)]
    pub large: Option<CmsMediaFormat>,
    #[serde(default)]
    pub medium: Option<CmsMediaFormat>,
    #[serde(default)]
    pub small: Option<CmsMediaFormat>,
    #[serde(default)]
    pub thumbnail: Option<CmsMediaFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsMedia {
    pub url: String,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Option<CmsMediaFormats>,
}

impl CmsMedia {
    /// Covers can also be videos, which pages do not show as images.
    pub fn is_image(&self) -> bool {
        self.mime.as_deref().is_some_and(|m| m.starts_with("image/"))
    }

    /// The preferred rendition for thumbnails: medium, small, large, then the
    /// original upload. Renditions without a url are skipped.
    pub fn preferred_path(&self) -> &str {
        let Some(formats) = &self.formats else {
            return &self.url;
        };

        usable_url(&formats.medium)
            .or_else(|| usable_url(&formats.small))
            .or_else(|| usable_url(&formats.large))
            .unwrap_or(&self.url)
    }
}

fn usable_url(format: &Option<CmsMediaFormat>) -> Option<&str> {
    format
        .as_ref()
        .map(|f| f.url.as_str())
        .filter(|url| !url.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsProject {
    pub id: u64,
    pub document_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PublishDate", default)]
    pub publish_date: Option<String>,
    #[serde(rename = "Detail", default)]
    pub detail: String,
    pub created_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsTechNote {
    pub id: u64,
    pub document_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Note", default)]
    pub note: String,
    #[serde(rename = "PublishDate", default)]
    pub publish_date: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsWork {
    pub id: u64,
    pub document_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PublishDate", default)]
    pub publish_date: Option<String>,
    #[serde(rename = "Detail", default)]
    pub detail: String,
    #[serde(rename = "Cover", default)]
    pub cover: Option<CmsMedia>,
    pub created_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// The fields every CMS entry shares.
pub trait CmsEntry {
    fn document_id(&self) -> &str;
    fn title(&self) -> &str;
    fn publish_date(&self) -> Option<&str>;
    fn created_at(&self) -> &str;
}

/// An entry type that lives in its own REST collection.
pub trait CmsCollection: CmsEntry + DeserializeOwned {
    const COLLECTION: &'static str;
}

macro_rules! impl_cms_entry {
    ($ty:ty, $collection:literal) => {
        impl CmsEntry for $ty {
            fn document_id(&self) -> &str {
                &self.document_id
            }

            fn title(&self) -> &str {
                &self.title
            }

            fn publish_date(&self) -> Option<&str> {
                self.publish_date.as_deref().filter(|d| !d.is_empty())
            }

            fn created_at(&self) -> &str {
                &self.created_at
            }
        }

        impl CmsCollection for $ty {
            const COLLECTION: &'static str = $collection;
        }
    };
}

impl_cms_entry!(CmsProject, "projects");
impl_cms_entry!(CmsTechNote, "technotes");
impl_cms_entry!(CmsWork, "works");

/// The date to show for an entry: the publish date if the author set one,
/// otherwise the day it was created.
pub fn entry_date<E: CmsEntry>(entry: &E) -> String {
    match entry.publish_date() {
        Some(d) => d.to_string(),
        None => entry
            .created_at()
            .split('T')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Like [`entry_date`] but parsed. None if the CMS sent something
/// unparseable.
pub fn entry_naive_date<E: CmsEntry>(entry: &E) -> Option<NaiveDate> {
    parse_content_date(&entry_date(entry)).ok()
}

/// Only the publish date the author set, with no fallback.
pub fn display_date<E: CmsEntry>(entry: &E) -> Option<NaiveDate> {
    entry.publish_date().and_then(|d| parse_content_date(d).ok())
}

/// Sorts by [`entry_date`], newest first. Unparseable dates sort last.
pub fn sort_newest_first<E: CmsEntry>(entries: &mut [E]) {
    entries.sort_by_key(|e| std::cmp::Reverse(entry_naive_date(e)));
}

/// Entries with a publish date first, newest to oldest, then the undated
/// ones in their original order.
pub fn sort_undated_last<E: CmsEntry>(entries: &mut [E]) {
    entries.sort_by(|a, b| match (display_date(a), display_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Case-insensitive title search. A blank query matches everything.
pub fn filter_by_title<'a, E: CmsEntry>(entries: &'a [E], query: &str) -> Vec<&'a E> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|e| e.title().to_lowercase().contains(&query))
        .collect()
}

/// Document ids are generated by the CMS and only ever contain these
/// characters. Anything else cannot match, so it is never sent.
fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Deserialize)]
struct CmsResponse<T> {
    data: Vec<T>,
}

struct CachedResponse {
    fetched: Instant,
    body: serde_json::Value,
}

pub struct CmsClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
    revalidate: Duration,
    cache: Mutex<HashMap<String, CachedResponse>>,
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.base_url)
            .field("revalidate", &self.revalidate)
            .finish_non_exhaustive()
    }
}

impl CmsClient {
    /// Creates a client for the CMS at `base_url`, e.g.
    /// "http://192.168.10.41:1337". `token` may be empty for public
    /// collections.
    pub fn new<S: Into<String>, T: Into<String>>(base_url: S, token: T) -> Result<Self, FolioError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(FolioError::InvalidCmsUrl(base_url));
        }

        info!("Using CMS at {base_url}");

        Ok(Self {
            base_url,
            token: token.into(),
            http: reqwest::Client::new(),
            revalidate: DEFAULT_REVALIDATE,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Sets how long responses are reused. Zero disables the cache.
    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a media path, which the CMS hands out relative to itself, to
    /// a full url. Absolute urls are returned unchanged.
    pub fn media_url(&self, path: &str) -> String {
        if path.is_empty() {
            String::new()
        } else if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// The url of the best thumbnail rendition of `cover`.
    pub fn cover_url(&self, cover: &CmsMedia) -> String {
        self.media_url(cover.preferred_path())
    }

    /// Forgets every cached response.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn cached(&self, url: &str) -> Option<serde_json::Value> {
        if self.revalidate.is_zero() {
            return None;
        }

        let cache = self.cache.lock().ok()?;
        let entry = cache.get(url)?;
        if entry.fetched.elapsed() < self.revalidate {
            Some(entry.body.clone())
        } else {
            None
        }
    }

    /// Caches `body` under `url`, dropping whatever has expired so the map
    /// only ever holds live responses.
    fn store(&self, url: String, body: serde_json::Value) {
        if self.revalidate.is_zero() {
            return;
        }

        if let Ok(mut cache) = self.cache.lock() {
            cache.retain(|_, e| e.fetched.elapsed() < self.revalidate);
            if cache.len() >= MAX_CACHED_RESPONSES {
                let oldest = cache
                    .iter()
                    .min_by_key(|(_, e)| e.fetched)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    cache.remove(&oldest);
                }
            }
            cache.insert(
                url,
                CachedResponse {
                    fetched: Instant::now(),
                    body,
                },
            );
        }
    }

    fn forget(&self, url: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(url);
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    /// GETs `/api/{endpoint}` and deserializes the JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FolioError> {
        let url = self.endpoint_url(endpoint);

        if let Some(body) = self.cached(&url) {
            debug!("CMS cache hit for {url}");
            return Ok(serde_json::from_value(body)?);
        }

        debug!("CMS fetch {url}");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::CmsStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let result = serde_json::from_value(body.clone())?;
        self.store(url, body);
        Ok(result)
    }

    /// Every entry of the collection, newest first.
    pub async fn all<T: CmsCollection>(&self) -> Result<Vec<T>, FolioError> {
        let endpoint = format!(
            "{}?populate=*&pagination[pageSize]={}",
            T::COLLECTION,
            PAGE_SIZE
        );
        let response: CmsResponse<T> = self.fetch(&endpoint).await?;
        let mut data = response.data;
        sort_newest_first(&mut data);
        Ok(data)
    }

    /// The entry with the given document id, if there is one.
    pub async fn by_id<T: CmsCollection>(&self, document_id: &str) -> Result<Option<T>, FolioError> {
        if !is_valid_document_id(document_id) {
            debug!("Not querying the CMS for invalid document id {document_id:?}");
            return Ok(None);
        }

        let endpoint = format!(
            "{}?filters[documentId][$eq]={}&populate=*",
            T::COLLECTION,
            document_id
        );
        let response: CmsResponse<T> = self.fetch(&endpoint).await?;

        // Lookups of ids that do not exist are not worth keeping.
        if response.data.is_empty() {
            self.forget(&self.endpoint_url(&endpoint));
        }

        Ok(response.data.into_iter().next())
    }

    pub async fn all_projects(&self) -> Result<Vec<CmsProject>, FolioError> {
        self.all().await
    }

    pub async fn project_by_id(&self, document_id: &str) -> Result<Option<CmsProject>, FolioError> {
        self.by_id(document_id).await
    }

    pub async fn all_tech_notes(&self) -> Result<Vec<CmsTechNote>, FolioError> {
        self.all().await
    }

    pub async fn tech_note_by_id(&self, document_id: &str) -> Result<Option<CmsTechNote>, FolioError> {
        self.by_id(document_id).await
    }

    pub async fn all_works(&self) -> Result<Vec<CmsWork>, FolioError> {
        self.all().await
    }

    pub async fn work_by_id(&self, document_id: &str) -> Result<Option<CmsWork>, FolioError> {
        self.by_id(document_id).await
    }
}
