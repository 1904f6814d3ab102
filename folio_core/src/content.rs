//! Loading local content from a directory tree of `.mdx` files.
//!
//! The content root holds one directory per kind of content (see
//! [`ContentMeta::DIR`]). Each `.mdx` file in it is one entry, its slug being
//! the file name without the extension.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use logging_timer::time;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    error::FolioError,
    frontmatter::parse_front_matter,
    model::{
        Artwork, ArtworkMeta, ContentMeta, ContentType, Entry, FrontMatter, Note, NoteMeta,
        Photo, PhotoMeta, Project, ProjectMeta, TagSource, Tagged, Work, WorkCategory, WorkMeta,
    },
    reading_time::reading_time,
};

pub const CONTENT_EXTENSION: &str = "mdx";

/// Reads entries from a content root directory. Nothing is cached, every call
/// goes back to the file system.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, dir: &str) -> PathBuf {
        self.root.join(dir)
    }

    /// Returns the names of the content files in `dir`, sorted. A missing
    /// directory simply has no content.
    pub fn content_files(&self, dir: &str) -> Result<Vec<String>, FolioError> {
        let full_path = self.kind_dir(dir);
        if !full_path.exists() {
            debug!("Content directory {:?} does not exist", full_path);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for dir_entry in fs::read_dir(&full_path)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let path = dir_entry.path();
            let is_content = path
                .extension()
                .is_some_and(|ext| ext == CONTENT_EXTENSION);
            if !is_content {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Parses a single file of kind `M`.
    pub fn parse_entry<M: ContentMeta>(&self, filename: &str) -> Result<Entry<M>, FolioError> {
        let path = self.kind_dir(M::DIR).join(filename);
        parse_entry_file(&path).map_err(|err| FolioError::ParseFile {
            path,
            source: Box::new(err),
        })
    }

    /// Returns every entry of kind `M`, newest first. Files that fail to
    /// parse are logged and skipped.
    #[time]
    pub fn all<M: ContentMeta>(&self) -> Result<Vec<Entry<M>>, FolioError> {
        let files = self.content_files(M::DIR)?;

        let mut entries: Vec<Entry<M>> = files
            .par_iter()
            .filter_map(|f| match self.parse_entry::<M>(f) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping {}/{}: {}", M::DIR, f, source_message(&err));
                    None
                }
            })
            .collect();

        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Returns the entry of kind `M` with the given slug, or None if there is
    /// no such entry or it cannot be parsed.
    pub fn by_slug<M: ContentMeta>(&self, slug: &str) -> Option<Entry<M>> {
        if let Err(err) = validate_slug(slug) {
            debug!("{err}");
            return None;
        }

        let filename = format!("{slug}.{CONTENT_EXTENSION}");
        match self.parse_entry::<M>(&filename) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("{}/{} not loaded: {}", M::DIR, slug, source_message(&err));
                None
            }
        }
    }

    /// Every file of every kind that fails to parse, with the reason. Used to
    /// validate a content tree before publishing it.
    pub fn check(&self) -> Result<Vec<(PathBuf, FolioError)>, FolioError> {
        let mut failures = Vec::new();
        self.check_kind::<ProjectMeta>(&mut failures)?;
        self.check_kind::<NoteMeta>(&mut failures)?;
        self.check_kind::<WorkMeta>(&mut failures)?;
        self.check_kind::<ArtworkMeta>(&mut failures)?;
        self.check_kind::<PhotoMeta>(&mut failures)?;
        Ok(failures)
    }

    fn check_kind<M: ContentMeta>(
        &self,
        failures: &mut Vec<(PathBuf, FolioError)>,
    ) -> Result<(), FolioError> {
        let files = self.content_files(M::DIR)?;
        let mut errors: Vec<_> = files
            .par_iter()
            .filter_map(|f| match self.parse_entry::<M>(f) {
                Ok(_) => None,
                Err(FolioError::ParseFile { path, source }) => Some((path, *source)),
                Err(err) => Some((self.kind_dir(M::DIR).join(f), err)),
            })
            .collect();
        failures.append(&mut errors);
        Ok(())
    }

    pub fn all_projects(&self) -> Result<Vec<Project>, FolioError> {
        self.all()
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<Project> {
        self.by_slug(slug)
    }

    pub fn all_notes(&self) -> Result<Vec<Note>, FolioError> {
        self.all()
    }

    pub fn note_by_slug(&self, slug: &str) -> Option<Note> {
        self.by_slug(slug)
    }

    pub fn all_artwork(&self) -> Result<Vec<Artwork>, FolioError> {
        self.all()
    }

    pub fn artwork_by_slug(&self, slug: &str) -> Option<Artwork> {
        self.by_slug(slug)
    }

    pub fn all_photos(&self) -> Result<Vec<Photo>, FolioError> {
        self.all()
    }

    pub fn photo_by_slug(&self, slug: &str) -> Option<Photo> {
        self.by_slug(slug)
    }

    pub fn all_works(&self) -> Result<Vec<Work>, FolioError> {
        self.all()
    }

    pub fn work_by_slug(&self, slug: &str) -> Option<Work> {
        self.by_slug(slug)
    }

    pub fn featured_works(&self) -> Result<Vec<Work>, FolioError> {
        let mut works = self.all_works()?;
        works.retain(|w| w.meta.featured);
        Ok(works)
    }

    pub fn works_by_category(&self, category: WorkCategory) -> Result<Vec<Work>, FolioError> {
        let mut works = self.all_works()?;
        works.retain(|w| w.meta.category == category);
        Ok(works)
    }

    /// Every tag used by the collection, sorted and without duplicates.
    pub fn all_tags(&self, source: TagSource) -> Result<Vec<String>, FolioError> {
        let tags = match source {
            TagSource::Projects => collect_tags(&self.all_projects()?),
            TagSource::Notes => collect_tags(&self.all_notes()?),
            TagSource::Works => collect_tags(&self.all_works()?),
        };
        Ok(tags)
    }

    /// Loads the collection behind `content_type` as JSON, which is what the
    /// content API hands out.
    pub fn to_json(&self, content_type: ContentType) -> Result<serde_json::Value, FolioError> {
        let value = match content_type {
            ContentType::Projects => to_json_value(&self.all_projects()?)?,
            ContentType::Notes => to_json_value(&self.all_notes()?)?,
            ContentType::Artwork => to_json_value(&self.all_artwork()?)?,
            ContentType::Photos => to_json_value(&self.all_photos()?)?,
        };
        Ok(value)
    }
}

fn to_json_value<T: Serialize>(items: &T) -> Result<serde_json::Value, FolioError> {
    Ok(serde_json::to_value(items)?)
}

fn parse_entry_file<M: ContentMeta>(path: &Path) -> Result<Entry<M>, FolioError> {
    let text = fs::read_to_string(path)?;
    let (front_matter, body): (FrontMatter<M>, _) = parse_front_matter(&text)?;

    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(Entry {
        slug,
        title: front_matter.title,
        date: front_matter.date,
        content: body.to_string(),
        reading_time: reading_time(body).text,
        meta: front_matter.meta,
    })
}

/// Unwraps the per-file wrapper so log lines do not repeat the path.
fn source_message(err: &FolioError) -> String {
    match err {
        FolioError::ParseFile { source, .. } => source.to_string(),
        err => err.to_string(),
    }
}

/// A slug must be a single, plain path component.
fn validate_slug(slug: &str) -> Result<(), FolioError> {
    let valid = !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0']);

    if valid {
        Ok(())
    } else {
        Err(FolioError::InvalidSlug(slug.to_string()))
    }
}

/// Newest first; entries on the same day are ordered by slug so that the
/// order does not depend on the file system.
pub fn sort_newest_first<M>(entries: &mut [Entry<M>]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

fn collect_tags<T: Tagged>(items: &[T]) -> Vec<String> {
    let tags: BTreeSet<&String> = items.iter().flat_map(|item| item.tags()).collect();
    tags.into_iter().cloned().collect()
}

/// The items that carry `tag`.
pub fn content_by_tag<'a, T: Tagged>(items: &'a [T], tag: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| item.tags().iter().any(|t| t == tag))
        .collect()
}

/// The entries whose title or body contains `query`, ignoring case.
pub fn search_content<'a, M>(items: &'a [Entry<M>], query: &str) -> Vec<&'a Entry<M>> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&query)
                || item.content.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::model::ProjectStatus;

    fn write(root: &Path, dir: &str, name: &str, text: &str) {
        let d = root.join(dir);
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join(name), text).unwrap();
    }

    fn project(title: &str, date: &str, tags: &[&str]) -> String {
        format!(
            "---\ntitle: {title}\ndate: {date}\nyear: 2024\nsummary: About {title}\ntags: [{}]\ntech: [Proxmox]\nstatus: ongoing\n---\nSome words about {title}.\n",
            tags.join(", ")
        )
    }

    fn store() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(root, "projects", "homelab.mdx", &project("Homelab", "2024-05-01", &["proxmox", "network"]));
        write(root, "projects", "firewall.mdx", &project("Firewall", "2024-07-12", &["network", "security"]));
        write(root, "projects", "old.mdx", &project("Old", "2022-01-01", &[]));
        write(root, "projects", "broken.mdx", "---\ntitle: Broken\n---\nNo date here");
        write(root, "projects", "readme.md", &project("Ignored", "2025-01-01", &[]));

        write(root, "notes", "ospf.mdx", "---\ntitle: OSPF areas\ndate: 2023-02-02\ntags: [network]\n---\nArea zero.");
        write(root, "notes", "bgp.mdx", "---\ntitle: BGP basics\ndate: 2023-02-02\ntags: [network]\n---\nPath vectors.");
        write(root, "notes", "vlans.mdx", "---\ntitle: VLANs explained\ndate: 2023-02-02\ntags: [network]\n---\nTrunk ports carry tagged frames.");

        write(root, "works", "render.mdx", "---\ntitle: Render\ndate: 2024-01-01\ncategory: 3d\nfeatured: true\ntags: [blender]\nimages:\n  - { src: /r.png, alt: Render, w: 800, h: 600 }\n---\n");
        write(root, "works", "poster.mdx", "---\ntitle: Poster\ndate: 2024-02-01\ncategory: design\ntags: [print, blender]\n---\n");

        write(root, "photo", "coast.mdx", "---\ntitle: Coast\ndate: 2024-08-08\nsummary: Waves\nimages: []\nmeta:\n  exif: { camera: X100V, lens: 23mm, iso: 160, shutter: 1/500, aperture: f/8 }\n---\n");

        let store = ContentStore::new(root);
        (tmp, store)
    }

    #[test]
    fn missing_directory_has_no_content() {
        let (_tmp, store) = store();
        assert!(store.content_files("nothing-here").unwrap().is_empty());
        assert!(store.all_artwork().unwrap().is_empty());
    }

    #[test]
    fn only_mdx_files_are_listed() {
        let (_tmp, store) = store();
        let files = store.content_files("projects").unwrap();
        assert_eq!(files, vec!["broken.mdx", "firewall.mdx", "homelab.mdx", "old.mdx"]);
    }

    #[test]
    fn all_is_sorted_newest_first_and_skips_broken_files() {
        let (_tmp, store) = store();
        let projects = store.all_projects().unwrap();
        let slugs: Vec<_> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["firewall", "homelab", "old"]);
    }

    #[test]
    fn same_day_entries_are_ordered_by_slug() {
        let (_tmp, store) = store();
        let notes = store.all_notes().unwrap();
        let slugs: Vec<_> = notes.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, vec!["bgp", "ospf", "vlans"]);
    }

    #[test]
    fn entry_fields_are_populated() {
        let (_tmp, store) = store();
        let p = store.project_by_slug("homelab").unwrap();
        assert_eq!(p.title, "Homelab");
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(p.content, "Some words about Homelab.\n");
        assert_eq!(p.reading_time, "1 min read");
        assert_eq!(p.meta.status, ProjectStatus::Ongoing);
        assert_eq!(p.meta.tech, vec!["Proxmox"]);
        assert_eq!(p.meta.year, 2024);
    }

    #[test]
    fn by_slug_returns_none_on_failure() {
        let (_tmp, store) = store();
        assert!(store.project_by_slug("does-not-exist").is_none());
        assert!(store.project_by_slug("broken").is_none());
        assert!(store.project_by_slug("../notes/vlans").is_none());
        assert!(store.project_by_slug("").is_none());
    }

    #[test]
    fn featured_and_category_filters() {
        let (_tmp, store) = store();
        let featured = store.featured_works().unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].slug, "render");

        let design = store.works_by_category(WorkCategory::Design).unwrap();
        assert_eq!(design.len(), 1);
        assert_eq!(design[0].slug, "poster");
        assert!(store.works_by_category(WorkCategory::WebDev).unwrap().is_empty());
    }

    #[test]
    fn tags_are_unique_and_sorted() {
        let (_tmp, store) = store();
        assert_eq!(
            store.all_tags(TagSource::Projects).unwrap(),
            vec!["network", "proxmox", "security"]
        );
        assert_eq!(store.all_tags(TagSource::Works).unwrap(), vec!["blender", "print"]);
    }

    #[test]
    fn filter_by_tag() {
        let (_tmp, store) = store();
        let projects = store.all_projects().unwrap();
        let tagged = content_by_tag(&projects, "proxmox");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].slug, "homelab");
    }

    #[test]
    fn search_matches_title_and_body_ignoring_case() {
        let (_tmp, store) = store();
        let projects = store.all_projects().unwrap();
        assert_eq!(search_content(&projects, "FIREWALL").len(), 1);
        assert_eq!(search_content(&projects, "some words").len(), 3);
        assert!(search_content(&projects, "kubernetes").is_empty());

        let notes = store.all_notes().unwrap();
        assert_eq!(search_content(&notes, "tagged frames").len(), 1);
    }

    #[test]
    fn photo_exif_is_read() {
        let (_tmp, store) = store();
        let photo = store.photo_by_slug("coast").unwrap();
        let exif = photo.meta.meta.unwrap().exif.unwrap();
        assert_eq!(exif.camera, "X100V");
        assert_eq!(exif.iso, 160);
    }

    #[test]
    fn check_reports_broken_files() {
        let (_tmp, store) = store();
        let failures = store.check().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].0.ends_with("projects/broken.mdx"));
    }

    #[test]
    fn json_for_content_type() {
        let (_tmp, store) = store();
        let json = store.to_json(ContentType::Photos).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["slug"], "coast");
        assert_eq!(json[0]["meta"]["exif"]["aperture"], "f/8");
    }
}
