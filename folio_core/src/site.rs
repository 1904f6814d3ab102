//! Identity of the site: name, links and a few presentation switches. Read
//! from a YAML file, every field falling back to the built-in defaults.

use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::FolioError;

pub const DEFAULT_SITE_URL: &str = "https://jqiu006.com";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryLayout {
    #[default]
    Masonry,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub github: String,
    pub linkedin: String,
    pub email: String,
}

impl Default for Social {
    fn default() -> Self {
        Self {
            github: "https://github.com/jqiu006".into(),
            linkedin: "https://linkedin.com/in/jinhui-qiu".into(),
            email: "jqiu006@gmail.com".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub accent: String,
    pub enable_typewriter: bool,
    pub gallery_layout: GalleryLayout,
    pub social: Social,
    pub currently_learning: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Jinhui (Chris) Qiu".into(),
            tagline: "IT Support & Security-Minded Technologist".into(),
            description: "Personal portfolio showcasing IT/Homelab projects, security research, \
                and creative works including digital art and photography."
                .into(),
            url: DEFAULT_SITE_URL.into(),
            accent: "#00E5A8".into(),
            enable_typewriter: true,
            gallery_layout: GalleryLayout::Masonry,
            social: Social::default(),
            currently_learning: vec![
                "Advanced Proxmox Clustering".into(),
                "Kubernetes Security".into(),
                "Zero Trust Architecture".into(),
                "Unreal Engine 5 Blueprints".into(),
            ],
        }
    }
}

impl SiteConfig {
    /// The base url for absolute links, without a trailing slash. Falls back
    /// to [`DEFAULT_SITE_URL`] when none is configured.
    pub fn base_url(&self) -> &str {
        let url = self.url.trim_end_matches('/');
        if url.is_empty() {
            DEFAULT_SITE_URL
        } else {
            url
        }
    }

    /// Formats a page title the way every page does, e.g. "Notes | Name".
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(t) => format!("{} | {}", t, self.name),
            None => self.name.clone(),
        }
    }
}

/// Loads the site configuration from `path`. A missing file gives the
/// defaults, a malformed one is an error.
pub fn load_site_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig, FolioError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No site configuration at {:?}, using defaults", path);
        return Ok(SiteConfig::default());
    }

    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(SiteConfig::default());
    }

    let config = serde_yaml::from_str(&text)?;
    info!("Loaded site configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_site_config(tmp.path().join("site.yaml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.yaml");
        fs::write(
            &path,
            "name: Someone\nurl: https://example.org/\ngallery_layout: grid\nsocial:\n  email: me@example.org\n",
        )
        .unwrap();

        let config = load_site_config(&path).unwrap();
        assert_eq!(config.name, "Someone");
        assert_eq!(config.base_url(), "https://example.org");
        assert_eq!(config.gallery_layout, GalleryLayout::Grid);
        assert_eq!(config.social.email, "me@example.org");
        assert_eq!(config.social.github, Social::default().github);
        assert!(config.enable_typewriter);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.yaml");
        fs::write(&path, "name: [unclosed\n").unwrap();
        assert!(matches!(load_site_config(&path), Err(FolioError::Yaml(_))));
    }

    #[test]
    fn empty_url_falls_back() {
        let config = SiteConfig {
            url: String::new(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), DEFAULT_SITE_URL);
        assert_eq!(config.page_title(Some("Notes")), "Notes | Jinhui (Chris) Qiu");
    }
}
