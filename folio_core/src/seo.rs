//! The sitemap and robots.txt served to crawlers.

use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use chrono::NaiveDate;
use log::info;
use logging_timer::time;

use crate::{
    byte_counter::ByteCounter,
    content::ContentStore,
    dates::format_iso_date,
    error::FolioError,
    model::{ContentMeta, Entry},
    site::SiteConfig,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ChangeFrequency::Always => write!(f, "always"),
            ChangeFrequency::Hourly => write!(f, "hourly"),
            ChangeFrequency::Daily => write!(f, "daily"),
            ChangeFrequency::Weekly => write!(f, "weekly"),
            ChangeFrequency::Monthly => write!(f, "monthly"),
            ChangeFrequency::Yearly => write!(f, "yearly"),
            ChangeFrequency::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// The pages that exist regardless of content: (path, frequency, priority).
const STATIC_PAGES: [(&str, ChangeFrequency, f32); 8] = [
    ("", ChangeFrequency::Weekly, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.8),
    ("/contact", ChangeFrequency::Monthly, 0.7),
    ("/projects", ChangeFrequency::Weekly, 0.9),
    ("/notes", ChangeFrequency::Weekly, 0.8),
    ("/works", ChangeFrequency::Weekly, 0.8),
    ("/art", ChangeFrequency::Monthly, 0.7),
    ("/photo", ChangeFrequency::Monthly, 0.7),
];

/// Accumulates sitemap entries for a site.
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    base_url: String,
    today: NaiveDate,
    entries: Vec<SitemapEntry>,
}

impl SitemapBuilder {
    pub fn new(site: &SiteConfig, today: NaiveDate) -> Self {
        Self {
            base_url: site.base_url().to_string(),
            today,
            entries: Vec::new(),
        }
    }

    /// Adds the fixed pages, all last modified `today`.
    pub fn static_pages(mut self) -> Self {
        for (path, change_frequency, priority) in STATIC_PAGES {
            self.entries.push(SitemapEntry {
                url: format!("{}{}", self.base_url, path),
                last_modified: self.today,
                change_frequency,
                priority,
            });
        }
        self
    }

    /// Adds one page per `(slug, date)` under `/{section}/`.
    pub fn section<I, S>(
        mut self,
        section: &str,
        pages: I,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) -> Self
    where
        I: IntoIterator<Item = (S, NaiveDate)>,
        S: AsRef<str>,
    {
        for (slug, last_modified) in pages {
            self.entries.push(SitemapEntry {
                url: format!("{}/{}/{}", self.base_url, section, slug.as_ref()),
                last_modified,
                change_frequency,
                priority,
            });
        }
        self
    }

    /// Adds one page per local entry under `/{section}/`.
    pub fn entries<M: ContentMeta>(
        self,
        section: &str,
        entries: &[Entry<M>],
        change_frequency: ChangeFrequency,
        priority: f32,
    ) -> Self {
        let pages = entries.iter().map(|e| (e.slug.as_str(), e.date));
        self.section(section, pages, change_frequency, priority)
    }

    pub fn build(self) -> Vec<SitemapEntry> {
        self.entries
    }
}

/// The sitemap for the local content: the static pages followed by projects,
/// notes, art and photos.
#[time]
pub fn build_sitemap(
    site: &SiteConfig,
    store: &ContentStore,
    today: NaiveDate,
) -> Result<Vec<SitemapEntry>, FolioError> {
    let entries = SitemapBuilder::new(site, today)
        .static_pages()
        .entries("projects", &store.all_projects()?, ChangeFrequency::Monthly, 0.8)
        .entries("notes", &store.all_notes()?, ChangeFrequency::Monthly, 0.7)
        .entries("art", &store.all_artwork()?, ChangeFrequency::Monthly, 0.6)
        .entries("photo", &store.all_photos()?, ChangeFrequency::Monthly, 0.6)
        .build();
    Ok(entries)
}

/// Writes the sitemap XML to a file.
pub fn write_sitemap_to_file<P: AsRef<Path>>(
    output_file: P,
    entries: &[SitemapEntry],
) -> Result<(), FolioError> {
    let output_file = output_file.as_ref();

    let file = match File::create(output_file) {
        Ok(f) => f,
        Err(err) => {
            return Err(FolioError::CreateFile {
                path: output_file.to_owned(),
                source: err,
            })
        }
    };

    let w = BufWriter::new(file);
    let mut w = ByteCounter::new(w);
    write_sitemap(&mut w, entries)?;
    info!(
        "Wrote sitemap {:?} with {} urls, {} bytes",
        output_file,
        entries.len(),
        w.bytes_written()
    );
    Ok(())
}

/// Writes the sitemap in the sitemaps.org XML format.
pub fn write_sitemap<W: Write>(w: &mut W, entries: &[SitemapEntry]) -> Result<(), FolioError> {
    writeln!(w, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        w,
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"
    )?;

    for entry in entries {
        writeln!(w, "<url>")?;
        writeln!(w, "<loc>{}</loc>", escape_xml(&entry.url))?;
        writeln!(
            w,
            "<lastmod>{}</lastmod>",
            format_iso_date(entry.last_modified)
        )?;
        writeln!(w, "<changefreq>{}</changefreq>", entry.change_frequency)?;
        writeln!(w, "<priority>{:.1}</priority>", entry.priority)?;
        writeln!(w, "</url>")?;
    }

    writeln!(w, "</urlset>")?;
    w.flush()?;
    Ok(())
}

/// Convenience wrapper around [`write_sitemap`].
pub fn sitemap_xml(entries: &[SitemapEntry]) -> Result<String, FolioError> {
    let mut buf = Vec::new();
    write_sitemap(&mut buf, entries)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Paths crawlers are asked to stay out of.
pub const DISALLOWED_PATHS: [&str; 2] = ["/api/", "/admin/"];

/// The robots.txt for the site.
pub fn robots_txt(site: &SiteConfig) -> String {
    let mut s = String::from("User-Agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        s.push_str(&format!("Disallow: {path}\n"));
    }
    s.push_str(&format!("\nSitemap: {}/sitemap.xml\n", site.base_url()));
    s
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn site() -> SiteConfig {
        SiteConfig {
            url: "https://example.org/".into(),
            ..Default::default()
        }
    }

    #[test]
    fn static_pages_use_today() {
        let today = ymd(2025, 10, 1);
        let entries = SitemapBuilder::new(&site(), today).static_pages().build();
        assert_eq!(entries.len(), STATIC_PAGES.len());
        assert_eq!(entries[0].url, "https://example.org");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[3].url, "https://example.org/projects");
        assert!(entries.iter().all(|e| e.last_modified == today));
    }

    #[test]
    fn sitemap_from_content_store() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("notes");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("dns.mdx"), "---\ntitle: DNS\ndate: 2024-04-04\n---\nBody").unwrap();

        let store = ContentStore::new(tmp.path());
        let entries = build_sitemap(&site(), &store, ymd(2025, 1, 1)).unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.url, "https://example.org/notes/dns");
        assert_eq!(last.last_modified, ymd(2024, 4, 4));
        assert_eq!(last.change_frequency, ChangeFrequency::Monthly);
        assert_eq!(last.priority, 0.7);
    }

    #[test]
    fn xml_is_escaped_and_well_formed() {
        let entries = SitemapBuilder::new(&site(), ymd(2025, 1, 2))
            .section("works", [("a&b", ymd(2024, 1, 1))], ChangeFrequency::Yearly, 0.5)
            .build();
        let xml = sitemap_xml(&entries).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.org/works/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01</lastmod>"));
        assert!(xml.contains("<changefreq>yearly</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_file_is_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitemap.xml");
        let entries = SitemapBuilder::new(&site(), ymd(2025, 1, 2)).static_pages().build();
        write_sitemap_to_file(&path, &entries).unwrap();
        let xml = fs::read_to_string(&path).unwrap();
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = robots_txt(&site());
        assert_eq!(
            robots,
            "User-Agent: *\nAllow: /\nDisallow: /api/\nDisallow: /admin/\n\nSitemap: https://example.org/sitemap.xml\n"
        );
    }
}
