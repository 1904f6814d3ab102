//! Markdown to HTML, plus the table of contents shown next to long entries.
//! Both come out of the same pass over the parsed document, so TOC links
//! always land on the rendered headings.

use std::{collections::HashMap, sync::LazyLock};

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

static NOT_SLUG_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("slug regex is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// A rendered document and its headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Turns a heading into an anchor id: lower-cased, anything other than ASCII
/// letters, digits, whitespace and '-' removed, whitespace runs replaced by
/// '-'.
pub fn heading_id(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NOT_SLUG_CHAR.replace_all(&lower, "");
    WHITESPACE.replace_all(&stripped, "-").into_owned()
}

/// Hands out unique ids. A repeated heading gets "-1", "-2"... appended,
/// skipping any suffixed id that is already taken.
#[derive(Default)]
struct IdAllocator {
    seen: HashMap<String, usize>,
}

impl IdAllocator {
    fn allocate(&mut self, title: &str) -> String {
        let base = heading_id(title);
        let mut id = base.clone();

        while self.seen.contains_key(&id) {
            let n = {
                let count = self.seen.entry(base.clone()).or_insert(0);
                *count += 1;
                *count
            };
            id = format!("{base}-{n}");
        }

        self.seen.insert(id.clone(), 0);
        id
    }
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Renders GitHub flavoured markdown to HTML and collects its headings.
/// Every heading gets an id and its contents are wrapped in an
/// `<a class="anchor">` pointing at itself.
pub fn render_with_toc(content: &str) -> RenderedMarkdown {
    let mut toc = Vec::new();
    let events = link_headings(Parser::new_ext(content, options()), &mut toc);

    let mut html = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut html, events.into_iter());
    RenderedMarkdown { html, toc }
}

/// The headings of `content`, as they appear in the rendered HTML.
pub fn generate_table_of_contents(content: &str) -> Vec<TocEntry> {
    render_with_toc(content).toc
}

pub fn render_markdown(content: &str) -> String {
    render_with_toc(content).html
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn link_headings<'a, I>(mut iter: I, toc: &mut Vec<TocEntry>) -> Vec<Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut ids = IdAllocator::default();
    let mut out = Vec::new();

    while let Some(event) = iter.next() {
        let (level, id, classes, attrs) = match event {
            Event::Start(Tag::Heading { level, id, classes, attrs }) => (level, id, classes, attrs),
            other => {
                out.push(other);
                continue;
            }
        };

        let mut inner = Vec::new();
        let mut text = String::new();
        for ev in iter.by_ref() {
            match &ev {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            inner.push(ev);
        }

        let id = match id {
            Some(explicit) => explicit,
            None => CowStr::from(ids.allocate(&text)),
        };

        toc.push(TocEntry {
            id: id.to_string(),
            title: text.trim().to_string(),
            level: level_number(level),
        });

        out.push(Event::Start(Tag::Heading {
            level,
            id: Some(id.clone()),
            classes,
            attrs,
        }));
        out.push(Event::Html(CowStr::from(format!(
            "<a class=\"anchor\" href=\"#{}\">",
            &*id
        ))));
        out.extend(inner);
        out.push(Event::Html(CowStr::from("</a>")));
        out.push(Event::End(TagEnd::Heading(level)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_id_strips_punctuation() {
        assert_eq!(heading_id("Setting up VLANs (part 2)!"), "setting-up-vlans-part-2");
        assert_eq!(heading_id("  Zero   Trust "), "-zero-trust-");
        assert_eq!(heading_id("pfSense & OPNsense"), "pfsense-opnsense");
    }

    #[test]
    fn toc_finds_all_levels() {
        let md = "# Intro\ntext\n## Setup Steps\n### Step 1\nnot#a heading\n####### too deep\n";
        let toc = generate_table_of_contents(md);
        assert_eq!(
            toc,
            vec![
                TocEntry { id: "intro".into(), title: "Intro".into(), level: 1 },
                TocEntry { id: "setup-steps".into(), title: "Setup Steps".into(), level: 2 },
                TocEntry { id: "step-1".into(), title: "Step 1".into(), level: 3 },
            ]
        );
    }

    #[test]
    fn toc_deduplicates_ids() {
        let toc = generate_table_of_contents("## Notes\n## Notes\n## Notes\n");
        let ids: Vec<_> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-1", "notes-2"]);
    }

    #[test]
    fn headings_get_ids_and_anchors() {
        let html = render_markdown("## Network Layout\n\nBody text.\n");
        assert!(html.contains(
            "<h2 id=\"network-layout\"><a class=\"anchor\" href=\"#network-layout\">Network Layout</a></h2>"
        ));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn rendered_ids_match_toc() {
        let md = "# Intro\n\n## Intro\n\n## Wrap `up`\n";
        let html = render_markdown(md);
        for entry in generate_table_of_contents(md) {
            assert!(
                html.contains(&format!("id=\"{}\"", entry.id)),
                "missing id {} in {}",
                entry.id,
                html
            );
        }
    }

    #[test]
    fn suffixed_ids_are_never_reused() {
        let toc = generate_table_of_contents("## Notes\n## Notes\n## Notes 1\n## Notes\n");
        let ids: Vec<_> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-1", "notes-1-1", "notes-2"]);
    }

    #[test]
    fn code_blocks_do_not_produce_headings() {
        let md = "```bash\n# Install\napt install unbound\n```\n\n## Install\n";
        let rendered = render_with_toc(md);
        assert_eq!(
            rendered.toc,
            vec![TocEntry { id: "install".into(), title: "Install".into(), level: 2 }]
        );
        assert!(rendered.html.contains("<h2 id=\"install\">"));
        assert!(rendered.html.contains("# Install"));
    }

    #[test]
    fn toc_uses_rendered_heading_text() {
        let rendered = render_with_toc("## See [the docs](https://example.org)\n");
        assert_eq!(rendered.toc[0].id, "see-the-docs");
        assert_eq!(rendered.toc[0].title, "See the docs");
        assert!(rendered.html.contains("id=\"see-the-docs\""));
        assert!(rendered.html.contains("href=\"#see-the-docs\""));
    }

    #[test]
    fn gfm_extensions_are_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }
}
