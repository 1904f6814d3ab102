use std::{fs, io::Write, path::Path};

use anyhow::{bail, Context, Result};
use args::{parse_args, Args, Command, Kind};
use clap::builder::styling::AnsiColor;
use env_logger::Builder;
use folio_core::{
    content::{search_content, ContentStore},
    dates::format_iso_date,
    frontmatter::split_front_matter,
    markdown::generate_table_of_contents,
    model::{ContentMeta, Entry},
    seo::{build_sitemap, robots_txt, sitemap_xml, write_sitemap_to_file},
    site::{load_site_config, SiteConfig},
};
use log::{debug, error, info, logger};
use logging_timer::time;

mod args;

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

#[time]
fn main() -> Result<()> {
    configure_logging();
    let result = main2();
    logger().flush();
    result
}

fn main2() -> Result<()> {
    info!("Starting {PROGRAM_NAME}");

    let args = parse_args();
    debug!("{:?}", &args);

    let store = ContentStore::new(&args.content);
    let site = load_site_config(&args.site)
        .with_context(|| format!("Could not load site configuration {:?}", args.site))?;

    match &args.command {
        Command::List { kind, json } => list(&store, *kind, *json),
        Command::Check => check(&store),
        Command::Tags { source } => {
            for tag in store.all_tags(*source)? {
                println!("{tag}");
            }
            Ok(())
        }
        Command::Search { kind, query } => search(&store, *kind, query),
        Command::Toc { file } => toc(file),
        Command::Sitemap { out } => sitemap(&args, &site, &store, out.as_deref()),
        Command::Robots => {
            print!("{}", robots_txt(&site));
            Ok(())
        }
    }
}

fn list(store: &ContentStore, kind: Kind, json: bool) -> Result<()> {
    match kind {
        Kind::Projects => print_entries(&store.all_projects()?, json),
        Kind::Notes => print_entries(&store.all_notes()?, json),
        Kind::Works => print_entries(&store.all_works()?, json),
        Kind::Art => print_entries(&store.all_artwork()?, json),
        Kind::Photo => print_entries(&store.all_photos()?, json),
    }
}

fn print_entries<M: ContentMeta>(entries: &[Entry<M>], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    for e in entries {
        println!(
            "{}  {:<30}  {}  ({})",
            format_iso_date(e.date),
            e.slug,
            e.title,
            e.reading_time
        );
    }

    Ok(())
}

fn print_matches<M>(matches: &[&Entry<M>]) {
    for e in matches {
        println!("{}  {:<30}  {}", format_iso_date(e.date), e.slug, e.title);
    }
    info!("{} matches", matches.len());
}

fn search(store: &ContentStore, kind: Kind, query: &str) -> Result<()> {
    match kind {
        Kind::Projects => print_matches(&search_content(&store.all_projects()?, query)),
        Kind::Notes => print_matches(&search_content(&store.all_notes()?, query)),
        Kind::Works => print_matches(&search_content(&store.all_works()?, query)),
        Kind::Art => print_matches(&search_content(&store.all_artwork()?, query)),
        Kind::Photo => print_matches(&search_content(&store.all_photos()?, query)),
    }
    Ok(())
}

#[time]
fn check(store: &ContentStore) -> Result<()> {
    let failures = store.check()?;
    if failures.is_empty() {
        info!("All content under {:?} parsed successfully", store.root());
        return Ok(());
    }

    for (path, err) in &failures {
        error!("{:?}: {}", path, err);
    }
    bail!("{} content file(s) failed to parse", failures.len());
}

fn toc(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("Could not read {:?}", file))?;
    let (_, body) = split_front_matter(&text)?;

    for entry in generate_table_of_contents(body) {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        println!("{indent}- {} (#{})", entry.title, entry.id);
    }

    Ok(())
}

fn sitemap(args: &Args, site: &SiteConfig, store: &ContentStore, out: Option<&Path>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let entries = build_sitemap(site, store, today)
        .with_context(|| format!("Could not build the sitemap from {:?}", args.content))?;

    match out {
        Some(path) => write_sitemap_to_file(path, &entries)?,
        None => print!("{}", sitemap_xml(&entries)?),
    }

    Ok(())
}

fn configure_logging() {
    // Info and above unless RUST_LOG says otherwise.
    let mut builder = Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();

    builder.format(|buf, record| {
        let level_style = buf.default_level_style(record.level());
        let level_style = match record.level() {
            log::Level::Error => level_style.fg_color(Some(AnsiColor::Red.into())),
            log::Level::Warn => level_style.fg_color(Some(AnsiColor::Yellow.into())),
            log::Level::Info => level_style.fg_color(Some(AnsiColor::Green.into())),
            log::Level::Debug => level_style.fg_color(Some(AnsiColor::Blue.into())),
            log::Level::Trace => level_style.fg_color(Some(AnsiColor::Magenta.into())),
        };

        match (record.file(), record.line()) {
            (Some(file), Some(line)) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                file,
                line,
                record.args()
            ),
            _ => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            ),
        }
    });

    builder.init();
}
