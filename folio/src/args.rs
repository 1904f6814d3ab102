use std::{path::PathBuf, str::FromStr};

use clap::{arg, command, Parser, Subcommand, ValueEnum};
use folio_core::model::TagSource;

pub fn parse_args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "content",
        help = "The content root. Contains one directory per kind of content \
        ('projects', 'notes', 'works', 'art', 'photo'), each holding .mdx files."
    )]
    pub content: PathBuf,

    #[arg(
        short,
        long,
        default_value = "site.yaml",
        help = "The site configuration file. Defaults are used if it does not exist."
    )]
    pub site: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the entries of one kind of content, newest first.
    List {
        kind: Kind,
        #[arg(long, help = "Print the entries as JSON instead of a table.")]
        json: bool,
    },
    /// Parse every content file and report the ones that fail.
    Check,
    /// Print every tag used by a collection.
    Tags {
        #[arg(value_parser = parse_tag_source, help = "One of 'projects', 'notes', 'works'.")]
        source: TagSource,
    },
    /// Search titles and bodies of one kind of content.
    Search { kind: Kind, query: String },
    /// Print the table of contents of a content file.
    Toc { file: PathBuf },
    /// Write the sitemap for the local content.
    Sitemap {
        #[arg(short, long, help = "Output file. Printed to stdout if not specified.")]
        out: Option<PathBuf>,
    },
    /// Print robots.txt.
    Robots,
}

/// The kinds of local content.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Projects,
    Notes,
    Works,
    Art,
    Photo,
}

fn parse_tag_source(s: &str) -> Result<TagSource, String> {
    TagSource::from_str(s).map_err(|e| e.to_string())
}
