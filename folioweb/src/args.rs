use std::path::PathBuf;

use clap::{arg, command, Parser};

pub fn parse_args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        help = "Specify a port to serve the site on. If not specified, a random unused port is chosen."
    )]
    pub port: Option<u16>,

    #[arg(
        long,
        default_value = "0.0.0.0",
        help = "The address to bind to."
    )]
    pub host: String,

    #[arg(
        short,
        long,
        default_value = "false",
        help = "Whether to automatically open the website in the browser."
    )]
    pub auto_open: bool,

    #[arg(
        short,
        long,
        default_value = "content",
        help = "The content root holding the 'projects', 'notes', 'works', 'art' and 'photo' directories."
    )]
    pub content: PathBuf,

    #[arg(
        short,
        long,
        default_value = "site.yaml",
        help = "The site configuration file. Defaults are used if it does not exist."
    )]
    pub site: PathBuf,

    #[arg(
        long,
        env = "STRAPI_BASE_URL",
        help = "Base url of the CMS, e.g. 'http://192.168.10.41:1337'. \
        Without it the CMS backed pages are empty."
    )]
    pub cms_url: Option<String>,

    #[arg(
        long,
        env = "STRAPI_API_TOKEN",
        default_value = "",
        hide_env_values = true,
        help = "Bearer token for the CMS."
    )]
    pub cms_token: String,

    #[arg(
        long,
        default_value = "60",
        help = "Seconds a CMS response is reused before it is fetched again. 0 disables caching."
    )]
    pub revalidate: u64,
}
