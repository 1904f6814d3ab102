use std::{thread, time::Duration};

use anyhow::Context;
use folio_core::{cms::CmsClient, content::ContentStore, site::load_site_config};
use folioweb::{app, AppState};
use tracing::{info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configure_tracing();

    let args = args::parse_args();
    let site = load_site_config(&args.site)
        .with_context(|| format!("Could not load site configuration {:?}", args.site))?;
    let store = ContentStore::new(&args.content);
    info!("Serving content from {:?}", store.root());

    let cms = match &args.cms_url {
        Some(url) => Some(
            CmsClient::new(url.as_str(), args.cms_token.as_str())?
                .with_revalidate(Duration::from_secs(args.revalidate)),
        ),
        None => {
            warn!("No CMS url given, notes and works from the CMS will not be shown");
            None
        }
    };

    let app = app(AppState::new(site, store, cms));

    // Bind to the requested (or a random) port, then use a background thread
    // to open the correct URL in the browser if asked to.
    let listener =
        tokio::net::TcpListener::bind((args.host.as_str(), args.port.unwrap_or(0))).await?;
    let addr = listener.local_addr()?;
    let url = format!("http://localhost:{}", addr.port());
    info!("Listening on {url}");

    if args.auto_open {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs_f32(0.5));
            // Ignore any errors, this is a "nice-to-have" anyway.
            let _ = opener::open_browser(url);
        });
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn configure_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE) // Makes #[instrument] output something
        .init();
}
