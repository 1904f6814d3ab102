use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use folio_core::{
    cms::{entry_naive_date, CmsClient, CmsEntry},
    seo::{robots_txt, sitemap_xml, ChangeFrequency, SitemapBuilder},
    FolioError,
};
use tracing::{instrument, warn};

use crate::{error::ApiResult, state::AppState};

/// The sitemap of the local content, plus whatever the CMS holds when it is
/// reachable. A CMS failure only loses the CMS pages.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let today = chrono::Local::now().date_naive();

    let (projects, notes, artwork, photos) = state
        .local(|store| -> Result<_, FolioError> {
            Ok((
                store.all_projects()?,
                store.all_notes()?,
                store.all_artwork()?,
                store.all_photos()?,
            ))
        })
        .await??;

    let mut builder = SitemapBuilder::new(&state.site, today)
        .static_pages()
        .entries("projects", &projects, ChangeFrequency::Monthly, 0.8)
        .entries("notes", &notes, ChangeFrequency::Monthly, 0.7)
        .entries("art", &artwork, ChangeFrequency::Monthly, 0.6)
        .entries("photo", &photos, ChangeFrequency::Monthly, 0.6);

    if let Some(cms) = &state.cms {
        builder = add_cms_pages(builder, cms).await;
    }

    let xml = sitemap_xml(&builder.build())?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

async fn add_cms_pages(mut builder: SitemapBuilder, cms: &CmsClient) -> SitemapBuilder {
    match cms.all_projects().await {
        Ok(items) => builder = builder.section("projects", dated(&items), ChangeFrequency::Monthly, 0.8),
        Err(err) => warn!("Leaving CMS projects out of the sitemap: {err}"),
    }

    match cms.all_tech_notes().await {
        Ok(items) => builder = builder.section("notes", dated(&items), ChangeFrequency::Monthly, 0.7),
        Err(err) => warn!("Leaving CMS notes out of the sitemap: {err}"),
    }

    match cms.all_works().await {
        Ok(items) => builder = builder.section("works", dated(&items), ChangeFrequency::Monthly, 0.7),
        Err(err) => warn!("Leaving CMS works out of the sitemap: {err}"),
    }

    builder
}

/// (document id, date) for every entry that has a usable date.
fn dated<E: CmsEntry>(items: &[E]) -> Vec<(String, chrono::NaiveDate)> {
    items
        .iter()
        .filter_map(|e| entry_naive_date(e).map(|d| (e.document_id().to_string(), d)))
        .collect()
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], robots_txt(&state.site))
}
