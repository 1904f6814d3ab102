use std::sync::Arc;

use folio_core::{cms::CmsClient, content::ContentStore, site::SiteConfig};

use crate::error::{ApiError, ApiResult};

/// Everything the handlers share.
#[derive(Debug, Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub store: Arc<ContentStore>,
    pub cms: Option<Arc<CmsClient>>,
}

impl AppState {
    pub fn new(site: SiteConfig, store: ContentStore, cms: Option<CmsClient>) -> Self {
        Self {
            site: Arc::new(site),
            store: Arc::new(store),
            cms: cms.map(Arc::new),
        }
    }

    /// Runs `f` against the content store on the blocking pool, since it
    /// reads from the file system.
    pub async fn local<F, T>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&ContentStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|err| ApiError::server_error().message(err.to_string()))
    }
}
