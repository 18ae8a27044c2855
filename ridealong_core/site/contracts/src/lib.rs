use chrono::{DateTime, Utc};
use ridealong_models::site::WebManifest;

/// Machine readable metadata about the marketing site.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SiteService: Send + Sync + 'static {
    fn manifest(&self) -> WebManifest;

    /// Renders the XML sitemap, using `now` as modification time of every
    /// page.
    fn sitemap(&self, now: DateTime<Utc>) -> anyhow::Result<String>;

    fn robots(&self) -> anyhow::Result<String>;
}
