use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use ridealong_core_site_contracts::SiteService;
use ridealong_models::site::{
    ChangeFrequency, ManifestDisplay, ManifestIcon, SitemapEntry, WebManifest,
};
use serde::Serialize;
use tera::Tera;
use url::Url;

const ICON_SIZES: [u32; 2] = [192, 512];

const SITEMAP_TEMPLATE: &str = include_str!("../templates/sitemap.xml");
const ROBOTS_TEMPLATE: &str = include_str!("../templates/robots.txt");

#[derive(Debug, Clone)]
pub struct SiteServiceImpl {
    config: SiteServiceConfig,
    templates: Arc<Tera>,
}

#[derive(Debug, Clone)]
pub struct SiteServiceConfig {
    pub url: Arc<Url>,
    pub name: Arc<str>,
    pub short_name: Arc<str>,
    pub description: Arc<str>,
    pub background_color: Arc<str>,
    pub theme_color: Arc<str>,
    pub icon: Arc<str>,
}

impl SiteServiceImpl {
    pub fn new(config: SiteServiceConfig) -> anyhow::Result<Self> {
        // templates are plain text, values are escaped explicitly
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates([("sitemap", SITEMAP_TEMPLATE), ("robots", ROBOTS_TEMPLATE)])
            .context("Failed to load site templates")?;

        Ok(Self {
            config,
            templates: tera.into(),
        })
    }

    fn sitemap_url(&self) -> anyhow::Result<Url> {
        self.config
            .url
            .join("/sitemap.xml")
            .context("Failed to build sitemap url")
    }
}

#[derive(Serialize)]
struct SitemapContext {
    entries: Vec<SitemapEntry>,
}

#[derive(Serialize)]
struct RobotsContext {
    sitemap: Url,
}

impl SiteService for SiteServiceImpl {
    fn manifest(&self) -> WebManifest {
        WebManifest {
            name: self.config.name.to_string(),
            short_name: self.config.short_name.to_string(),
            description: self.config.description.to_string(),
            start_url: "/".into(),
            display: ManifestDisplay::Standalone,
            background_color: self.config.background_color.to_string(),
            theme_color: self.config.theme_color.to_string(),
            icons: ICON_SIZES
                .iter()
                .map(|size| ManifestIcon {
                    src: self.config.icon.to_string(),
                    sizes: format!("{size}x{size}"),
                    mime_type: "image/png".into(),
                })
                .collect(),
        }
    }

    fn sitemap(&self, now: DateTime<Utc>) -> anyhow::Result<String> {
        let context = SitemapContext {
            entries: vec![SitemapEntry {
                location: (*self.config.url).clone(),
                last_modified: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                change_frequency: ChangeFrequency::Weekly,
                priority: 1.0,
            }],
        };
        let context = tera::Context::from_serialize(context)?;
        self.templates
            .render("sitemap", &context)
            .context("Failed to render sitemap")
    }

    fn robots(&self) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(RobotsContext {
            sitemap: self.sitemap_url()?,
        })?;
        self.templates
            .render("robots", &context)
            .context("Failed to render robots.txt")
    }
}
