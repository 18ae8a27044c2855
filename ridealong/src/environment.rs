//! Wiring of the concrete service implementations.

use std::sync::Arc;

use ridealong_api_rest::{RestServer, RestServerConfig};
use ridealong_config::Config;
use ridealong_core_contact_impl::ContactServiceImpl;
use ridealong_core_site_impl::{SiteServiceConfig, SiteServiceImpl};
use ridealong_extern_impl::relay::{RelayApiServiceConfig, RelayApiServiceImpl};

pub type Relay = RelayApiServiceImpl;
pub type Contact = ContactServiceImpl<Relay>;
pub type Site = SiteServiceImpl;
pub type Server = RestServer<Contact, Site>;

pub fn relay(config: &Config) -> anyhow::Result<Relay> {
    RelayApiServiceImpl::new(RelayApiServiceConfig {
        endpoint: Arc::new(config.relay.endpoint.clone()),
        timeout: config.relay.timeout.map(Into::into),
    })
}

pub fn site(config: &Config) -> anyhow::Result<Site> {
    let site = &config.site;
    SiteServiceImpl::new(SiteServiceConfig {
        url: Arc::new(site.url.clone()),
        name: site.name.as_str().into(),
        short_name: site.short_name.as_str().into(),
        description: site.description.as_str().into(),
        background_color: site.background_color.as_str().into(),
        theme_color: site.theme_color.as_str().into(),
        icon: site.icon.as_str().into(),
    })
}

pub fn server(config: &Config) -> anyhow::Result<Server> {
    let contact = ContactServiceImpl::new(relay(config)?);
    let site = site(config)?;
    let rest_config = RestServerConfig {
        addr: config.http.address,
    };

    Ok(RestServer::new(rest_config, contact, site))
}
