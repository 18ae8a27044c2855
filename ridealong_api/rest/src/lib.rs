use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use ridealong_core_contact_contracts::ContactService;
use ridealong_core_site_contracts::SiteService;
use tokio::net::TcpListener;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact, Site> {
    config: RestServerConfig,
    contact: Contact,
    site: Site,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Contact, Site> RestServer<Contact, Site>
where
    Contact: ContactService,
    Site: SiteService,
{
    pub fn new(config: RestServerConfig, contact: Contact, site: Site) -> Self {
        Self {
            config,
            contact,
            site,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        self.serve_on(listener).await
    }

    /// Serves on an already bound `listener`, ignoring the configured address.
    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        let router = self.router();
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::contact::router(Arc::new(self.contact)))
            .merge(routes::site::router(Arc::new(self.site)));

        // the request id has to be assigned before the trace span is created
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
