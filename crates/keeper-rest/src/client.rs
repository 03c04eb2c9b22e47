//! REST-backed resource client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use keeper_core::traits::{BanControl, ResourceClient};
use keeper_core::types::{RecordId, ServiceUrl};
use keeper_core::{Resource, Result};

use crate::http::RestTransport;

/// A network-backed resource client speaking plain REST:
/// `GET {base}`, `POST {base}`, `PATCH {base}/{id}`, `DELETE {base}/{id}`
/// for each resource kind's base path.
#[derive(Debug, Clone)]
pub struct RestService {
    transport: RestTransport,
}

impl RestService {
    /// Create a new client for the given service base URL.
    pub fn new(base: ServiceUrl) -> Self {
        Self {
            transport: RestTransport::new(base),
        }
    }

    /// Returns the service URL for this client.
    pub fn url(&self) -> &ServiceUrl {
        self.transport.base()
    }

    fn record_path<R: Resource>(id: &RecordId) -> String {
        format!("{}/{}", R::BASE_PATH, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for RestService {
    #[instrument(skip(self), fields(kind = %R::KIND))]
    async fn list(&self) -> Result<Vec<R>> {
        debug!("Listing records");
        self.transport.get(R::BASE_PATH).await
    }

    #[instrument(skip(self, fields), fields(kind = %R::KIND))]
    async fn create(&self, fields: &R::Fields) -> Result<R> {
        debug!("Creating record");
        self.transport.post(R::BASE_PATH, fields).await
    }

    #[instrument(skip(self, patch), fields(kind = %R::KIND, %id))]
    async fn update(&self, id: &RecordId, patch: &R::Patch) -> Result<R> {
        debug!("Patching record");
        self.transport.patch(&Self::record_path::<R>(id), patch).await
    }

    #[instrument(skip(self), fields(kind = %R::KIND, %id))]
    async fn delete(&self, id: &RecordId) -> Result<()> {
        debug!("Deleting record");
        self.transport.delete(&Self::record_path::<R>(id)).await
    }
}

#[async_trait]
impl BanControl for RestService {}
