use std::sync::Arc;

use async_trait::async_trait;
use bcr_ebill_core::{
    PeerId, ServiceTraitBounds,
    identity::{Identity, IdentityForm, validation::validate_identity},
    util::date::today,
};
use log::{debug, info};
#[cfg(test)]
use mockall::automock;

use super::Result;
use crate::external::ledger::LedgerApi;

#[cfg(test)]
impl ServiceTraitBounds for MockIdentityServiceApi {}

#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IdentityServiceApi: ServiceTraitBounds {
    /// Returns the local identity. Check [Identity::exists] to see whether one was created.
    async fn get_identity(&self) -> Result<Identity>;

    /// Returns the peer id of the local node
    async fn get_peer_id(&self) -> Result<PeerId>;

    /// Validates and creates the identity
    async fn create_identity(&self, form: &IdentityForm) -> Result<()>;

    /// Validates and changes the identity
    async fn change_identity(&self, form: &IdentityForm) -> Result<()>;
}

#[derive(Clone)]
pub struct IdentityService {
    ledger: Arc<dyn LedgerApi>,
}

impl IdentityService {
    pub fn new(ledger: Arc<dyn LedgerApi>) -> Self {
        Self { ledger }
    }
}

impl ServiceTraitBounds for IdentityService {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl IdentityServiceApi for IdentityService {
    async fn get_identity(&self) -> Result<Identity> {
        let identity = self.ledger.get_identity().await?;
        debug!("fetched identity, exists: {}", identity.exists());
        Ok(identity)
    }

    async fn get_peer_id(&self) -> Result<PeerId> {
        Ok(self.ledger.get_peer_id().await?)
    }

    async fn create_identity(&self, form: &IdentityForm) -> Result<()> {
        validate_identity(form, today())?;
        self.ledger.create_identity(form).await?;
        info!("created identity {}", form.name);
        Ok(())
    }

    async fn change_identity(&self, form: &IdentityForm) -> Result<()> {
        validate_identity(form, today())?;
        self.ledger.change_identity(form).await?;
        info!("changed identity {}", form.name);
        Ok(())
    }
}
