use std::sync::Arc;

use async_trait::async_trait;
use bcr_ebill_core::{
    PeerId, ServiceTraitBounds,
    contact::{
        Contact,
        validation::{validate_create_contact, validate_remove_contact, validate_update_contact},
    },
};
use log::info;
#[cfg(test)]
use mockall::automock;

use super::Result;
use crate::external::ledger::LedgerApi;

#[cfg(test)]
impl ServiceTraitBounds for MockContactServiceApi {}

/// Contact book operations. Write operations validate against the currently loaded contacts,
/// so duplicates are rejected before the ledger is called.
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ContactServiceApi: ServiceTraitBounds {
    /// Returns all contacts
    async fn get_contacts(&self) -> Result<Vec<Contact>>;

    /// Adds a new contact
    async fn add_contact(&self, name: &str, peer_id: &PeerId, existing: &[Contact]) -> Result<()>;

    /// Renames the contact with the given old name and sets its peer id
    async fn update_contact(
        &self,
        old_name: &str,
        name: &str,
        peer_id: &PeerId,
        existing: &[Contact],
    ) -> Result<()>;

    /// Deletes the contact with the given name
    async fn remove_contact(&self, name: &str, existing: &[Contact]) -> Result<()>;
}

#[derive(Clone)]
pub struct ContactService {
    ledger: Arc<dyn LedgerApi>,
}

impl ContactService {
    pub fn new(ledger: Arc<dyn LedgerApi>) -> Self {
        Self { ledger }
    }
}

impl ServiceTraitBounds for ContactService {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ContactServiceApi for ContactService {
    async fn get_contacts(&self) -> Result<Vec<Contact>> {
        Ok(self.ledger.get_contacts().await?)
    }

    async fn add_contact(&self, name: &str, peer_id: &PeerId, existing: &[Contact]) -> Result<()> {
        validate_create_contact(name, peer_id, existing)?;
        self.ledger.new_contact(name.trim(), peer_id).await?;
        info!("added contact {}", name.trim());
        Ok(())
    }

    async fn update_contact(
        &self,
        old_name: &str,
        name: &str,
        peer_id: &PeerId,
        existing: &[Contact],
    ) -> Result<()> {
        validate_update_contact(old_name, name, peer_id, existing)?;
        self.ledger
            .edit_contact(old_name.trim(), name.trim(), peer_id)
            .await?;
        info!("updated contact {}", name.trim());
        Ok(())
    }

    async fn remove_contact(&self, name: &str, existing: &[Contact]) -> Result<()> {
        validate_remove_contact(name, existing)?;
        self.ledger.remove_contact(name.trim()).await?;
        info!("removed contact {}", name.trim());
        Ok(())
    }
}
