use std::sync::Arc;

use anyhow::Result;

use crate::{
    Config,
    external::ledger::{LedgerApi, LedgerClient},
    service::{
        bill_service::{BillService, BillServiceApi},
        contact_service::{ContactService, ContactServiceApi},
        identity_service::{IdentityService, IdentityServiceApi},
    },
};

#[derive(Clone)]
pub struct Context {
    pub contact_service: Arc<dyn ContactServiceApi>,
    pub identity_service: Arc<dyn IdentityServiceApi>,
    pub bill_service: Arc<dyn BillServiceApi>,
    pub cfg: Config,
}

impl Context {
    pub fn new(cfg: Config) -> Result<Self> {
        let ledger = Arc::new(LedgerClient::new(&cfg)?);
        Ok(Self::with_ledger(cfg, ledger))
    }

    /// Wires up all services on top of the given ledger
    pub fn with_ledger(cfg: Config, ledger: Arc<dyn LedgerApi>) -> Self {
        let contact_service = ContactService::new(ledger.clone());
        let identity_service = IdentityService::new(ledger.clone());
        let bill_service = BillService::new(ledger);

        Self {
            contact_service: Arc::new(contact_service),
            identity_service: Arc::new(identity_service),
            bill_service: Arc::new(bill_service),
            cfg,
        }
    }
}
