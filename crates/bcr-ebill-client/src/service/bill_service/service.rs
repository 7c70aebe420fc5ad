use std::sync::Arc;

use async_trait::async_trait;
use bcr_ebill_core::{
    PeerId, ServiceTraitBounds, Validate,
    bill::{Bill, BillActionRequest, BillSnapshot, IssueBillForm},
    blockchain::{ChainOfBlocks, OperationCode},
};
use log::{debug, info};

use super::{ActionOutcome, BillServiceApi, Result};
use crate::external::ledger::LedgerApi;

#[derive(Clone)]
pub struct BillService {
    pub(super) ledger: Arc<dyn LedgerApi>,
}

impl ServiceTraitBounds for BillService {}

impl BillService {
    pub fn new(ledger: Arc<dyn LedgerApi>) -> Self {
        Self { ledger }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BillServiceApi for BillService {
    async fn get_bill_snapshot(&self, name: &str) -> BillSnapshot {
        self.fetch_snapshot(name).await
    }

    async fn get_bills(&self) -> Result<Vec<Bill>> {
        self.fetch_bills().await
    }

    async fn get_bill_chain(&self, name: &str) -> Result<ChainOfBlocks> {
        let chain = self.ledger.get_bill_chain(name).await?;
        chain.check_well_formed(name);
        Ok(chain)
    }

    async fn get_op_codes(&self) -> Result<Vec<OperationCode>> {
        Ok(self.ledger.get_op_codes().await?)
    }

    async fn issue_bill(&self, form: &IssueBillForm) -> Result<()> {
        form.validate()?;
        debug!(
            "issuing bill over {} {} to be paid by {}",
            form.amount_numbers, form.currency_code, form.drawee_name
        );
        self.ledger.issue_bill(form).await?;
        info!("issued bill with maturity date {}", form.maturity_date);
        Ok(())
    }

    async fn execute_bill_action(
        &self,
        request: &BillActionRequest,
        snapshot: &BillSnapshot,
        peer_id: &PeerId,
    ) -> Result<ActionOutcome> {
        self.dispatch(request, snapshot, peer_id).await
    }
}
