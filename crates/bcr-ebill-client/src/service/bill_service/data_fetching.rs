use bcr_ebill_core::{
    balance::sort_by_issue_date_desc,
    bill::{Bill, BillSnapshot, eligibility::BillStatus},
};
use log::{debug, error};

use super::{Result, service::BillService};

impl BillService {
    /// One request, no retries. Every failure ends up as an unavailable snapshot.
    pub(super) async fn fetch_snapshot(&self, name: &str) -> BillSnapshot {
        match self.ledger.get_bill(name).await {
            Ok(bill) => {
                debug!("fetched bill {name} in state {}", BillStatus::from(&bill).state());
                bill.chain_of_blocks.check_well_formed(&bill.name);
                BillSnapshot::loaded(bill)
            }
            Err(e) => {
                error!("Could not fetch bill {name}: {e}");
                BillSnapshot::Unavailable(e.to_string())
            }
        }
    }

    pub(super) async fn fetch_bills(&self) -> Result<Vec<Bill>> {
        let mut bills = self.ledger.get_bills().await?;
        sort_by_issue_date_desc(&mut bills);
        debug!("fetched {} bills", bills.len());
        Ok(bills)
    }
}
