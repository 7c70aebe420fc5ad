use async_trait::async_trait;
use bcr_ebill_core::{
    PeerId, ServiceTraitBounds,
    bill::{
        Bill, BillActionRequest, BillSnapshot, IssueBillForm, PaymentInstruction,
        eligibility::BillAction,
    },
    blockchain::{ChainOfBlocks, OperationCode},
};

#[cfg(test)]
use mockall::automock;

/// Generic result type
pub type Result<T> = std::result::Result<T, error::Error>;
pub use error::Error;
pub use service::BillService;

mod data_fetching;
mod dispatch;
mod error;
mod service;

/// What happened after an action was dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The ledger took the action. It becomes visible once the bill is fetched again.
    Submitted(BillAction),
    /// The action settles off-ledger. The user has to pay as instructed, the ledger observes
    /// the payment.
    PaymentRequired(BillAction, PaymentInstruction),
}

impl ActionOutcome {
    pub fn action(&self) -> BillAction {
        match self {
            ActionOutcome::Submitted(action) => *action,
            ActionOutcome::PaymentRequired(action, _) => *action,
        }
    }
}

#[cfg(test)]
impl ServiceTraitBounds for MockBillServiceApi {}

#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BillServiceApi: ServiceTraitBounds {
    /// Fetches the current state of the bill. Never fails - a bill that couldn't be fetched,
    /// or didn't parse, is returned as [BillSnapshot::Unavailable].
    async fn get_bill_snapshot(&self, name: &str) -> BillSnapshot;

    /// Returns all bills, newest first
    async fn get_bills(&self) -> Result<Vec<Bill>>;

    /// Returns the chain of custody of the given bill
    async fn get_bill_chain(&self, name: &str) -> Result<ChainOfBlocks>;

    /// Returns the operation codes the ledger knows
    async fn get_op_codes(&self) -> Result<Vec<OperationCode>>;

    /// Validates the form and issues a new bill
    async fn issue_bill(&self, form: &IssueBillForm) -> Result<()>;

    /// Validates the request and checks that the action is eligible for the given snapshot,
    /// before sending it to the ledger. Exactly one request is sent, and only on success of
    /// both checks.
    async fn execute_bill_action(
        &self,
        request: &BillActionRequest,
        snapshot: &BillSnapshot,
        peer_id: &PeerId,
    ) -> Result<ActionOutcome>;
}
