use std::sync::Arc;

use bcr_ebill_core::{
    PeerId,
    balance::{BillsBalanceOverview, calculate_balance},
    bill::{
        Bill, BillSnapshot, PaymentInstruction,
        eligibility::{Eligibility, evaluate},
    },
    contact::Contact,
    identity::Identity,
};
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

pub mod notice;
pub mod scope;

use notice::{NoticeBoard, NoticeKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    /// Shown until an identity exists
    #[default]
    Identity,
    Home,
    Bills,
    Contacts,
    IssueBill,
    Bill(String),
    Repay(PaymentInstruction),
    Buy(PaymentInstruction),
}

/// A piece of state that is fetched from the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Identity,
    PeerId,
    Contacts,
    Bills,
    OpenBill(String),
}

/// The reasons for fetching state again. Each names exactly the resources it invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    Startup,
    IdentityChanged,
    ContactsChanged,
    BillIssued,
    BillActionSucceeded(String),
    BillOpened(String),
}

impl RefreshEvent {
    pub fn resources(&self) -> Vec<Resource> {
        match self {
            RefreshEvent::Startup => vec![
                Resource::Identity,
                Resource::PeerId,
                Resource::Contacts,
                Resource::Bills,
            ],
            RefreshEvent::IdentityChanged => vec![Resource::Identity],
            RefreshEvent::ContactsChanged => vec![Resource::Contacts],
            RefreshEvent::BillIssued => vec![Resource::Bills],
            RefreshEvent::BillActionSucceeded(name) => vec![
                Resource::Identity,
                Resource::Bills,
                Resource::OpenBill(name.clone()),
            ],
            RefreshEvent::BillOpened(name) => vec![Resource::OpenBill(name.clone())],
        }
    }
}

/// The bill the user currently looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBill {
    pub name: String,
    pub snapshot: BillSnapshot,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub identity: Option<Identity>,
    pub peer_id: Option<PeerId>,
    pub contacts: Vec<Contact>,
    pub bills: Vec<Bill>,
    pub balance: BillsBalanceOverview,
    pub page: Page,
    pub open_bill: Option<OpenBill>,
    pub notices: NoticeBoard,
}

impl AppState {
    pub fn identity_exists(&self) -> bool {
        self.identity.as_ref().map(|i| i.exists()).unwrap_or(false)
    }

    pub fn start_page(&self) -> Page {
        if self.identity_exists() {
            Page::Home
        } else {
            Page::Identity
        }
    }

    pub fn open_snapshot(&self) -> BillSnapshot {
        self.open_bill
            .as_ref()
            .map(|b| b.snapshot.clone())
            .unwrap_or_default()
    }

    /// The eligible actions for the open bill
    pub fn eligibility(&self) -> Eligibility {
        match self.open_bill {
            Some(ref open) => evaluate(&open.snapshot, self.peer_id.as_ref()),
            None => Eligibility::NotYetLoaded,
        }
    }

    fn recalculate_balance(&mut self) {
        self.balance = match self.peer_id {
            Some(ref peer_id) => calculate_balance(&self.bills, peer_id),
            None => BillsBalanceOverview::default(),
        };
    }
}

/// The single place application state is changed. Services deliver data, the store keeps it,
/// views read copies of it.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn set_identity(&self, identity: Identity) {
        self.state.write().await.identity = Some(identity);
    }

    pub async fn set_peer_id(&self, peer_id: PeerId) {
        let mut state = self.state.write().await;
        state.peer_id = Some(peer_id);
        state.recalculate_balance();
    }

    pub async fn set_contacts(&self, contacts: Vec<Contact>) {
        self.state.write().await.contacts = contacts;
    }

    pub async fn set_bills(&self, bills: Vec<Bill>) {
        let mut state = self.state.write().await;
        state.bills = bills;
        state.recalculate_balance();
    }

    /// Starts showing the given bill, in loading state until its snapshot arrives
    pub async fn open_bill(&self, name: &str) {
        self.state.write().await.open_bill = Some(OpenBill {
            name: name.to_owned(),
            snapshot: BillSnapshot::Loading,
        });
    }

    /// Only applies to the bill that is currently open, late results for other bills are dropped
    pub async fn set_bill_snapshot(&self, name: &str, snapshot: BillSnapshot) -> bool {
        let mut state = self.state.write().await;
        match state.open_bill {
            Some(ref mut open) if open.name == name => {
                open.snapshot = snapshot;
                true
            }
            _ => {
                debug!("dropping snapshot for {name}, it's not open anymore");
                false
            }
        }
    }

    pub async fn close_bill(&self) {
        self.state.write().await.open_bill = None;
    }

    pub async fn navigate(&self, page: Page) {
        debug!("navigating to {page:?}");
        self.state.write().await.page = page;
    }

    pub async fn notify(&self, kind: NoticeKind, message: impl Into<String>) -> Uuid {
        self.state.write().await.notices.push(kind, message)
    }

    pub async fn dismiss(&self, id: &Uuid) -> bool {
        self.state.write().await.notices.dismiss(id)
    }
}
