use serde::{Deserialize, Serialize};

use crate::{PeerId, blockchain::ChainOfBlocks, constants::CURRENCY_SAT, date::Date};

pub mod eligibility;
pub mod validation;

/// A named role on a bill. Parties are embedded by value and have no lifecycle of their own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub peer_id: PeerId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub postal_address: String,
    #[serde(default)]
    pub email: String,
}

impl Party {
    pub fn new(name: impl Into<String>, peer_id: PeerId) -> Self {
        Self {
            name: name.into(),
            peer_id,
            ..Default::default()
        }
    }

    /// A party the ledger sent as an empty placeholder
    pub fn is_placeholder(&self) -> bool {
        self.peer_id.is_empty()
    }
}

/// The authoritative state of a bill, as returned by the ledger. The client never changes it,
/// it only re-fetches it after each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub name: String,
    pub date_of_issue: String,
    pub maturity_date: String,
    pub amount_numbers: u64,
    pub currency_code: String,
    pub drawer: Party,
    pub drawee: Party,
    pub payee: Party,
    #[serde(default)]
    pub endorsee: Option<Party>,
    #[serde(default)]
    pub buyer: Option<Party>,
    #[serde(default)]
    pub seller: Option<Party>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub payed: bool,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub endorsed: bool,
    #[serde(default)]
    pub requested_to_accept: bool,
    #[serde(default)]
    pub requested_to_pay: bool,
    #[serde(default)]
    pub waited_for_payment: bool,
    #[serde(default)]
    pub chain_of_blocks: ChainOfBlocks,
    #[serde(default)]
    pub place_of_drawing: String,
    #[serde(default)]
    pub place_of_payment: String,
    #[serde(default)]
    pub bill_jurisdiction: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub amounts_letters: String,
    #[serde(default)]
    pub link_to_pay: Option<String>,
    #[serde(default)]
    pub address_to_pay: Option<String>,
    #[serde(default)]
    pub link_for_buy: Option<String>,
    #[serde(default)]
    pub address_for_selling: Option<String>,
    #[serde(default)]
    pub amount_for_selling: Option<u64>,
}

impl Bill {
    pub fn issue_date(&self) -> Option<Date> {
        Date::new(&self.date_of_issue).ok()
    }

    pub fn maturity(&self) -> Option<Date> {
        Date::new(&self.maturity_date).ok()
    }

    /// Returns the party that holds the given role, if the role is filled
    pub fn party(&self, role: BillRole) -> Option<&Party> {
        let party = match role {
            BillRole::Drawer => Some(&self.drawer),
            BillRole::Drawee => Some(&self.drawee),
            BillRole::Payee => Some(&self.payee),
            BillRole::Endorsee => self.endorsee.as_ref(),
            BillRole::Buyer => self.buyer.as_ref(),
        };
        party.filter(|p| !p.is_placeholder())
    }

    pub fn has_role(&self, role: BillRole, peer_id: &PeerId) -> bool {
        self.party(role)
            .map(|p| p.peer_id.matches(peer_id))
            .unwrap_or(false)
    }

    /// All roles the given peer holds on this bill, in declaration order of [BillRole]
    pub fn roles_of(&self, peer_id: &PeerId) -> Vec<BillRole> {
        BillRole::ALL
            .into_iter()
            .filter(|role| self.has_role(*role, peer_id))
            .collect()
    }

    /// The party currently entitled to be paid. The ledger moves an endorsed bill to the
    /// endorsee by rewriting the payee.
    pub fn current_holder(&self) -> &Party {
        &self.payee
    }

    /// Data to settle the bill as the drawee. Payment happens outside of the ledger, which
    /// observes it - so we can only tell the payer where to send the money.
    pub fn payment_instruction(&self) -> Option<PaymentInstruction> {
        if self.address_to_pay.is_none() && self.link_to_pay.is_none() {
            return None;
        }
        Some(PaymentInstruction {
            bill_name: self.name.clone(),
            receiver: self.current_holder().clone(),
            amount_numbers: self.amount_numbers,
            currency_code: self.currency_code.clone(),
            address: self.address_to_pay.clone(),
            link: self.link_to_pay.clone(),
        })
    }

    /// Data to pay for a bill offered to us for sale
    pub fn buy_instruction(&self) -> Option<PaymentInstruction> {
        if self.address_for_selling.is_none() && self.link_for_buy.is_none() {
            return None;
        }
        let receiver = self
            .seller
            .as_ref()
            .filter(|s| !s.is_placeholder())
            .unwrap_or(&self.payee);
        Some(PaymentInstruction {
            bill_name: self.name.clone(),
            receiver: receiver.clone(),
            amount_numbers: self.amount_for_selling.unwrap_or(self.amount_numbers),
            currency_code: self.currency_code.clone(),
            address: self.address_for_selling.clone(),
            link: self.link_for_buy.clone(),
        })
    }
}

/// The state of a bill as seen by a view: still being fetched, not retrievable, or loaded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BillSnapshot {
    #[default]
    Loading,
    Unavailable(String),
    Loaded(Box<Bill>),
}

impl BillSnapshot {
    pub fn loaded(bill: Bill) -> Self {
        BillSnapshot::Loaded(Box::new(bill))
    }

    pub fn bill(&self) -> Option<&Bill> {
        match self {
            BillSnapshot::Loaded(bill) => Some(bill),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, BillSnapshot::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillRole {
    Drawer,
    Drawee,
    Payee,
    Endorsee,
    Buyer,
}

impl BillRole {
    pub const ALL: [BillRole; 5] = [
        BillRole::Drawer,
        BillRole::Drawee,
        BillRole::Payee,
        BillRole::Endorsee,
        BillRole::Buyer,
    ];
}

/// Where and how much to pay to settle or buy a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstruction {
    pub bill_name: String,
    pub receiver: Party,
    pub amount_numbers: u64,
    pub currency_code: String,
    pub address: Option<String>,
    pub link: Option<String>,
}

/// The data of the issue form, as submitted to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueBillForm {
    pub maturity_date: String,
    pub payee_name: String,
    pub drawer_is_payee: bool,
    pub currency_code: String,
    pub amount_numbers: u64,
    pub drawee_name: String,
    pub drawer_is_drawee: bool,
    pub drawer_name: String,
    pub place_of_drawing: String,
    pub place_of_payment: String,
    pub bill_jurisdiction: String,
    pub language: String,
    pub date_of_issue: String,
}

impl Default for IssueBillForm {
    fn default() -> Self {
        Self {
            maturity_date: String::default(),
            payee_name: String::default(),
            drawer_is_payee: false,
            currency_code: CURRENCY_SAT.to_owned(),
            amount_numbers: 0,
            drawee_name: String::default(),
            drawer_is_drawee: false,
            drawer_name: String::default(),
            place_of_drawing: String::default(),
            place_of_payment: String::default(),
            bill_jurisdiction: String::default(),
            language: crate::constants::DEFAULT_LANGUAGE.to_owned(),
            date_of_issue: String::default(),
        }
    }
}

/// An action the local peer wants to take on a bill, with the action-specific form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillActionRequest {
    Pay,
    Accept,
    // endorsee
    Endorse(String),
    // buyer, amount
    Sell(String, u64),
    Buy,
    RequestToAccept,
    RequestToPay,
}

impl BillActionRequest {
    pub fn action(&self) -> eligibility::BillAction {
        use eligibility::BillAction;
        match self {
            BillActionRequest::Pay => BillAction::Pay,
            BillActionRequest::Accept => BillAction::Accept,
            BillActionRequest::Endorse(_) => BillAction::Endorse,
            BillActionRequest::Sell(_, _) => BillAction::Sell,
            BillActionRequest::Buy => BillAction::Buy,
            BillActionRequest::RequestToAccept => BillAction::RequestToAccept,
            BillActionRequest::RequestToPay => BillAction::RequestToPay,
        }
    }
}
