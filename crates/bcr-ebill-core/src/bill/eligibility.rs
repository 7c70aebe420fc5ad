//! Decides which actions the local peer may take on a bill.
//!
//! All rules live in [TRANSITIONS]. A row names the action, the role the local peer has to hold,
//! a guard over the bill's status flags and the state the bill moves to once the ledger has
//! processed the action. Every row is additionally gated by `!payed && !pending`.

use std::fmt;

use serde::Serialize;

use super::{Bill, BillRole, BillSnapshot};
use crate::PeerId;

/// The actions a user can take on a bill, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BillAction {
    Pay,
    Accept,
    Endorse,
    Sell,
    Buy,
    RequestToAccept,
    RequestToPay,
}

impl fmt::Display for BillAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillAction::Pay => "PAY",
            BillAction::Accept => "ACCEPT",
            BillAction::Endorse => "ENDORSE",
            BillAction::Sell => "SELL",
            BillAction::Buy => "BUY",
            BillAction::RequestToAccept => "REQUEST TO ACCEPT",
            BillAction::RequestToPay => "REQUEST TO PAY",
        };
        f.write_str(label)
    }
}

impl BillAction {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Pay,
            Self::Accept,
            Self::Endorse,
            Self::Sell,
            Self::Buy,
            Self::RequestToAccept,
            Self::RequestToPay,
        ]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BillAction::Pay => "pay.svg",
            BillAction::Accept => "accept.svg",
            BillAction::Endorse => "endorse.svg",
            BillAction::Sell => "sell.svg",
            BillAction::Buy => "buy.svg",
            BillAction::RequestToAccept => "reqToAccept.svg",
            BillAction::RequestToPay => "reqToPay.svg",
        }
    }

    fn transition(&self) -> &'static Transition {
        // rows are indexed by action
        &TRANSITIONS[*self as usize]
    }

    pub fn role(&self) -> BillRole {
        self.transition().role
    }

    pub fn target_state(&self) -> BillState {
        self.transition().target
    }

    /// The status flag that becomes true once the ledger has processed the action.
    ///
    /// Buying only clears `waited_for_payment`, so there is no flag to wait for.
    pub fn expected_flag(&self) -> Option<StatusFlag> {
        match self {
            BillAction::Pay => Some(StatusFlag::Payed),
            BillAction::Accept => Some(StatusFlag::Accepted),
            BillAction::Endorse => Some(StatusFlag::Endorsed),
            BillAction::Sell => Some(StatusFlag::WaitedForPayment),
            BillAction::Buy => None,
            BillAction::RequestToAccept => Some(StatusFlag::RequestedToAccept),
            BillAction::RequestToPay => Some(StatusFlag::RequestedToPay),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusFlag {
    Accepted,
    Payed,
    Pending,
    Endorsed,
    RequestedToAccept,
    RequestedToPay,
    WaitedForPayment,
}

/// The lifecycle state of a bill, derived from its status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BillState {
    Issued,
    Accepted,
    Endorsed,
    RequestedToAccept,
    RequestedToPay,
    WaitingForPayment,
    Paid,
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for BillState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The status flags of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillStatus {
    pub accepted: bool,
    pub payed: bool,
    pub pending: bool,
    pub endorsed: bool,
    pub requested_to_accept: bool,
    pub requested_to_pay: bool,
    pub waited_for_payment: bool,
}

impl From<&Bill> for BillStatus {
    fn from(bill: &Bill) -> Self {
        Self {
            accepted: bill.accepted,
            payed: bill.payed,
            pending: bill.pending,
            endorsed: bill.endorsed,
            requested_to_accept: bill.requested_to_accept,
            requested_to_pay: bill.requested_to_pay,
            waited_for_payment: bill.waited_for_payment,
        }
    }
}

impl BillStatus {
    pub fn flag(&self, flag: StatusFlag) -> bool {
        match flag {
            StatusFlag::Accepted => self.accepted,
            StatusFlag::Payed => self.payed,
            StatusFlag::Pending => self.pending,
            StatusFlag::Endorsed => self.endorsed,
            StatusFlag::RequestedToAccept => self.requested_to_accept,
            StatusFlag::RequestedToPay => self.requested_to_pay,
            StatusFlag::WaitedForPayment => self.waited_for_payment,
        }
    }

    /// Flags can overlap, the most advanced state wins
    pub fn state(&self) -> BillState {
        if self.payed {
            BillState::Paid
        } else if self.waited_for_payment {
            BillState::WaitingForPayment
        } else if self.requested_to_pay {
            BillState::RequestedToPay
        } else if self.accepted {
            BillState::Accepted
        } else if self.requested_to_accept {
            BillState::RequestedToAccept
        } else if self.endorsed {
            BillState::Endorsed
        } else {
            BillState::Issued
        }
    }

    fn is_open(&self) -> bool {
        !self.payed && !self.pending
    }
}

type Guard = fn(&BillStatus) -> bool;

struct Transition {
    action: BillAction,
    role: BillRole,
    guard: Guard,
    target: BillState,
}

fn not_waiting_for_payment(s: &BillStatus) -> bool {
    !s.waited_for_payment
}

fn waiting_for_payment(s: &BillStatus) -> bool {
    s.waited_for_payment
}

fn acceptable(s: &BillStatus) -> bool {
    !s.accepted && !s.waited_for_payment
}

fn acceptance_requestable(s: &BillStatus) -> bool {
    !s.accepted && !s.requested_to_accept && !s.waited_for_payment
}

fn payment_requestable(s: &BillStatus) -> bool {
    !s.requested_to_pay && !s.waited_for_payment
}

/// One row per action, in display order
static TRANSITIONS: [Transition; 7] = [
    Transition {
        action: BillAction::Pay,
        role: BillRole::Drawee,
        guard: not_waiting_for_payment,
        target: BillState::Paid,
    },
    Transition {
        action: BillAction::Accept,
        role: BillRole::Drawee,
        guard: acceptable,
        target: BillState::Accepted,
    },
    Transition {
        action: BillAction::Endorse,
        role: BillRole::Payee,
        guard: not_waiting_for_payment,
        target: BillState::Endorsed,
    },
    Transition {
        action: BillAction::Sell,
        role: BillRole::Payee,
        guard: not_waiting_for_payment,
        target: BillState::WaitingForPayment,
    },
    Transition {
        action: BillAction::Buy,
        role: BillRole::Buyer,
        guard: waiting_for_payment,
        target: BillState::Endorsed,
    },
    Transition {
        action: BillAction::RequestToAccept,
        role: BillRole::Payee,
        guard: acceptance_requestable,
        target: BillState::RequestedToAccept,
    },
    Transition {
        action: BillAction::RequestToPay,
        role: BillRole::Payee,
        guard: payment_requestable,
        target: BillState::RequestedToPay,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibleAction {
    pub action: BillAction,
    pub icon: &'static str,
}

impl From<BillAction> for EligibleAction {
    fn from(action: BillAction) -> Self {
        Self {
            action,
            icon: action.icon(),
        }
    }
}

/// An ordered, duplicate-free set of actions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EligibleActions(Vec<EligibleAction>);

impl EligibleActions {
    pub fn contains(&self, action: BillAction) -> bool {
        self.0.iter().any(|a| a.action == action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn actions(&self) -> Vec<BillAction> {
        self.0.iter().map(|a| a.action).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EligibleAction> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The bill or the local peer id aren't known yet - nothing can be decided
    NotYetLoaded,
    Actions(EligibleActions),
}

impl Eligibility {
    /// The eligible actions, or an empty set while still loading
    pub fn actions(&self) -> EligibleActions {
        match self {
            Eligibility::NotYetLoaded => EligibleActions::default(),
            Eligibility::Actions(actions) => actions.clone(),
        }
    }

    pub fn allows(&self, action: BillAction) -> bool {
        match self {
            Eligibility::NotYetLoaded => false,
            Eligibility::Actions(actions) => actions.contains(action),
        }
    }
}

/// Evaluates the eligible actions for the given snapshot and local peer. Pure and deterministic.
pub fn evaluate(snapshot: &BillSnapshot, peer_id: Option<&PeerId>) -> Eligibility {
    let Some(peer_id) = peer_id else {
        return Eligibility::NotYetLoaded;
    };
    match snapshot {
        BillSnapshot::Loading => Eligibility::NotYetLoaded,
        BillSnapshot::Unavailable(_) => Eligibility::Actions(EligibleActions::default()),
        BillSnapshot::Loaded(bill) => Eligibility::Actions(eligible_actions(bill, peer_id)),
    }
}

pub fn eligible_actions(bill: &Bill, peer_id: &PeerId) -> EligibleActions {
    let status = BillStatus::from(bill);
    if !status.is_open() {
        return EligibleActions::default();
    }
    EligibleActions(
        TRANSITIONS
            .iter()
            .filter(|t| bill.has_role(t.role, peer_id) && (t.guard)(&status))
            .map(|t| EligibleAction::from(t.action))
            .collect(),
    )
}
