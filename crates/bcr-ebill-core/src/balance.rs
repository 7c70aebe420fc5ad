use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    PeerId,
    bill::{Bill, BillRole},
    constants::CURRENCY_SAT,
};

/// Sums of the bills the local peer is involved in, per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillsBalanceOverview {
    /// Bills we are the holder of
    pub bill: u64,
    /// Bills we have to pay
    pub iou: u64,
    /// Bills we have drawn
    pub endorsed: u64,
    pub currency: String,
}

impl Default for BillsBalanceOverview {
    fn default() -> Self {
        Self {
            bill: 0,
            iou: 0,
            endorsed: 0,
            currency: CURRENCY_SAT.to_owned(),
        }
    }
}

/// Each bill counts once, for the first role of the peer in the order drawee, drawer, payee,
/// endorsee.
pub fn calculate_balance(bills: &[Bill], peer_id: &PeerId) -> BillsBalanceOverview {
    let mut balance = BillsBalanceOverview::default();
    for bill in bills {
        let amount = bill.amount_numbers;
        if bill.has_role(BillRole::Drawee, peer_id) {
            balance.iou = balance.iou.saturating_add(amount);
        } else if bill.has_role(BillRole::Drawer, peer_id) {
            balance.endorsed = balance.endorsed.saturating_add(amount);
        } else if bill.has_role(BillRole::Payee, peer_id)
            || bill.has_role(BillRole::Endorsee, peer_id)
        {
            balance.bill = balance.bill.saturating_add(amount);
        }
    }
    if let Some(last) = bills.last() {
        balance.currency = last.currency_code.clone();
    }
    balance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillsFilterRole {
    #[default]
    All,
    Payee,
    Drawer,
    Drawee,
}

pub fn filter_bills<'a>(
    bills: &'a [Bill],
    peer_id: &PeerId,
    role: BillsFilterRole,
) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|bill| match role {
            BillsFilterRole::All => true,
            BillsFilterRole::Payee => bill.has_role(BillRole::Payee, peer_id),
            BillsFilterRole::Drawer => bill.has_role(BillRole::Drawer, peer_id),
            BillsFilterRole::Drawee => bill.has_role(BillRole::Drawee, peer_id),
        })
        .collect()
}

/// Newest first. Bills with an unparsable issue date go to the end, in their original order.
pub fn sort_by_issue_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| match (a.issue_date(), b.issue_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
