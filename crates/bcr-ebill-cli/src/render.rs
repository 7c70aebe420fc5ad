//! Plain text views of the application state. Each function returns the text, so it can be
//! printed or compared.

use std::fmt::Write;

use bcr_ebill_client::state::notice::{Notice, NoticeKind};
use bcr_ebill_core::{
    balance::BillsBalanceOverview,
    bill::{
        Bill, BillRole, BillSnapshot, Party, PaymentInstruction,
        eligibility::{BillStatus, Eligibility},
    },
    blockchain::{ChainOfBlocks, OperationCode},
    contact::Contact,
    identity::Identity,
};

pub fn identity(identity: &Identity) -> String {
    if !identity.exists() {
        return "No identity yet. Create one with `identity create`.\n".to_owned();
    }
    let mut out = String::new();
    let _ = writeln!(out, "Name:             {}", identity.name);
    if let Some(ref company) = identity.company {
        let _ = writeln!(out, "Company:          {company}");
    }
    let _ = writeln!(out, "Email:            {}", identity.email);
    let _ = writeln!(out, "Date of birth:    {}", identity.date_of_birth);
    let _ = writeln!(
        out,
        "Place of birth:   {}, {}",
        identity.city_of_birth, identity.country_of_birth
    );
    let _ = writeln!(out, "Postal address:   {}", identity.postal_address);
    if let Some(ref phone_number) = identity.phone_number {
        let _ = writeln!(out, "Phone number:     {phone_number}");
    }
    out
}

pub fn contacts(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts.\n".to_owned();
    }
    contacts
        .iter()
        .map(|c| format!("{:<24} {}\n", c.name, c.peer_id))
        .collect()
}

pub fn bills(bills: &[&Bill]) -> String {
    if bills.is_empty() {
        return "No bills.\n".to_owned();
    }
    bills
        .iter()
        .map(|b| {
            format!(
                "{:<24} {:>12} {:<5} {:<10} {}\n",
                b.name,
                b.amount_numbers,
                b.currency_code,
                b.date_of_issue,
                BillStatus::from(*b).state()
            )
        })
        .collect()
}

pub fn balance(balance: &BillsBalanceOverview) -> String {
    format!(
        "Bills:    {} {cur}\nIOU:      {} {cur}\nEndorsed: {} {cur}\n",
        balance.bill,
        balance.iou,
        balance.endorsed,
        cur = balance.currency
    )
}

fn party(out: &mut String, label: &str, party: Option<&Party>) {
    match party {
        Some(p) => {
            let _ = writeln!(out, "{label:<18}{} ({})", p.name, p.peer_id);
        }
        None => {
            let _ = writeln!(out, "{label:<18}-");
        }
    }
}

pub fn bill(snapshot: &BillSnapshot, eligibility: &Eligibility) -> String {
    let bill = match snapshot {
        BillSnapshot::Loading => return "Loading...\n".to_owned(),
        BillSnapshot::Unavailable(reason) => return format!("Bill not available: {reason}\n"),
        BillSnapshot::Loaded(bill) => bill.as_ref(),
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", bill.name);
    let _ = writeln!(
        out,
        "{:<18}{} {}",
        "Amount:", bill.amount_numbers, bill.currency_code
    );
    let _ = writeln!(out, "{:<18}{}", "Issued:", bill.date_of_issue);
    let _ = writeln!(out, "{:<18}{}", "Maturity:", bill.maturity_date);
    let _ = writeln!(out, "{:<18}{}", "State:", BillStatus::from(bill).state());
    party(&mut out, "Drawer:", bill.party(BillRole::Drawer));
    party(&mut out, "Drawee:", bill.party(BillRole::Drawee));
    party(&mut out, "Payee:", bill.party(BillRole::Payee));
    if bill.endorsee.is_some() {
        party(&mut out, "Endorsee:", bill.party(BillRole::Endorsee));
    }
    if bill.buyer.is_some() {
        party(&mut out, "Buyer:", bill.party(BillRole::Buyer));
    }
    out.push_str(&actions(eligibility));
    out
}

pub fn actions(eligibility: &Eligibility) -> String {
    match eligibility {
        Eligibility::NotYetLoaded => "Actions:          (loading)\n".to_owned(),
        Eligibility::Actions(actions) if actions.is_empty() => "Actions:          none\n".to_owned(),
        Eligibility::Actions(actions) => {
            let labels: Vec<String> = actions.iter().map(|a| a.action.to_string()).collect();
            format!("Actions:          {}\n", labels.join(", "))
        }
    }
}

pub fn chain(chain: &ChainOfBlocks) -> String {
    chain
        .blocks
        .iter()
        .map(|b| {
            format!(
                "#{:<4} {:<16} {}\n",
                b.id,
                b.operation_code,
                b.hash.as_deref().unwrap_or("-")
            )
        })
        .collect()
}

pub fn op_codes(op_codes: &[OperationCode]) -> String {
    op_codes.iter().map(|c| format!("{c}\n")).collect()
}

pub fn payment_instruction(instruction: &PaymentInstruction) -> String {
    let mut out = format!(
        "Pay {} {} to {} for bill {}\n",
        instruction.amount_numbers,
        instruction.currency_code,
        instruction.receiver.name,
        instruction.bill_name
    );
    if let Some(ref address) = instruction.address {
        let _ = writeln!(out, "Address: {address}");
    }
    if let Some(ref link) = instruction.link {
        let _ = writeln!(out, "Link:    {link}");
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    let prefix = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{prefix}] {}", notice.message)
}
