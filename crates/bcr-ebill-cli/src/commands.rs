use anyhow::{Result, anyhow};
use bcr_ebill_client::{
    app::App,
    service::bill_service::ActionOutcome,
    state::scope::ScopeToken,
};
use bcr_ebill_core::{
    PeerId,
    balance::filter_bills,
    bill::{BillActionRequest, IssueBillForm},
    identity::IdentityForm,
};
use log::debug;
use serde::Serialize;

use crate::{
    config::{BillCommand, Command, ContactsCommand, IdentityArgs, IdentityCommand, IssueArgs},
    render,
};

impl From<IdentityArgs> for IdentityForm {
    fn from(args: IdentityArgs) -> Self {
        Self {
            name: args.name,
            company: args.company,
            date_of_birth: args.date_of_birth,
            city_of_birth: args.city_of_birth,
            country_of_birth: args.country_of_birth,
            email: args.email,
            postal_address: args.postal_address,
            phone_number: args.phone_number,
        }
    }
}

impl From<IssueArgs> for IssueBillForm {
    fn from(args: IssueArgs) -> Self {
        Self {
            maturity_date: args.maturity_date,
            payee_name: args.payee_name,
            drawer_is_payee: args.drawer_is_payee,
            currency_code: args.currency_code,
            amount_numbers: args.amount,
            drawee_name: args.drawee_name,
            drawer_is_drawee: args.drawer_is_drawee,
            drawer_name: args.drawer_name,
            place_of_drawing: args.place_of_drawing,
            place_of_payment: args.place_of_payment,
            bill_jurisdiction: args.bill_jurisdiction,
            language: args.language,
            date_of_issue: args.date_of_issue,
        }
    }
}

impl BillCommand {
    /// The action request for commands that act on the bill
    fn request(&self) -> Option<BillActionRequest> {
        match self {
            BillCommand::Show { .. } | BillCommand::Chain { .. } | BillCommand::Actions { .. } => {
                None
            }
            BillCommand::Pay { .. } => Some(BillActionRequest::Pay),
            BillCommand::Accept { .. } => Some(BillActionRequest::Accept),
            BillCommand::Endorse { endorsee, .. } => {
                Some(BillActionRequest::Endorse(endorsee.clone()))
            }
            BillCommand::Sell { buyer, amount, .. } => {
                Some(BillActionRequest::Sell(buyer.clone(), *amount))
            }
            BillCommand::Buy { .. } => Some(BillActionRequest::Buy),
            BillCommand::RequestToAccept { .. } => Some(BillActionRequest::RequestToAccept),
            BillCommand::RequestToPay { .. } => Some(BillActionRequest::RequestToPay),
        }
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    } else {
        Ok(text(value))
    }
}

/// Runs a single command against the app and returns what to print. Failures the app reports as
/// notices are left in the store.
pub async fn run(app: &App, command: Command, json: bool, scope: &ScopeToken) -> Result<String> {
    app.start(scope).await;
    debug!("running {command:?}");
    match command {
        Command::Identity(cmd) => identity(app, cmd, json, scope).await,
        Command::Contacts(cmd) => contacts(app, cmd, json, scope).await,
        Command::Bills { role } => {
            let state = app.state().await;
            let peer_id = state.peer_id.clone().unwrap_or_default();
            let bills = filter_bills(&state.bills, &peer_id, role.into());
            output(json, &bills, |b| render::bills(b))
        }
        Command::Bill(cmd) => bill(app, cmd, json, scope).await,
        Command::Issue(args) => {
            let form = IssueBillForm::from(args);
            if !app.issue_bill(&form, scope).await {
                return Ok(String::new());
            }
            let state = app.state().await;
            let bills: Vec<_> = state.bills.iter().collect();
            output(json, &bills, |b| render::bills(b))
        }
        Command::Balance => {
            let state = app.state().await;
            output(json, &state.balance, render::balance)
        }
        Command::Opcodes => match app.op_codes().await {
            Some(op_codes) => output(json, &op_codes, |c| render::op_codes(c)),
            None => Ok(String::new()),
        },
    }
}

async fn identity(
    app: &App,
    cmd: IdentityCommand,
    json: bool,
    scope: &ScopeToken,
) -> Result<String> {
    let saved = match cmd {
        IdentityCommand::Show => true,
        IdentityCommand::Create(args) => app.create_identity(&args.into(), scope).await,
        IdentityCommand::Change(args) => app.change_identity(&args.into(), scope).await,
    };
    if !saved {
        return Ok(String::new());
    }
    let identity = app.state().await.identity.unwrap_or_default();
    // key material stays out of the output
    output(json, &IdentityForm::from(&identity), |_| {
        render::identity(&identity)
    })
}

async fn contacts(
    app: &App,
    cmd: ContactsCommand,
    json: bool,
    scope: &ScopeToken,
) -> Result<String> {
    let saved = match cmd {
        ContactsCommand::List => true,
        ContactsCommand::Add { name, peer_id } => {
            app.add_contact(&name, &PeerId::new(peer_id), scope).await
        }
        ContactsCommand::Edit {
            old_name,
            name,
            peer_id,
        } => {
            app.update_contact(&old_name, &name, &PeerId::new(peer_id), scope)
                .await
        }
        ContactsCommand::Remove { name } => app.remove_contact(&name, scope).await,
    };
    if !saved {
        return Ok(String::new());
    }
    let contacts = app.state().await.contacts;
    output(json, &contacts, |c| render::contacts(c))
}

async fn bill(app: &App, cmd: BillCommand, json: bool, scope: &ScopeToken) -> Result<String> {
    let name = cmd.bill_name().to_owned();
    if let BillCommand::Chain { .. } = cmd {
        return match app.bill_chain(&name).await {
            Some(chain) => output(json, &chain, render::chain),
            None => Ok(String::new()),
        };
    }

    app.open_bill(&name, scope).await;
    let state = app.state().await;
    if state.open_snapshot().is_loading() {
        return Err(anyhow!("Loading bill {name} was cancelled"));
    }

    let Some(request) = cmd.request() else {
        let snapshot = state.open_snapshot();
        let eligibility = state.eligibility();
        return match cmd {
            BillCommand::Actions { .. } => {
                output(json, &eligibility.actions(), |_| render::actions(&eligibility))
            }
            _ => match snapshot.bill() {
                Some(bill) if json => output(json, bill, |_| String::new()),
                _ => Ok(render::bill(&snapshot, &eligibility)),
            },
        };
    };

    match app.execute_bill_action(&request, scope).await {
        Some(ActionOutcome::PaymentRequired(_, instruction)) => {
            output(json, &instruction, render::payment_instruction)
        }
        Some(ActionOutcome::Submitted(_)) => {
            let state = app.state().await;
            Ok(render::bill(&state.open_snapshot(), &state.eligibility()))
        }
        None => Ok(String::new()),
    }
}
