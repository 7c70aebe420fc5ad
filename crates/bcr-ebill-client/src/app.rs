//! The controller between views and services.
//!
//! Views call into [App], which runs the request, turns any failure into an error notice and, on
//! success, refreshes exactly the state the change invalidated and moves to the next page.

use bcr_ebill_core::{
    PeerId,
    bill::{
        BillActionRequest, IssueBillForm,
        eligibility::{BillAction, BillStatus, Eligibility},
    },
    blockchain::{ChainOfBlocks, OperationCode},
    identity::IdentityForm,
};
use futures::future::join_all;
use log::{debug, error, info};
use uuid::Uuid;

use crate::{
    Context,
    service::bill_service::ActionOutcome,
    state::{
        AppState, Page, RefreshEvent, Resource, Store,
        notice::NoticeKind,
        scope::ScopeToken,
    },
};

#[derive(Clone)]
pub struct App {
    ctx: Context,
    store: Store,
}

impl App {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            store: Store::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn state(&self) -> AppState {
        self.store.snapshot().await
    }

    /// Loads everything the start page needs and goes to it
    pub async fn start(&self, scope: &ScopeToken) {
        self.refresh(RefreshEvent::Startup, scope).await;
        let page = self.store.snapshot().await.start_page();
        self.store.navigate(page).await;
    }

    /// Fetches all resources the event invalidates, concurrently
    pub async fn refresh(&self, event: RefreshEvent, scope: &ScopeToken) {
        debug!("refreshing for {event:?}");
        join_all(
            event
                .resources()
                .into_iter()
                .map(|resource| self.refresh_resource(resource, scope)),
        )
        .await;
    }

    async fn refresh_resource(&self, resource: Resource, scope: &ScopeToken) {
        match resource {
            Resource::Identity => {
                match scope.run(self.ctx.identity_service.get_identity()).await {
                    Some(Ok(identity)) => self.store.set_identity(identity).await,
                    Some(Err(e)) => self.report("Could not load identity", e).await,
                    None => debug!("identity fetch cancelled"),
                }
            }
            Resource::PeerId => match scope.run(self.ctx.identity_service.get_peer_id()).await {
                Some(Ok(peer_id)) => self.store.set_peer_id(peer_id).await,
                Some(Err(e)) => self.report("Could not load peer id", e).await,
                None => debug!("peer id fetch cancelled"),
            },
            Resource::Contacts => {
                match scope.run(self.ctx.contact_service.get_contacts()).await {
                    Some(Ok(contacts)) => self.store.set_contacts(contacts).await,
                    Some(Err(e)) => self.report("Could not load contacts", e).await,
                    None => debug!("contacts fetch cancelled"),
                }
            }
            Resource::Bills => match scope.run(self.ctx.bill_service.get_bills()).await {
                Some(Ok(bills)) => self.store.set_bills(bills).await,
                Some(Err(e)) => self.report("Could not load bills", e).await,
                None => debug!("bills fetch cancelled"),
            },
            Resource::OpenBill(name) => {
                match scope.run(self.ctx.bill_service.get_bill_snapshot(&name)).await {
                    Some(snapshot) => {
                        self.store.set_bill_snapshot(&name, snapshot).await;
                    }
                    None => debug!("fetch of bill {name} cancelled"),
                }
            }
        }
    }

    async fn report(&self, context: &str, e: impl std::fmt::Display) {
        error!("{context}: {e}");
        self.store
            .notify(NoticeKind::Error, format!("{context}: {e}"))
            .await;
    }

    pub async fn dismiss_notice(&self, id: &Uuid) -> bool {
        self.store.dismiss(id).await
    }

    pub async fn navigate(&self, page: Page) {
        self.store.navigate(page).await;
    }

    /// Shows the bill with the given name, starting out as loading
    pub async fn open_bill(&self, name: &str, scope: &ScopeToken) {
        self.store.open_bill(name).await;
        self.store.navigate(Page::Bill(name.to_owned())).await;
        self.refresh(RefreshEvent::BillOpened(name.to_owned()), scope)
            .await;
    }

    pub async fn eligibility(&self) -> Eligibility {
        self.store.snapshot().await.eligibility()
    }

    /// Executes the action on the open bill. Returns the outcome, or `None` if it failed - in
    /// which case an error notice was shown.
    pub async fn execute_bill_action(
        &self,
        request: &BillActionRequest,
        scope: &ScopeToken,
    ) -> Option<ActionOutcome> {
        let state = self.store.snapshot().await;
        let (Some(open), Some(peer_id)) = (state.open_bill, state.peer_id) else {
            self.store
                .notify(NoticeKind::Error, "The bill is not loaded yet.")
                .await;
            return None;
        };
        let res = self
            .ctx
            .bill_service
            .execute_bill_action(request, &open.snapshot, &peer_id)
            .await;
        match res {
            Ok(ActionOutcome::Submitted(action)) => {
                self.store
                    .notify(
                        NoticeKind::Success,
                        format!("{action} was submitted for bill {}.", open.name),
                    )
                    .await;
                self.refresh(RefreshEvent::BillActionSucceeded(open.name.clone()), scope)
                    .await;
                self.check_caught_up(&open.name, action).await;
                self.store.navigate(Page::Home).await;
                Some(ActionOutcome::Submitted(action))
            }
            Ok(ActionOutcome::PaymentRequired(action, instruction)) => {
                self.store
                    .notify(
                        NoticeKind::Info,
                        format!(
                            "Pay {} {} to {} to complete {action}.",
                            instruction.amount_numbers,
                            instruction.currency_code,
                            instruction.receiver.name
                        ),
                    )
                    .await;
                let page = match action {
                    BillAction::Buy => Page::Buy(instruction.clone()),
                    _ => Page::Repay(instruction.clone()),
                };
                self.store.navigate(page).await;
                Some(ActionOutcome::PaymentRequired(action, instruction))
            }
            Err(e) => {
                self.report("Action failed", e).await;
                None
            }
        }
    }

    /// The ledger is eventually consistent, so the flag the action flips may not be visible yet
    async fn check_caught_up(&self, name: &str, action: BillAction) {
        let Some(flag) = action.expected_flag() else {
            return;
        };
        let state = self.store.snapshot().await;
        let Some(bill) = state
            .open_bill
            .as_ref()
            .filter(|open| open.name == name)
            .and_then(|open| open.snapshot.bill())
        else {
            return;
        };
        if BillStatus::from(bill).flag(flag) {
            debug!("{action} on bill {name} is visible");
        } else {
            info!("ledger has not caught up with {action} on bill {name} yet");
            self.store
                .notify(
                    NoticeKind::Info,
                    format!("{action} on bill {name} is not confirmed by the ledger yet."),
                )
                .await;
        }
    }

    pub async fn issue_bill(&self, form: &IssueBillForm, scope: &ScopeToken) -> bool {
        match self.ctx.bill_service.issue_bill(form).await {
            Ok(()) => {
                self.store
                    .notify(NoticeKind::Success, "The bill was issued.")
                    .await;
                self.refresh(RefreshEvent::BillIssued, scope).await;
                self.store.navigate(Page::Bills).await;
                true
            }
            Err(e) => {
                self.report("Could not issue bill", e).await;
                false
            }
        }
    }

    pub async fn create_identity(&self, form: &IdentityForm, scope: &ScopeToken) -> bool {
        let res = self.ctx.identity_service.create_identity(form).await;
        self.after_identity_change(res, scope).await
    }

    pub async fn change_identity(&self, form: &IdentityForm, scope: &ScopeToken) -> bool {
        let res = self.ctx.identity_service.change_identity(form).await;
        self.after_identity_change(res, scope).await
    }

    async fn after_identity_change(
        &self,
        res: crate::service::Result<()>,
        scope: &ScopeToken,
    ) -> bool {
        match res {
            Ok(()) => {
                self.store
                    .notify(NoticeKind::Success, "The identity was saved.")
                    .await;
                self.refresh(RefreshEvent::IdentityChanged, scope).await;
                self.store.navigate(Page::Home).await;
                true
            }
            Err(e) => {
                self.report("Could not save identity", e).await;
                false
            }
        }
    }

    pub async fn add_contact(&self, name: &str, peer_id: &PeerId, scope: &ScopeToken) -> bool {
        let contacts = self.store.snapshot().await.contacts;
        let res = self
            .ctx
            .contact_service
            .add_contact(name, peer_id, &contacts)
            .await;
        self.after_contacts_change(res, scope).await
    }

    pub async fn update_contact(
        &self,
        old_name: &str,
        name: &str,
        peer_id: &PeerId,
        scope: &ScopeToken,
    ) -> bool {
        let contacts = self.store.snapshot().await.contacts;
        let res = self
            .ctx
            .contact_service
            .update_contact(old_name, name, peer_id, &contacts)
            .await;
        self.after_contacts_change(res, scope).await
    }

    pub async fn remove_contact(&self, name: &str, scope: &ScopeToken) -> bool {
        let contacts = self.store.snapshot().await.contacts;
        let res = self
            .ctx
            .contact_service
            .remove_contact(name, &contacts)
            .await;
        self.after_contacts_change(res, scope).await
    }

    async fn after_contacts_change(
        &self,
        res: crate::service::Result<()>,
        scope: &ScopeToken,
    ) -> bool {
        match res {
            Ok(()) => {
                self.store
                    .notify(NoticeKind::Success, "The contacts were saved.")
                    .await;
                self.refresh(RefreshEvent::ContactsChanged, scope).await;
                self.store.navigate(Page::Contacts).await;
                true
            }
            Err(e) => {
                self.report("Could not save contact", e).await;
                false
            }
        }
    }

    pub async fn bill_chain(&self, name: &str) -> Option<ChainOfBlocks> {
        match self.ctx.bill_service.get_bill_chain(name).await {
            Ok(chain) => Some(chain),
            Err(e) => {
                self.report("Could not load the chain of the bill", e).await;
                None
            }
        }
    }

    pub async fn op_codes(&self) -> Option<Vec<OperationCode>> {
        match self.ctx.bill_service.get_op_codes().await {
            Ok(op_codes) => Some(op_codes),
            Err(e) => {
                self.report("Could not load operation codes", e).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        external::{self, ledger::MockLedgerApi},
        tests::tests::{
            StubLedger, drawee_peer, payee_peer, test_config, valid_bill, valid_identity,
            valid_identity_form,
        },
    };
    use crate::state::scope::ViewScope;
    use bcr_ebill_core::bill::BillSnapshot;

    fn app_with(ledger: Arc<dyn external::ledger::LedgerApi>) -> App {
        App::new(Context::with_ledger(
            test_config("http://localhost:8000", None),
            ledger,
        ))
    }

    #[tokio::test]
    async fn startup_goes_home_with_identity() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        app.start(&scope.token()).await;

        let state = app.state().await;
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.peer_id, Some(drawee_peer()));
        assert_eq!(state.bills.len(), 1);
        assert_eq!(state.contacts.len(), 2);
        assert_eq!(state.balance.iou, 5000);
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn startup_without_identity_goes_to_identity_page() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        stub.set_identity(Default::default());
        let app = app_with(stub);
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        assert_eq!(app.state().await.page, Page::Identity);
    }

    #[tokio::test]
    async fn failed_startup_fetch_shows_notice() {
        let mut ledger = MockLedgerApi::new();
        ledger
            .expect_get_identity()
            .returning(|| Ok(valid_identity()));
        ledger
            .expect_get_peer_id()
            .returning(|| Ok(drawee_peer()));
        ledger.expect_get_contacts().returning(|| Ok(vec![]));
        ledger.expect_get_bills().returning(|| {
            Err(external::Error::Status {
                status: 503,
                path: "/bills/return".into(),
            })
        });
        let app = app_with(Arc::new(ledger));
        let scope = ViewScope::new();
        app.start(&scope.token()).await;

        let state = app.state().await;
        assert_eq!(state.page, Page::Home);
        let errors = state.notices.of_kind(NoticeKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("503"));
    }

    #[tokio::test]
    async fn cancelled_scope_writes_nothing() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        let token = scope.token();
        scope.cancel();
        app.refresh(RefreshEvent::Startup, &token).await;

        let state = app.state().await;
        assert!(state.identity.is_none());
        assert!(state.bills.is_empty());
        assert!(state.peer_id.is_none());
    }

    #[tokio::test]
    async fn open_bill_loads_snapshot() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        app.open_bill("bill-1", &scope.token()).await;

        let state = app.state().await;
        assert_eq!(state.page, Page::Bill("bill-1".into()));
        assert_eq!(state.open_snapshot(), BillSnapshot::loaded(valid_bill()));
        assert!(app.eligibility().await.allows(BillAction::Accept));
    }

    #[tokio::test]
    async fn open_unknown_bill_is_unavailable() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        app.open_bill("nope", &scope.token()).await;

        let state = app.state().await;
        assert!(matches!(state.open_snapshot(), BillSnapshot::Unavailable(_)));
        assert!(app.eligibility().await.actions().is_empty());
    }

    #[tokio::test]
    async fn action_without_open_bill_fails() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        let res = app
            .execute_bill_action(&BillActionRequest::Accept, &scope.token())
            .await;
        assert!(res.is_none());
        assert_eq!(
            app.state().await.notices.of_kind(NoticeKind::Error).len(),
            1
        );
        assert_eq!(stub.action_count(), 0);
    }

    #[tokio::test]
    async fn ineligible_action_shows_error_notice() {
        let stub = Arc::new(StubLedger::new(payee_peer()));
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        app.open_bill("bill-1", &scope.token()).await;

        let res = app
            .execute_bill_action(&BillActionRequest::Accept, &scope.token())
            .await;
        assert!(res.is_none());
        let state = app.state().await;
        assert_eq!(state.page, Page::Bill("bill-1".into()));
        assert!(
            state.notices.of_kind(NoticeKind::Error)[0]
                .message
                .contains("not eligible")
        );
        assert_eq!(stub.action_count(), 0);
    }

    #[tokio::test]
    async fn lagging_ledger_is_noticed() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        stub.set_lagging(true);
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        app.open_bill("bill-1", &scope.token()).await;

        let res = app
            .execute_bill_action(&BillActionRequest::Accept, &scope.token())
            .await;
        assert_eq!(res, Some(ActionOutcome::Submitted(BillAction::Accept)));
        let state = app.state().await;
        assert_eq!(state.page, Page::Home);
        assert!(
            state
                .notices
                .of_kind(NoticeKind::Info)
                .iter()
                .any(|n| n.message.contains("not confirmed"))
        );
    }

    #[tokio::test]
    async fn pay_navigates_to_repay_page() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        stub.update_bill("bill-1", |bill| {
            bill.address_to_pay = Some("tb1qpayee".into())
        });
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        app.start(&scope.token()).await;
        app.open_bill("bill-1", &scope.token()).await;

        let res = app
            .execute_bill_action(&BillActionRequest::Pay, &scope.token())
            .await;
        assert!(matches!(res, Some(ActionOutcome::PaymentRequired(BillAction::Pay, _))));
        assert!(matches!(app.state().await.page, Page::Repay(_)));
        assert_eq!(stub.action_count(), 0);
    }

    #[tokio::test]
    async fn issue_bill_goes_to_bill_list() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        app.start(&scope.token()).await;

        let form = IssueBillForm {
            maturity_date: "2025-12-31".into(),
            payee_name: "Alice".into(),
            drawee_name: "Bob".into(),
            drawer_name: "Minka".into(),
            amount_numbers: 1200,
            place_of_drawing: "Vienna".into(),
            place_of_payment: "Vienna".into(),
            bill_jurisdiction: "AT".into(),
            date_of_issue: "2025-02-01".into(),
            ..Default::default()
        };
        assert!(app.issue_bill(&form, &scope.token()).await);
        let state = app.state().await;
        assert_eq!(state.page, Page::Bills);
        assert_eq!(state.bills.len(), 2);
        // newest first
        assert_eq!(state.bills[0].amount_numbers, 1200);
    }

    #[tokio::test]
    async fn invalid_issue_form_shows_notice() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub.clone());
        let scope = ViewScope::new();
        assert!(!app.issue_bill(&IssueBillForm::default(), &scope.token()).await);
        assert_eq!(
            app.state().await.notices.of_kind(NoticeKind::Error).len(),
            1
        );
        assert_eq!(stub.bill_count(), 1);
    }

    #[tokio::test]
    async fn contacts_roundtrip() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        app.start(&scope.token()).await;

        assert!(
            app.add_contact("Carol", &PeerId::new("12D3KooWCarol"), &scope.token())
                .await
        );
        assert_eq!(app.state().await.contacts.len(), 3);
        assert_eq!(app.state().await.page, Page::Contacts);

        // duplicate against the refreshed list
        assert!(
            !app.add_contact("Carol", &PeerId::new("12D3KooWCarol"), &scope.token())
                .await
        );

        assert!(
            app.update_contact(
                "Carol",
                "Caroline",
                &PeerId::new("12D3KooWCarol"),
                &scope.token()
            )
            .await
        );
        assert!(app.remove_contact("Caroline", &scope.token()).await);
        assert_eq!(app.state().await.contacts.len(), 2);
    }

    #[tokio::test]
    async fn identity_change_refreshes_identity() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        let form = IdentityForm {
            name: "Minka Changed".into(),
            ..valid_identity_form()
        };
        assert!(app.change_identity(&form, &scope.token()).await);
        let state = app.state().await;
        assert_eq!(
            state.identity.map(|i| i.name),
            Some("Minka Changed".to_owned())
        );
        assert_eq!(state.page, Page::Home);
    }

    #[tokio::test]
    async fn chain_and_op_codes() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        assert_eq!(app.bill_chain("bill-1").await.map(|c| c.blocks.len()), Some(1));
        assert!(app.bill_chain("nope").await.is_none());
        assert_eq!(app.op_codes().await.map(|c| c.len()), Some(7));
    }

    #[tokio::test]
    async fn dismiss_notice() {
        let stub = Arc::new(StubLedger::new(drawee_peer()));
        let app = app_with(stub);
        let scope = ViewScope::new();
        app.execute_bill_action(&BillActionRequest::Accept, &scope.token())
            .await;
        let id = app.state().await.notices.latest().map(|n| n.id).unwrap();
        assert!(app.dismiss_notice(&id).await);
        assert!(app.state().await.notices.is_empty());
    }
}
