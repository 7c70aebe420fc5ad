use bcr_ebill_core::{
    PeerId,
    bill::{
        BillActionRequest, BillSnapshot,
        eligibility::{BillAction, eligible_actions},
        validation::validate_bill_action,
    },
};
use log::{info, warn};

use super::{ActionOutcome, Error, Result, service::BillService};

impl BillService {
    /// Validates, checks eligibility against the caller's snapshot and sends the action. The
    /// ledger is only called once both checks passed.
    pub(super) async fn dispatch(
        &self,
        request: &BillActionRequest,
        snapshot: &BillSnapshot,
        peer_id: &PeerId,
    ) -> Result<ActionOutcome> {
        let action = request.action();
        let bill = match snapshot {
            BillSnapshot::Loaded(bill) => bill,
            BillSnapshot::Loading => {
                return Err(Error::Unavailable("still loading".into()));
            }
            BillSnapshot::Unavailable(reason) => {
                return Err(Error::Unavailable(reason.clone()));
            }
        };

        validate_bill_action(request, bill)?;

        if !eligible_actions(bill, peer_id).contains(action) {
            warn!("{action} is not eligible for bill {} and {peer_id}", bill.name);
            return Err(Error::ActionNotEligible(action, bill.name.clone()));
        }

        let name = bill.name.as_str();
        match request {
            BillActionRequest::Accept => self.ledger.accept_bill(name).await?,
            BillActionRequest::Endorse(endorsee) => {
                self.ledger.endorse_bill(name, endorsee.trim()).await?
            }
            BillActionRequest::Sell(buyer, amount_numbers) => {
                self.ledger
                    .sell_bill(name, buyer.trim(), *amount_numbers)
                    .await?
            }
            BillActionRequest::RequestToAccept => self.ledger.request_to_accept_bill(name).await?,
            BillActionRequest::RequestToPay => self.ledger.request_to_pay_bill(name).await?,
            BillActionRequest::Pay => {
                let instruction = bill
                    .payment_instruction()
                    .ok_or_else(|| Error::MissingPaymentData(name.to_owned(), BillAction::Pay))?;
                return Ok(ActionOutcome::PaymentRequired(action, instruction));
            }
            BillActionRequest::Buy => {
                let instruction = bill
                    .buy_instruction()
                    .ok_or_else(|| Error::MissingPaymentData(name.to_owned(), BillAction::Buy))?;
                return Ok(ActionOutcome::PaymentRequired(action, instruction));
            }
        };
        info!("{action} submitted for bill {name}");
        Ok(ActionOutcome::Submitted(action))
    }
}
