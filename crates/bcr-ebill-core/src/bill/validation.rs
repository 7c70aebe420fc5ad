use crate::{
    Field, Validate, ValidationError,
    constants::VALID_CURRENCIES,
    date::Date,
    util::{self, is_blank},
};

use super::{Bill, BillActionRequest, IssueBillForm};

fn required_date(value: &str, field: Field) -> Result<Date, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::FieldEmpty(field));
    }
    Date::new(value)
}

fn required(value: &str, field: Field) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::FieldEmpty(field));
    }
    Ok(())
}

impl Validate for IssueBillForm {
    fn validate(&self) -> Result<(), ValidationError> {
        let issue_date = required_date(&self.date_of_issue, Field::DateOfIssue)?;
        let maturity_date = required_date(&self.maturity_date, Field::MaturityDate)?;
        if issue_date > maturity_date {
            return Err(ValidationError::IssueDateAfterMaturityDate);
        }

        if self.drawer_is_payee && self.drawer_is_drawee {
            return Err(ValidationError::DrawerCantBePayeeAndDrawee);
        }
        required(&self.drawer_name, Field::DrawerName)?;

        let payee = if self.drawer_is_payee {
            &self.drawer_name
        } else {
            required(&self.payee_name, Field::Payee)?;
            &self.payee_name
        };
        let drawee = if self.drawer_is_drawee {
            &self.drawer_name
        } else {
            required(&self.drawee_name, Field::Drawee)?;
            &self.drawee_name
        };
        if payee.trim() == drawee.trim() {
            return Err(ValidationError::DraweeCantBePayee);
        }

        if self.amount_numbers == 0 {
            return Err(ValidationError::InvalidSum);
        }
        required(&self.currency_code, Field::CurrencyCode)?;
        if !VALID_CURRENCIES.contains(&self.currency_code.trim()) {
            return Err(ValidationError::InvalidCurrency);
        }

        required(&self.place_of_drawing, Field::PlaceOfDrawing)?;
        required(&self.place_of_payment, Field::PlaceOfPayment)?;
        required(&self.bill_jurisdiction, Field::BillJurisdiction)?;
        required(&self.language, Field::Language)?;
        Ok(())
    }
}

/// Validates the form data of an action against the bill it is taken on. Runs before any
/// network call.
pub fn validate_bill_action(
    request: &BillActionRequest,
    bill: &Bill,
) -> Result<(), ValidationError> {
    if util::is_blank(&bill.name) {
        return Err(ValidationError::FieldEmpty(Field::BillName));
    }
    match request {
        BillActionRequest::Endorse(endorsee) => {
            required(endorsee, Field::Endorsee)?;
            if endorsee.trim() == bill.current_holder().name.trim() {
                return Err(ValidationError::EndorserCantBeEndorsee);
            }
        }
        BillActionRequest::Sell(buyer, amount_numbers) => {
            required(buyer, Field::Buyer)?;
            if *amount_numbers == 0 {
                return Err(ValidationError::InvalidSum);
            }
            if buyer.trim() == bill.current_holder().name.trim() {
                return Err(ValidationError::BuyerCantBeSeller);
            }
        }
        BillActionRequest::Pay
        | BillActionRequest::Accept
        | BillActionRequest::Buy
        | BillActionRequest::RequestToAccept
        | BillActionRequest::RequestToPay => (),
    };
    Ok(())
}
