use chrono::NaiveDate;

use crate::{
    Field, ValidationError,
    constants::MIN_IDENTITY_AGE_YEARS,
    date::Date,
    util::{date::age_in_years, is_blank},
};

use super::IdentityForm;

fn required(value: &str, field: Field) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::FieldEmpty(field));
    }
    Ok(())
}

/// Validates identity data for creating or changing the identity, relative to `today`
pub fn validate_identity(form: &IdentityForm, today: NaiveDate) -> Result<(), ValidationError> {
    required(&form.name, Field::Name)?;

    required(&form.email, Field::Email)?;
    if !form.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    required(&form.date_of_birth, Field::DateOfBirth)?;
    let date_of_birth = Date::new(&form.date_of_birth)?;
    if age_in_years(date_of_birth.to_naive(), today) < MIN_IDENTITY_AGE_YEARS as i32 {
        return Err(ValidationError::InvalidAge(MIN_IDENTITY_AGE_YEARS));
    }

    required(&form.city_of_birth, Field::CityOfBirth)?;
    required(&form.country_of_birth, Field::CountryOfBirth)?;
    required(&form.postal_address, Field::PostalAddress)?;
    Ok(())
}
