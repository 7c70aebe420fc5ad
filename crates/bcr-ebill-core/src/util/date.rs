use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub type DateTimeUtc = DateTime<Utc>;

/// Returns the current time as DateTime
pub fn now() -> DateTimeUtc {
    Utc::now()
}

/// Returns today's date in UTC
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Full years between the given birth date and the reference date. Negative, if the birth date
/// is in the future.
pub fn age_in_years(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
