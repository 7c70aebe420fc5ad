pub const CURRENCY_SAT: &str = "sat";
pub const VALID_CURRENCIES: [&str; 1] = [CURRENCY_SAT];

pub const DEFAULT_LANGUAGE: &str = "en";

// identities have to be of legal age
pub const MIN_IDENTITY_AGE_YEARS: u32 = 18;
