use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub mod balance;
pub mod bill;
pub mod blockchain;
pub mod constants;
pub mod contact;
pub mod date;
pub mod identity;
#[cfg(test)]
mod tests;
pub mod util;

/// The identifier of a node in the peer-to-peer identity system.
///
/// Peer ids are opaque to the client, they are only ever compared by value. An empty peer id is
/// a valid value on the wire (e.g. a party that was never filled in), but it never matches
/// anything - see [PeerId::matches].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value equality that fails closed: an empty id on either side is never a match
    pub fn matches(&self, other: &PeerId) -> bool {
        !self.is_empty() && !other.is_empty() && self.0 == other.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PeerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let peer_id = PeerId::new(s);
        if peer_id.is_empty() {
            return Err(ValidationError::FieldEmpty(Field::PeerId));
        }
        Ok(peer_id)
    }
}

/// This is needed, so we can have our services be used both in a single threaded (wasm32) and in a
/// multi-threaded (e.g. cli) environment without issues.
#[cfg(not(target_arch = "wasm32"))]
pub trait ServiceTraitBounds: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait ServiceTraitBounds {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Name,
    Email,
    PeerId,
    DateOfBirth,
    CityOfBirth,
    CountryOfBirth,
    PostalAddress,
    BillName,
    MaturityDate,
    DateOfIssue,
    Payee,
    Drawee,
    DrawerName,
    PlaceOfDrawing,
    PlaceOfPayment,
    BillJurisdiction,
    Language,
    CurrencyCode,
    Amount,
    Endorsee,
    Buyer,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Field {0:?} can't be empty")]
    FieldEmpty(Field),

    #[error("invalid sum")]
    InvalidSum,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid age: must be at least {0} years old")]
    InvalidAge(u32),

    #[error("invalid email")]
    InvalidEmail,

    #[error("invalid currency")]
    InvalidCurrency,

    #[error("issue date after maturity date")]
    IssueDateAfterMaturityDate,

    #[error("Drawee can't be Payee at the same time")]
    DraweeCantBePayee,

    #[error("Drawer can't be Payee and Drawee at the same time")]
    DrawerCantBePayeeAndDrawee,

    #[error("Endorser can't be Endorsee at the same time")]
    EndorserCantBeEndorsee,

    #[error("Buyer can't be Seller at the same time")]
    BuyerCantBeSeller,

    #[error("a contact with the name {0} already exists")]
    ContactAlreadyExists(String),

    #[error("no contact with the name {0} exists")]
    UnknownContact(String),
}
