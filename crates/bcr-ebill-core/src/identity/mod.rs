use serde::{Deserialize, Serialize};

use crate::util::is_blank;

pub mod validation;

/// The local identity, as stored by the ledger. The key material is opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub city_of_birth: String,
    #[serde(default)]
    pub country_of_birth: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub postal_address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub public_key_pem: String,
    #[serde(default)]
    pub private_key_pem: String,
    #[serde(default)]
    pub bitcoin_public_key: String,
    #[serde(default)]
    pub bitcoin_private_key: String,
}

impl Identity {
    /// The ledger returns an empty identity until one was created
    pub fn exists(&self) -> bool {
        !is_blank(&self.name) && !is_blank(&self.email)
    }
}

/// The personal data of an identity, as sent to create or change it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IdentityForm {
    pub name: String,
    pub company: Option<String>,
    pub date_of_birth: String,
    pub city_of_birth: String,
    pub country_of_birth: String,
    pub email: String,
    pub postal_address: String,
    pub phone_number: Option<String>,
}

impl From<&Identity> for IdentityForm {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            company: identity.company.clone(),
            date_of_birth: identity.date_of_birth.clone(),
            city_of_birth: identity.city_of_birth.clone(),
            country_of_birth: identity.country_of_birth.clone(),
            email: identity.email.clone(),
            postal_address: identity.postal_address.clone(),
            phone_number: identity.phone_number.clone(),
        }
    }
}
