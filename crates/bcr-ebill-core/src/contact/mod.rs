use serde::{Deserialize, Serialize};

use crate::PeerId;

pub mod validation;

/// An entry of the local contact book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub peer_id: PeerId,
}

impl Contact {
    pub fn new(name: impl Into<String>, peer_id: PeerId) -> Self {
        Self {
            name: name.into(),
            peer_id,
        }
    }
}

pub fn find_by_name<'a>(contacts: &'a [Contact], name: &str) -> Option<&'a Contact> {
    let name = name.trim();
    contacts.iter().find(|c| c.name.trim() == name)
}
