use crate::{Field, PeerId, ValidationError, util::is_blank};

use super::{Contact, find_by_name};

fn validate_contact_fields(name: &str, peer_id: &PeerId) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::FieldEmpty(Field::Name));
    }
    if peer_id.is_empty() {
        return Err(ValidationError::FieldEmpty(Field::PeerId));
    }
    Ok(())
}

pub fn validate_create_contact(
    name: &str,
    peer_id: &PeerId,
    existing: &[Contact],
) -> Result<(), ValidationError> {
    validate_contact_fields(name, peer_id)?;
    if find_by_name(existing, name).is_some() {
        return Err(ValidationError::ContactAlreadyExists(name.trim().to_owned()));
    }
    Ok(())
}

pub fn validate_update_contact(
    old_name: &str,
    name: &str,
    peer_id: &PeerId,
    existing: &[Contact],
) -> Result<(), ValidationError> {
    if find_by_name(existing, old_name).is_none() {
        return Err(ValidationError::UnknownContact(old_name.trim().to_owned()));
    }
    validate_contact_fields(name, peer_id)?;
    // renaming onto another existing contact
    if name.trim() != old_name.trim() && find_by_name(existing, name).is_some() {
        return Err(ValidationError::ContactAlreadyExists(name.trim().to_owned()));
    }
    Ok(())
}

pub fn validate_remove_contact(name: &str, existing: &[Contact]) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::FieldEmpty(Field::Name));
    }
    if find_by_name(existing, name).is_none() {
        return Err(ValidationError::UnknownContact(name.trim().to_owned()));
    }
    Ok(())
}
