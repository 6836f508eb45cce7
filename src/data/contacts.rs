use crate::models::EmergencyContact;

use super::codec::{parse_dataset, DataError};

/// Emergency contact dataset compiled into the binary. Editing the JSON
/// and rebuilding is the only way the contact list changes.
const EMERGENCY_JSON: &str = include_str!("../../assets/emergency.json");

/// Load every emergency contact in bundled order.
pub fn load_contacts() -> Result<Vec<EmergencyContact>, DataError> {
    parse_dataset("emergency", EMERGENCY_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_contacts_parse_and_keep_source_order() {
        let contacts = load_contacts().expect("bundled emergency.json must parse");
        assert!(!contacts.is_empty());
        assert_eq!(contacts[0].name, "Ambulance");
        assert_eq!(contacts[0].phone_number, "102");
    }
}
