use crate::models::Medicine;

use super::codec::{parse_dataset, DataError};

/// Medicine dataset compiled into the binary.
const MEDICINE_JSON: &str = include_str!("../../assets/medicine.json");

/// Load every medicine entry in bundled order.
pub fn load_medicines() -> Result<Vec<Medicine>, DataError> {
    parse_dataset("medicine", MEDICINE_JSON)
}
