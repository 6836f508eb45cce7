//! Domain models that mirror the bundled JSON datasets and get passed
//! throughout the TUI. The intent is that these types stay light-weight,
//! read-only data holders so other layers can focus on presentation and
//! filtering logic. Records are deserialized once at startup and never
//! mutated afterwards; the `name` field is the unique key used for
//! selection lookups and list diffing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "no category restriction". Always the first
/// entry of the derived category list for medicines.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single emergency contact card. The `icon` is a string identifier
/// resolved against the glyph catalog at render time, never a path.
pub struct EmergencyContact {
    /// Display name, also the unique key for the list.
    pub name: String,
    /// Dial string passed to the call dispatcher verbatim. Kept as text so
    /// helplines with dashes or extensions survive untouched.
    pub phone_number: String,
    /// Glyph catalog identifier. The bundled data calls this field `icons`.
    #[serde(rename = "icons")]
    pub icon: String,
}

impl EmergencyContact {
    /// Search predicate for the contacts screen. Contacts only match on
    /// their name; the phone number is display-only.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.name.to_lowercase().contains(&q)
    }
}

impl fmt::Display for EmergencyContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.phone_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A medical-condition article. The list-valued fields are rendered as
/// bulleted sections on the detail screen and all participate in search.
pub struct Article {
    /// Condition name, unique key.
    pub name: String,
    /// Glyph catalog identifier for the header image.
    pub image: String,
    /// One-paragraph definition shown at the top of the detail screen.
    pub definition: String,
    pub types: Vec<String>,
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub prevention_strategy: Vec<String>,
}

impl Article {
    /// Case-insensitive substring search over every descriptive field. A
    /// blank query matches everything; otherwise one containing field is
    /// enough, so "wheez" finds Asthma through its symptom list.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.searchable_fields()
            .any(|field| field.to_lowercase().contains(&q))
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.definition.as_str()]
            .into_iter()
            .chain(self.types.iter().map(String::as_str))
            .chain(self.causes.iter().map(String::as_str))
            .chain(self.symptoms.iter().map(String::as_str))
            .chain(self.prevention_strategy.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A medicine entry. `category` is many-valued; the derived "all
/// categories" chip row on the list screen is built from these lists.
pub struct Medicine {
    /// Unique key. The bundled data calls this field `medicineName`.
    #[serde(rename = "medicineName")]
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub uses: Vec<String>,
    pub how_to_use: String,
    pub side_effects: Vec<String>,
    pub precautions: Vec<String>,
    pub interactions: Vec<String>,
    pub storage_instructions: String,
    pub warnings: String,
}

impl Medicine {
    /// Case-insensitive substring search over the full descriptive field
    /// set: name, description, uses, how-to-use, side effects, precautions,
    /// interactions, storage instructions, and warnings.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.searchable_fields()
            .any(|field| field.to_lowercase().contains(&q))
    }

    /// Category predicate. The `All` sentinel matches any record; otherwise
    /// the medicine must list the category explicitly.
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category.iter().any(|c| c == category)
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.how_to_use.as_str(),
            self.storage_instructions.as_str(),
            self.warnings.as_str(),
        ]
        .into_iter()
        .chain(self.uses.iter().map(String::as_str))
        .chain(self.side_effects.iter().map(String::as_str))
        .chain(self.precautions.iter().map(String::as_str))
        .chain(self.interactions.iter().map(String::as_str))
    }
}

/// Derive the distinct category list across all loaded medicines, always
/// prefixed with the `All` sentinel. First-seen order is preserved so the
/// chip row stays stable between recomputations.
pub fn derive_categories(medicines: &[Medicine]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for medicine in medicines {
        for category in &medicine.category {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.clone());
            }
        }
    }
    categories
}
