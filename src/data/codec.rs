//! Shared JSON codec for the bundled datasets. Every dataset is a JSON
//! array compiled into the binary, so a parse failure is a build/asset
//! integrity problem and gets reported as a fatal startup error rather
//! than handled at runtime.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure classes for the bundled data. There is no I/O variant because
/// the datasets are embedded with `include_str!`; the only way to fail is
/// a schema mismatch between the JSON and the model types.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("bundled dataset '{dataset}' is malformed: {source}")]
    Malformed {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Deserialize one bundled dataset into a typed list, preserving the JSON
/// array order. The `dataset` name only feeds error messages.
pub fn parse_dataset<T: DeserializeOwned>(
    dataset: &'static str,
    raw: &str,
) -> Result<Vec<T>, DataError> {
    serde_json::from_str(raw).map_err(|source| DataError::Malformed { dataset, source })
}
