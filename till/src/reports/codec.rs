//! JSON codec for persisted bucket collections
//!
//! Decoding is schema-checked: a value that parses as JSON but violates the
//! bucket invariants is rejected just like unparsable bytes.

use shared::report::ReportBucket;
use std::collections::HashSet;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why a stored collection was rejected
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema violation in bucket {period_key}: {source}")]
    Schema {
        period_key: String,
        #[source]
        source: ValidationErrors,
    },

    #[error("Duplicate item {name} in bucket {period_key}")]
    DuplicateItem { period_key: String, name: String },

    #[error("Duplicate bucket for period {0}")]
    DuplicatePeriod(String),
}

/// Serialize a bucket collection
pub fn encode_buckets(buckets: &[ReportBucket]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(buckets)
}

/// Parse and validate a bucket collection
pub fn decode_buckets(bytes: &[u8]) -> Result<Vec<ReportBucket>, DecodeError> {
    let buckets: Vec<ReportBucket> = serde_json::from_slice(bytes)?;

    let mut periods = HashSet::new();
    for bucket in &buckets {
        bucket.validate().map_err(|source| DecodeError::Schema {
            period_key: bucket.period_key.clone(),
            source,
        })?;

        if !periods.insert(bucket.period_key.as_str()) {
            return Err(DecodeError::DuplicatePeriod(bucket.period_key.clone()));
        }

        let mut names = HashSet::new();
        for item in &bucket.items {
            if !names.insert(item.name.as_str()) {
                return Err(DecodeError::DuplicateItem {
                    period_key: bucket.period_key.clone(),
                    name: item.name.clone(),
                });
            }
        }
    }

    Ok(buckets)
}
