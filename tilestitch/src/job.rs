//! Job identifiers and descriptors.
//!
//! A job is one image reconstruction request: the remote image id plus the
//! server it lives on.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use thiserror::Error;

use crate::provider::Endpoint;

/// Identifier of a remote image. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(NonZeroU64);

/// Error returned when text is not a valid job id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid job id '{input}': expected a positive integer")]
pub struct JobIdError {
    /// The rejected input, trimmed
    pub input: String,
}

impl JobId {
    /// Creates a job id, returning `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    /// Returns the numeric value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = JobIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Digits only: rejects signs and whitespace inside the token.
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JobIdError {
                input: trimmed.to_string(),
            });
        }
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(JobId::new)
            .ok_or_else(|| JobIdError {
                input: trimmed.to_string(),
            })
    }
}

/// One reconstruction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Remote image id
    pub id: JobId,
    /// Server the image is fetched from
    pub endpoint: Endpoint,
}

impl JobDescriptor {
    /// Creates a descriptor for `id` on `endpoint`.
    pub fn new(id: JobId, endpoint: Endpoint) -> Self {
        Self { id, endpoint }
    }
}
