use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which boundary of a resampling window a check was made against.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WindowEdge {
    /// The first output slot, expected to sit exactly on the window start.
    Start,
    /// The last output slot, expected to sit exactly on the window end.
    End,
}

impl fmt::Display for WindowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Unified error type for the nimbus workspace.
///
/// Covers the core validation failures (duration grammar, window bounds,
/// cross-source consistency) as well as provider-tagged failures and
/// aggregates raised by the orchestration layer. Errors are returned to the
/// caller as-is; nothing in the workspace retries internally.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NimbusError {
    /// A duration designator was missing its marker or failed to scan.
    #[error("malformed duration: {input}")]
    MalformedDuration {
        /// The raw string that was rejected.
        input: String,
    },

    /// A resampled series did not land exactly on the requested window bound.
    ///
    /// Indicates that the source's advertised window was inconsistent with its
    /// actual samples; diagnostic, not recoverable.
    #[error(
        "{edge} time does not match for {series} from {source_id}: expected={expected} found={found}"
    )]
    WindowMismatch {
        /// Label of the affected series.
        series: String,
        /// Source identifier of the affected series.
        // Named `source_id` rather than `source`: thiserror reserves a field
        // literally named `source` as the error's `std::error::Error::source`,
        // which a `String` cannot satisfy. `#[serde(rename)]` keeps the wire
        // format and the Display text unchanged.
        #[serde(rename = "source")]
        source_id: String,
        /// Which window boundary failed the check.
        edge: WindowEdge,
        /// The requested boundary instant, RFC 3339.
        expected: String,
        /// The instant actually found at that slot, RFC 3339.
        found: String,
    },

    /// Unit strings disagree across sources for elevation or a named series.
    #[error("unit mismatch for {context}: {found} != {expected}")]
    UnitMismatch {
        /// Offending index or series key, e.g. `elevation[i=1]` or `temperature`.
        context: String,
        /// Unit carried by the reference source.
        expected: String,
        /// Unit carried by the disagreeing source.
        found: String,
    },

    /// Two resampled series disagree on length; a resampler contract violation.
    ///
    /// Logic-error class: resampling onto a shared window guarantees equal
    /// lengths by construction, so this must not be retried.
    #[error(
        "length mismatch for {series}: {found} from {other_source} != {expected} from {base_source}"
    )]
    LengthMismatch {
        /// Label of the affected series.
        series: String,
        /// Source whose length is taken as the reference.
        base_source: String,
        /// Source that disagreed.
        other_source: String,
        /// Reference length.
        expected: usize,
        /// Disagreeing length.
        found: usize,
    },

    /// Aligned output slots carry different time points; a resampler contract
    /// violation, logic-error class like [`NimbusError::LengthMismatch`].
    #[error(
        "time alignment mismatch for {series} at index {index}: {other_source} disagrees with {base_source}"
    )]
    TimeAlignmentMismatch {
        /// Label of the affected series.
        series: String,
        /// First disagreeing slot index.
        index: usize,
        /// Source whose slots are taken as the reference.
        base_source: String,
        /// Source that disagreed.
        other_source: String,
    },

    /// Averaging was invoked with no forecasts.
    #[error("no forecasts to average")]
    NoInputData,

    /// Issues with the returned or expected data (empty series, bad ordering, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found (e.g. no grid data for a point).
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "gridpoint for 64.8,-147.7".
        what: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "grid-forecast").
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<NimbusError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl NimbusError {
    /// Helper: build a `MalformedDuration` error from the rejected input.
    pub fn malformed_duration(input: impl Into<String>) -> Self {
        Self::MalformedDuration {
            input: input.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
