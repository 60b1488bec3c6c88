//! Newtype identifiers.
//!
//! Every concept with an identity is a distinct newtype wrapping a primitive,
//! so a [`PipelineName`] can never be passed where a [`StageName`] is expected
//! even though both are strings underneath.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (server-assigned run counters).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new counter from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

u64_id! {
    /// The run number of a pipeline instance, assigned by the GoCD server.
    PipelineCounter
}

u64_id! {
    /// The run number of a stage within one pipeline instance.
    ///
    /// Greater than one only when the stage has been re-run.
    StageCounter
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

string_id! {
    /// A pipeline name as configured on the GoCD server (e.g. `"build-1"`).
    PipelineName
}

string_id! {
    /// A stage name within a pipeline (e.g. `"unit-tests"`).
    StageName
}

string_id! {
    /// A source-control revision identifier. For Git materials, a commit SHA.
    Revision
}

// ---------------------------------------------------------------------------
// Derived identifiers
// ---------------------------------------------------------------------------

/// Path-like identifier of one stage run: `pipeline/counter/stage/stage-counter`.
///
/// Always exactly four segments; unique per stage run on a given server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StageLocator(String);

impl StageLocator {
    /// Joins the four stage coordinates with `/` in their fixed order.
    pub fn new(
        pipeline: &PipelineName,
        pipeline_counter: PipelineCounter,
        stage: &StageName,
        stage_counter: StageCounter,
    ) -> Self {
        Self(format!(
            "{pipeline}/{pipeline_counter}/{stage}/{stage_counter}"
        ))
    }

    /// Returns the locator as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized status word shown in the message and sent as the `status` field.
///
/// Produced only by [`crate::StageResult::status_label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StatusLabel(String);

impl StatusLabel {
    pub(crate) fn from_normalized(value: String) -> Self {
        Self(value)
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single delivery attempt.
///
/// Generated fresh for every dispatched notification and attached to the
/// delivery span so all log lines of one attempt can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
