//! Stage-status event model.
//!
//! A [`StageEvent`] is an immutable snapshot of one stage transition as
//! reported by the GoCD server. It is built by the request layer from the
//! wire payload and consumed by [`crate::compose`].

use serde::Serialize;

use crate::{PipelineCounter, PipelineName, Revision, StageCounter, StageLocator, StageName, StatusLabel};

// ---------------------------------------------------------------------------
// Stage result
// ---------------------------------------------------------------------------

/// Outcome of a stage run as reported by the server.
///
/// Values the server is known to send get their own variant. Anything else is
/// kept verbatim in [`StageResult::Other`] so the status label can still be
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StageResult {
    /// The stage completed and every job passed.
    Passed,
    /// At least one job failed.
    Failed,
    /// The stage was cancelled.
    Cancelled,
    /// The stage has been scheduled but has no result yet.
    Unknown,
    /// A result string this crate has no dedicated variant for.
    Other(String),
}

impl StageResult {
    /// Parses a raw result. Matching is exact; `"passed"` is not [`StageResult::Passed`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Passed" => Self::Passed,
            "Failed" => Self::Failed,
            "Cancelled" => Self::Cancelled,
            "Unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the raw result string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
            Self::Other(raw) => raw,
        }
    }

    /// `"triggered"` for [`StageResult::Unknown`], otherwise the raw value lowercased.
    pub fn status_label(&self) -> StatusLabel {
        let label = match self {
            Self::Unknown => "triggered".to_string(),
            other => other.as_str().to_lowercase(),
        };
        StatusLabel::from_normalized(label)
    }
}

impl std::fmt::Display for StageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Materials and build causes
// ---------------------------------------------------------------------------

/// Configuration of a Git material.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GitMaterial {
    /// Repository URL as configured on the server, in HTTPS or SSH form.
    pub url: Option<String>,
}

/// The source-control material that triggered a build cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// A Git repository.
    Git(GitMaterial),
    /// Any other material type (svn, hg, p4, tfs, dependency, plugin, ...).
    Other {
        /// Material type tag exactly as reported by the server.
        kind: String,
    },
}

impl Material {
    /// Builds a material from its type tag. `"git"` is matched case-insensitively.
    pub fn from_kind(kind: &str, git_url: Option<String>) -> Self {
        if kind.eq_ignore_ascii_case("git") {
            Self::Git(GitMaterial { url: git_url })
        } else {
            Self::Other {
                kind: kind.to_string(),
            }
        }
    }

    /// Returns the material type tag.
    pub fn kind(&self) -> &str {
        match self {
            Self::Git(_) => "git",
            Self::Other { kind } => kind,
        }
    }
}

/// A single revision pulled in by a build cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    /// The revision identifier (commit SHA for Git).
    pub revision: Revision,
}

/// One material that contributed to the pipeline run, with its modifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCause {
    /// The material that changed.
    pub material: Material,
    /// Modifications in the order the server reported them.
    pub modifications: Vec<Modification>,
}

// ---------------------------------------------------------------------------
// Stage event
// ---------------------------------------------------------------------------

/// A stage-status notification received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageEvent {
    /// Pipeline name.
    pub pipeline: PipelineName,
    /// Pipeline run counter.
    pub pipeline_counter: PipelineCounter,
    /// Stage name.
    pub stage: StageName,
    /// Stage run counter.
    pub stage_counter: StageCounter,
    /// Stage result.
    pub result: StageResult,
    /// Build causes in the order the server reported them.
    pub build_causes: Vec<BuildCause>,
}

impl StageEvent {
    /// Returns the locator identifying this stage run.
    pub fn locator(&self) -> StageLocator {
        StageLocator::new(
            &self.pipeline,
            self.pipeline_counter,
            &self.stage,
            self.stage_counter,
        )
    }
}
