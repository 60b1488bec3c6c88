//! Wire shapes of incoming request bodies and their conversion to domain types.
//!
//! Only the fields the notifier needs are decoded; everything else the
//! server sends (jobs, timestamps, approval details) is ignored.

use std::collections::HashMap;

use serde::Deserialize;

use notifier::{
    BuildCause, Material, Modification, PipelineCounter, PipelineName, Revision, StageCounter,
    StageEvent, StageName, StageResult,
};

use crate::{PluginError, RequestName};

// ---------------------------------------------------------------------------
// stage-status
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StageStatusBody {
    pipeline: PipelineBody,
}

#[derive(Debug, Deserialize)]
struct PipelineBody {
    name: String,
    counter: Counter,
    #[serde(rename = "build-cause", default)]
    build_cause: Vec<BuildCauseBody>,
    stage: StageBody,
}

#[derive(Debug, Deserialize)]
struct StageBody {
    name: String,
    counter: Counter,
    #[serde(default)]
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildCauseBody {
    material: MaterialBody,
    #[serde(default)]
    modifications: Vec<ModificationBody>,
}

#[derive(Debug, Deserialize)]
struct MaterialBody {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "git-configuration", default)]
    git_configuration: Option<GitConfigurationBody>,
}

#[derive(Debug, Deserialize)]
struct GitConfigurationBody {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModificationBody {
    revision: String,
}

// The server sends counters as strings; accept numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Counter {
    Number(u64),
    Text(String),
}

impl Counter {
    fn value(&self, field: &str) -> Result<u64, PluginError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => text.trim().parse().map_err(|_| PluginError::InvalidStageEvent {
                reason: format!("{field} '{text}' is not a number"),
            }),
        }
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, PluginError> {
    value.ok_or_else(|| PluginError::InvalidStageEvent {
        reason: format!("empty {what}"),
    })
}

impl StageStatusBody {
    fn into_event(self) -> Result<StageEvent, PluginError> {
        let pipeline = self.pipeline;

        let build_causes = pipeline
            .build_cause
            .into_iter()
            .map(BuildCauseBody::into_build_cause)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StageEvent {
            pipeline: required(PipelineName::new(pipeline.name), "pipeline name")?,
            pipeline_counter: PipelineCounter::new(pipeline.counter.value("pipeline counter")?),
            stage: required(StageName::new(pipeline.stage.name), "stage name")?,
            stage_counter: StageCounter::new(pipeline.stage.counter.value("stage counter")?),
            result: StageResult::parse(pipeline.stage.result.as_deref().unwrap_or("Unknown")),
            build_causes,
        })
    }
}

impl BuildCauseBody {
    fn into_build_cause(self) -> Result<BuildCause, PluginError> {
        let git_url = self.material.git_configuration.and_then(|git| git.url);
        let modifications = self
            .modifications
            .into_iter()
            .map(|m| -> Result<Modification, PluginError> {
                Ok(Modification {
                    revision: required(Revision::new(m.revision), "revision")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuildCause {
            material: Material::from_kind(&self.material.kind, git_url),
            modifications,
        })
    }
}

/// Decodes a `stage-status` request body into a [`StageEvent`].
///
/// A missing stage result is read as `"Unknown"`.
pub fn parse_stage_status(body: &str) -> Result<StageEvent, PluginError> {
    let decoded: StageStatusBody =
        serde_json::from_str(body).map_err(|e| PluginError::InvalidRequestBody {
            request: RequestName::StageStatus.to_string(),
            reason: e.to_string(),
        })?;
    decoded.into_event()
}

// ---------------------------------------------------------------------------
// go.plugin-settings.validate-configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValidateConfigurationBody {
    #[serde(rename = "plugin-settings", default)]
    plugin_settings: HashMap<String, SettingValue>,
}

#[derive(Debug, Deserialize)]
struct SettingValue {
    #[serde(default)]
    value: Option<String>,
}

/// Decodes `{"plugin-settings": {"<key>": {"value": "..."}}}` into plain key/value pairs.
pub(crate) fn parse_settings_to_validate(body: &str) -> Result<HashMap<String, String>, PluginError> {
    let decoded: ValidateConfigurationBody =
        serde_json::from_str(body).map_err(|e| PluginError::InvalidRequestBody {
            request: RequestName::ValidateConfiguration.to_string(),
            reason: e.to_string(),
        })?;

    Ok(decoded
        .plugin_settings
        .into_iter()
        .filter_map(|(key, setting)| setting.value.map(|value| (key, value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier::GitMaterial;
    use pretty_assertions::assert_eq;

    const STAGE_STATUS: &str = r#"{
        "pipeline": {
            "name": "build-1",
            "counter": "42",
            "group": "defaultGroup",
            "build-cause": [
                {
                    "material": {
                        "git-configuration": {
                            "shallow-clone": false,
                            "branch": "master",
                            "url": "https://github.com/org/repo.git"
                        },
                        "type": "git"
                    },
                    "changed": true,
                    "modifications": [
                        {
                            "revision": "abc123",
                            "modified-time": "2016-04-06T12:50:03.317Z",
                            "data": {}
                        }
                    ]
                },
                {
                    "material": {
                        "svn-configuration": { "url": "https://svn.example.org/trunk" },
                        "type": "svn"
                    },
                    "changed": false,
                    "modifications": [ { "revision": "1207" } ]
                }
            ],
            "stage": {
                "name": "unit-tests",
                "counter": "1",
                "approval-type": "success",
                "approved-by": "changes",
                "state": "Passed",
                "result": "Passed",
                "create-time": "2016-04-06T12:50:03.317Z",
                "last-transition-time": "2016-04-06T12:52:03.317Z",
                "jobs": []
            }
        }
    }"#;

    #[test]
    fn decodes_server_payload() {
        let event = parse_stage_status(STAGE_STATUS).unwrap();

        assert_eq!(event.locator().as_str(), "build-1/42/unit-tests/1");
        assert_eq!(event.result, StageResult::Passed);
        assert_eq!(event.build_causes.len(), 2);
        assert_eq!(
            event.build_causes[0].material,
            Material::Git(GitMaterial {
                url: Some("https://github.com/org/repo.git".to_string())
            })
        );
        assert_eq!(event.build_causes[0].modifications[0].revision.as_str(), "abc123");
        assert_eq!(event.build_causes[1].material.kind(), "svn");
    }

    #[test]
    fn numeric_counters_and_missing_build_causes_are_accepted() {
        let event = parse_stage_status(
            r#"{"pipeline": {"name": "p", "counter": 7,
                "stage": {"name": "s", "counter": 2}}}"#,
        )
        .unwrap();

        assert_eq!(event.locator().as_str(), "p/7/s/2");
        assert_eq!(event.result, StageResult::Unknown);
        assert!(event.build_causes.is_empty());
    }

    #[test]
    fn non_numeric_counter_is_rejected() {
        let err = parse_stage_status(
            r#"{"pipeline": {"name": "p", "counter": "x",
                "stage": {"name": "s", "counter": "1", "result": "Passed"}}}"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            PluginError::InvalidStageEvent {
                reason: "pipeline counter 'x' is not a number".to_string()
            }
        );
    }

    #[test]
    fn empty_pipeline_name_is_rejected() {
        let err = parse_stage_status(
            r#"{"pipeline": {"name": "", "counter": "1",
                "stage": {"name": "s", "counter": "1"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PluginError::InvalidStageEvent { .. }));
    }

    #[test]
    fn malformed_json_is_an_invalid_body() {
        let err = parse_stage_status("{").unwrap_err();
        assert!(matches!(err, PluginError::InvalidRequestBody { .. }));
    }

    #[test]
    fn settings_to_validate_are_flattened() {
        let values = parse_settings_to_validate(
            r#"{"plugin-settings": {
                "go_server_url": {"value": "https://ci"},
                "gitter_webhook_url": {}
            }}"#,
        )
        .unwrap();

        assert_eq!(values.get("go_server_url").map(String::as_str), Some("https://ci"));
        assert!(!values.contains_key("gitter_webhook_url"));
    }
}
