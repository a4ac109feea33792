use serde::{Deserialize, Serialize};

use crate::api::{
    algorithm::{AlgorithmDocument, ObjectiveDocument},
    collector::MetricsCollectorDocument,
    nas::NasConfigDocument,
    parameter::ParameterDocument,
    trial::TrialParameter,
};

pub const API_VERSION: &str = "kubeflow.org/v1beta1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapReference {
    pub config_map_name: String,
    pub config_map_namespace: String,
    pub template_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialTemplateDocument {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_container_name: String,
    #[serde(default)]
    pub trial_parameters: Vec<TrialParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_spec: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSpecDocument {
    pub parallel_trial_count: u32,
    pub max_trial_count: u32,
    pub max_failed_trial_count: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resume_policy: String,
    pub objective: ObjectiveDocument,
    pub algorithm: AlgorithmDocument,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nas_config: Option<NasConfigDocument>,
    pub trial_template: TrialTemplateDocument,
    pub metrics_collector_spec: MetricsCollectorDocument,
}

/// The experiment manifest posted by `submit_hp_job` and `submit_nas_job`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ExperimentSpecDocument,
}
