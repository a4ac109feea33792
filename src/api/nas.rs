use serde::{Deserialize, Serialize};

use crate::api::parameter::{ParameterDocument, ParameterSpec};

/// Network shape constraints for architecture search, as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphConfig {
    pub num_layers: String,
    pub input_sizes: Vec<String>,
    pub output_sizes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Operation {
    pub operation_type: String,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfigDocument {
    pub num_layers: u32,
    #[serde(default)]
    pub input_sizes: Vec<u32>,
    #[serde(default)]
    pub output_sizes: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDocument {
    pub operation_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NasConfigDocument {
    pub graph_config: GraphConfigDocument,
    #[serde(default)]
    pub operations: Vec<OperationDocument>,
}

impl Operation {
    pub fn to_document(&self, algorithm_name: &str) -> OperationDocument {
        OperationDocument {
            operation_type: self.operation_type.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|parameter| parameter.to_document(algorithm_name))
                .collect(),
        }
    }

    pub fn from_document(document: &OperationDocument) -> Self {
        Operation {
            operation_type: document.operation_type.clone(),
            parameters: document.parameters.iter().map(ParameterSpec::from_document).collect(),
        }
    }
}

impl GraphConfig {
    pub fn from_document(document: &GraphConfigDocument) -> Self {
        GraphConfig {
            num_layers: document.num_layers.to_string(),
            input_sizes: document.input_sizes.iter().map(u32::to_string).collect(),
            output_sizes: document.output_sizes.iter().map(u32::to_string).collect(),
        }
    }
}
