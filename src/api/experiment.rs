use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::api::id::ExperimentKey;

/// An experiment as listed by `fetch_experiments`, after key normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub namespace: String,
    pub status: ExperimentStatus,
    #[serde(default, rename = "creationtimestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Experiment {
    pub fn key(&self) -> ExperimentKey {
        ExperimentKey::new(self.name.clone(), self.namespace.as_str())
    }

    pub fn is(&self, key: &ExperimentKey) -> bool {
        self.name == key.name && self.namespace == key.namespace.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperimentStatus {
    Created,
    Running,
    Restarting,
    Succeeded,
    Failed,
    Unknown(String),
}

impl ExperimentStatus {
    /// The statuses offered as filter checkboxes.
    pub const KNOWN: [ExperimentStatus; 5] = [
        ExperimentStatus::Created,
        ExperimentStatus::Running,
        ExperimentStatus::Restarting,
        ExperimentStatus::Succeeded,
        ExperimentStatus::Failed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ExperimentStatus::Created => "Created",
            ExperimentStatus::Running => "Running",
            ExperimentStatus::Restarting => "Restarting",
            ExperimentStatus::Succeeded => "Succeeded",
            ExperimentStatus::Failed => "Failed",
            ExperimentStatus::Unknown(status) => status,
        }
    }
}

impl From<&str> for ExperimentStatus {
    fn from(value: &str) -> Self {
        match value {
            "Created" => ExperimentStatus::Created,
            "Running" => ExperimentStatus::Running,
            "Restarting" => ExperimentStatus::Restarting,
            "Succeeded" => ExperimentStatus::Succeeded,
            "Failed" => ExperimentStatus::Failed,
            _ => ExperimentStatus::Unknown(value.to_owned()),
        }
    }
}

impl From<String> for ExperimentStatus {
    fn from(value: String) -> Self {
        ExperimentStatus::from(value.as_str())
    }
}

impl From<ExperimentStatus> for String {
    fn from(status: ExperimentStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
