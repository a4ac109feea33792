use thiserror::Error;

pub type TransportError = anyhow::Error;

/// Failure of a single backend call.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered with a non-200 status.
    #[error("{status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("request failed: {0:?}")]
    Transport(#[from] TransportError),
    #[error("malformed response: {0:?}")]
    Malformed(#[source] anyhow::Error),
}

impl GatewayError {
    /// Text shown in the transient notification.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            GatewayError::Rejected { status, .. } => format!("Request failed with status {}", status),
            GatewayError::Transport(err) => format!("Request failed: {}", err),
            GatewayError::Malformed(err) => format!("Unexpected response: {}", err),
        }
    }
}

/// Failure turning form state into an experiment document.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("no trial template is selected")]
    NoTrialTemplate,
    #[error("experiment name is empty")]
    MissingName,
    #[error("trial template {config_map_namespace}/{config_map_name}/{template_path} does not exist")]
    UnknownTemplate {
        config_map_namespace: String,
        config_map_name: String,
        template_path: String,
    },
    #[error("algorithm {algorithm:?} cannot run {job}")]
    UnsupportedAlgorithm { algorithm: String, job: &'static str },
    #[error("{field} must be a number, found {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("custom collector is not valid yaml: {0}")]
    CustomCollector(#[source] serde_yaml::Error),
    #[error("trial template is not valid yaml: {0}")]
    TrialTemplate(#[source] serde_yaml::Error),
    #[error("experiment yaml could not be parsed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config file could not be read: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = GatewayError::Rejected {
            status: 500,
            message: "wrong namespace".to_owned(),
        };
        assert_eq!(err.user_message(), "wrong namespace");

        let err = GatewayError::Rejected {
            status: 404,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Request failed with status 404");
    }
}
