use serde::{Deserialize, Serialize};

/// A placeholder declared by a trial template, e.g. `{trialParameters.learningRate}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialParameter {
    pub name: String,
    pub reference: String,
    pub description: String,
}

impl TrialParameter {
    pub fn named(name: impl Into<String>) -> Self {
        TrialParameter {
            name: name.into(),
            reference: String::new(),
            description: String::new(),
        }
    }
}

/// One step of a NAS experiment, after key normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasStep {
    /// Architecture graph description as produced by the suggestion service.
    pub architecture: String,
    #[serde(rename = "metricsname", default)]
    pub metrics_name: Vec<String>,
    #[serde(rename = "metricsvalue", default)]
    pub metrics_value: Vec<String>,
}

impl NasStep {
    /// Pairs metric names with their values, dropping unpaired trailing entries.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metrics_name
            .iter()
            .zip(self.metrics_value.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nas_step_pairs_metrics() {
        let step = NasStep {
            architecture: "[[3], [0, 1]]".to_owned(),
            metrics_name: vec!["Validation-Accuracy".to_owned(), "loss".to_owned()],
            metrics_value: vec!["0.71".to_owned()],
        };
        let pairs = step.metrics().collect::<Vec<_>>();
        assert_eq!(pairs, vec![("Validation-Accuracy", "0.71")]);
    }
}
