use crate::{
    api::{id::ExperimentKey, table::Table, trial::NasStep},
    store::Reducer,
};

/// Detail view of one experiment: manifest, suggestion, trial table or NAS steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonitorState {
    pub experiment: Option<ExperimentKey>,
    pub manifest: Option<serde_json::Value>,
    pub suggestion: Option<serde_json::Value>,
    pub job_info: Table,
    /// Per-trial metrics of the trial opened from the job table.
    pub trial_info: Option<(String, Table)>,
    pub nas_steps: Vec<NasStep>,
    pub loading: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonitorAction {
    /// Starts loading data for an experiment, clearing whatever another experiment left.
    Fetch(ExperimentKey),
    FetchExperimentSuccess(serde_json::Value),
    FetchSuggestionSuccess(serde_json::Value),
    FetchHpJobInfoSuccess(Table),
    FetchTrialInfo,
    FetchTrialInfoSuccess(String, Table),
    FetchNasJobInfoSuccess(Vec<NasStep>),
    FetchFailure(String),
    CloseTrialInfo,
}

impl Reducer for MonitorState {
    type Action = MonitorAction;

    fn reduce(&self, action: &MonitorAction) -> Self {
        match action {
            MonitorAction::Fetch(experiment) if self.experiment.as_ref() == Some(experiment) => MonitorState {
                loading: true,
                ..self.clone()
            },
            MonitorAction::Fetch(experiment) => MonitorState {
                experiment: Some(experiment.clone()),
                loading: true,
                ..MonitorState::default()
            },
            MonitorAction::FetchExperimentSuccess(manifest) => MonitorState {
                manifest: Some(manifest.clone()),
                loading: false,
                ..self.clone()
            },
            MonitorAction::FetchSuggestionSuccess(suggestion) => MonitorState {
                suggestion: Some(suggestion.clone()),
                loading: false,
                ..self.clone()
            },
            MonitorAction::FetchHpJobInfoSuccess(table) => MonitorState {
                job_info: table.clone(),
                loading: false,
                ..self.clone()
            },
            MonitorAction::FetchTrialInfo => MonitorState {
                loading: true,
                ..self.clone()
            },
            MonitorAction::FetchTrialInfoSuccess(trial, table) => MonitorState {
                trial_info: Some((trial.clone(), table.clone())),
                loading: false,
                ..self.clone()
            },
            MonitorAction::FetchNasJobInfoSuccess(steps) => MonitorState {
                nas_steps: steps.clone(),
                loading: false,
                ..self.clone()
            },
            MonitorAction::FetchFailure(message) => MonitorState {
                loading: false,
                message: Some(message.clone()),
                ..self.clone()
            },
            MonitorAction::CloseTrialInfo => MonitorState {
                trial_info: None,
                ..self.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_experiment_clears_previous_data() {
        let first = MonitorState::default()
            .reduce(&MonitorAction::Fetch(ExperimentKey::new("a", "kubeflow")))
            .reduce(&MonitorAction::FetchHpJobInfoSuccess(Table::parse("trialName\nt1")));
        assert!(!first.job_info.is_empty());

        let again = first.reduce(&MonitorAction::Fetch(ExperimentKey::new("a", "kubeflow")));
        assert_eq!(again.job_info, first.job_info);

        let second = first.reduce(&MonitorAction::Fetch(ExperimentKey::new("b", "kubeflow")));
        assert!(second.job_info.is_empty());
        assert!(second.loading);
    }

    #[test]
    fn failure_keeps_loaded_table() {
        let state = MonitorState::default()
            .reduce(&MonitorAction::FetchHpJobInfoSuccess(Table::parse("trialName\nt1")))
            .reduce(&MonitorAction::FetchTrialInfo)
            .reduce(&MonitorAction::FetchFailure("trial not found".to_owned()));
        assert_eq!(state.job_info.rows.len(), 1);
        assert_eq!(state.trial_info, None);
        assert_eq!(state.message.as_deref(), Some("trial not found"));
    }
}
