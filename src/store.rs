pub mod algorithm;
pub mod experiments;
pub mod graph_config;
pub(crate) mod list;
pub mod metadata;
pub mod metrics_collector;
pub mod monitor;
pub mod objective;
pub mod parameters;
pub mod submit;
pub mod templates;
pub mod trial_template;

use algorithm::{AlgorithmAction, AlgorithmState};
use experiments::{ExperimentsAction, ExperimentsState};
use graph_config::{GraphConfigAction, GraphConfigState};
use metadata::{MetadataAction, MetadataState};
use metrics_collector::{MetricsCollectorAction, MetricsCollectorState};
use monitor::{MonitorAction, MonitorState};
use objective::{ObjectiveAction, ObjectiveState};
use parameters::{ParametersAction, ParametersState};
use submit::{SubmitAction, SubmitState};
use templates::{TemplatesAction, TemplatesState};
use trial_template::{TrialTemplateAction, TrialTemplateState};

use tracing::trace;

/// A pure state transition.
///
/// `reduce` must not panic and must return the same state for the same input.
pub trait Reducer: Sized {
    type Action;

    fn reduce(&self, action: &Self::Action) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Experiments(ExperimentsAction),
    Metadata(MetadataAction),
    Objective(ObjectiveAction),
    Algorithm(AlgorithmAction),
    Parameters(ParametersAction),
    GraphConfig(GraphConfigAction),
    MetricsCollector(MetricsCollectorAction),
    TrialTemplate(TrialTemplateAction),
    Templates(TemplatesAction),
    Monitor(MonitorAction),
    Submit(SubmitAction),
    /// Shows a transient message without touching any domain.
    Notify(String),
    DismissNotification,
}

impl Action {
    /// The message a failure action carries, if this is one.
    pub fn failure_message(&self) -> Option<&str> {
        let message = match self {
            Action::Experiments(ExperimentsAction::FetchExperimentsFailure(message))
            | Action::Experiments(ExperimentsAction::FetchNamespacesFailure(message))
            | Action::Experiments(ExperimentsAction::DeleteExperimentFailure(message))
            | Action::TrialTemplate(TrialTemplateAction::FetchTemplatesFailure(message))
            | Action::Templates(TemplatesAction::FetchTemplatesFailure(message))
            | Action::Templates(TemplatesAction::MutateFailure(message))
            | Action::Monitor(MonitorAction::FetchFailure(message))
            | Action::Submit(SubmitAction::SubmitFailure(message))
            | Action::Notify(message) => message,
            _ => return None,
        };
        Some(message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    experiments: ExperimentsState,
    metadata: MetadataState,
    objective: ObjectiveState,
    algorithm: AlgorithmState,
    parameters: ParametersState,
    graph_config: GraphConfigState,
    metrics_collector: MetricsCollectorState,
    trial_template: TrialTemplateState,
    templates: TemplatesState,
    monitor: MonitorState,
    submit: SubmitState,
    notification: Option<String>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn dispatch(&mut self, action: Action) {
        trace!(?action, "dispatch");
        if let Some(message) = action.failure_message() {
            self.notification = Some(message.to_owned());
        }
        match &action {
            Action::Experiments(action) => self.experiments = self.experiments.reduce(action),
            Action::Metadata(action) => self.metadata = self.metadata.reduce(action),
            Action::Objective(action) => self.objective = self.objective.reduce(action),
            Action::Algorithm(action) => self.algorithm = self.algorithm.reduce(action),
            Action::Parameters(action) => self.parameters = self.parameters.reduce(action),
            Action::GraphConfig(action) => self.graph_config = self.graph_config.reduce(action),
            Action::MetricsCollector(action) => self.metrics_collector = self.metrics_collector.reduce(action),
            Action::TrialTemplate(action) => self.trial_template = self.trial_template.reduce(action),
            Action::Templates(action) => self.templates = self.templates.reduce(action),
            Action::Monitor(action) => self.monitor = self.monitor.reduce(action),
            Action::Submit(action) => self.submit = self.submit.reduce(action),
            Action::Notify(_) => {}
            Action::DismissNotification => self.notification = None,
        }
    }

    pub fn experiments(&self) -> &ExperimentsState {
        &self.experiments
    }

    pub fn metadata(&self) -> &MetadataState {
        &self.metadata
    }

    pub fn objective(&self) -> &ObjectiveState {
        &self.objective
    }

    pub fn algorithm(&self) -> &AlgorithmState {
        &self.algorithm
    }

    pub fn parameters(&self) -> &ParametersState {
        &self.parameters
    }

    pub fn graph_config(&self) -> &GraphConfigState {
        &self.graph_config
    }

    pub fn metrics_collector(&self) -> &MetricsCollectorState {
        &self.metrics_collector
    }

    pub fn trial_template(&self) -> &TrialTemplateState {
        &self.trial_template
    }

    pub fn templates(&self) -> &TemplatesState {
        &self.templates
    }

    pub fn monitor(&self) -> &MonitorState {
        &self.monitor
    }

    pub fn submit(&self) -> &SubmitState {
        &self.submit
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        experiment::{Experiment, ExperimentStatus},
        trial::TrialParameter,
    };

    fn experiment(name: &str, status: ExperimentStatus) -> Experiment {
        Experiment {
            name: name.to_owned(),
            namespace: "kubeflow".to_owned(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn fetch_then_hide_failed() {
        let mut store = Store::new();
        store.dispatch(Action::Experiments(ExperimentsAction::FetchExperimentsSuccess(vec![
            experiment("running", ExperimentStatus::Running),
            experiment("failed", ExperimentStatus::Failed),
            experiment("succeeded", ExperimentStatus::Succeeded),
        ])));
        store.dispatch(Action::Experiments(ExperimentsAction::ChangeStatus(
            ExperimentStatus::Failed,
            false,
        )));
        let names = store
            .experiments()
            .filtered
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["running", "succeeded"]);
    }

    #[test]
    fn other_domains_are_untouched() {
        let mut store = Store::new();
        let before = store.clone();
        store.dispatch(Action::Objective(ObjectiveAction::ChangeGoal("0.5".to_owned())));
        assert_eq!(store.objective().goal, "0.5");
        assert_eq!(store.metadata(), before.metadata());
        assert_eq!(store.experiments(), before.experiments());
        assert_eq!(store.trial_template(), before.trial_template());
    }

    #[test]
    fn replay_is_deterministic() {
        let actions = vec![
            Action::TrialTemplate(TrialTemplateAction::ChangeSource(trial_template::TemplateSource::Yaml)),
            Action::TrialTemplate(TrialTemplateAction::ChangeYaml("{trialParameters.lr}".to_owned())),
            Action::Parameters(ParametersAction::Delete(0)),
            Action::Notify("saved".to_owned()),
        ];
        let mut first = Store::new();
        let mut second = Store::new();
        for action in &actions {
            first.dispatch(action.clone());
            second.dispatch(action.clone());
        }
        assert_eq!(first.trial_template(), second.trial_template());
        assert_eq!(first.parameters(), second.parameters());
        assert_eq!(first.trial_template().trial_parameters, vec![TrialParameter::named("lr")]);
    }

    #[test]
    fn failures_raise_a_notification() {
        let mut store = Store::new();
        store.dispatch(Action::Experiments(ExperimentsAction::FetchExperimentsFailure(
            "wrong namespace".to_owned(),
        )));
        assert_eq!(store.notification(), Some("wrong namespace"));
        store.dispatch(Action::DismissNotification);
        assert_eq!(store.notification(), None);
    }
}
