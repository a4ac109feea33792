use crate::{
    api::{
        experiment::{Experiment, ExperimentStatus},
        id::{ExperimentKey, Namespace, NamespaceFilter},
    },
    filter::{filter_experiments, FilterCriteria},
    store::Reducer,
};

/// The experiment list page.
///
/// `filtered` always equals `filter_experiments(&all, &criteria)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentsState {
    pub all: Vec<Experiment>,
    pub filtered: Vec<Experiment>,
    pub criteria: FilterCriteria,
    /// Namespace picker entries, wildcard first.
    pub namespaces: Vec<NamespaceFilter>,
    pub delete_dialog: Option<ExperimentKey>,
    pub loading: bool,
    pub message: Option<String>,
}

impl Default for ExperimentsState {
    fn default() -> Self {
        ExperimentsState {
            all: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            namespaces: vec![NamespaceFilter::All],
            delete_dialog: None,
            loading: false,
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentsAction {
    FetchExperiments,
    FetchExperimentsSuccess(Vec<Experiment>),
    FetchExperimentsFailure(String),
    FilterName(String),
    ChangeNamespace(NamespaceFilter),
    ChangeStatus(ExperimentStatus, bool),
    FetchNamespacesSuccess(Vec<Namespace>),
    FetchNamespacesFailure(String),
    OpenDeleteDialog(ExperimentKey),
    CloseDeleteDialog,
    DeleteExperiment,
    DeleteExperimentSuccess(ExperimentKey),
    DeleteExperimentFailure(String),
}

impl ExperimentsState {
    fn with_all(&self, all: Vec<Experiment>) -> Self {
        ExperimentsState {
            filtered: filter_experiments(&all, &self.criteria),
            all,
            ..self.clone()
        }
    }

    fn with_criteria(&self, criteria: FilterCriteria) -> Self {
        ExperimentsState {
            filtered: filter_experiments(&self.all, &criteria),
            criteria,
            ..self.clone()
        }
    }
}

impl Reducer for ExperimentsState {
    type Action = ExperimentsAction;

    fn reduce(&self, action: &ExperimentsAction) -> Self {
        match action {
            ExperimentsAction::FetchExperiments | ExperimentsAction::DeleteExperiment => ExperimentsState {
                loading: true,
                ..self.clone()
            },
            ExperimentsAction::FetchExperimentsSuccess(experiments) => ExperimentsState {
                loading: false,
                message: None,
                ..self.with_all(experiments.clone())
            },
            ExperimentsAction::FetchExperimentsFailure(message)
            | ExperimentsAction::FetchNamespacesFailure(message) => ExperimentsState {
                loading: false,
                message: Some(message.clone()),
                ..self.clone()
            },
            ExperimentsAction::FilterName(name) => self.with_criteria(FilterCriteria {
                name_substring: name.clone(),
                ..self.criteria.clone()
            }),
            ExperimentsAction::ChangeNamespace(namespace) => self.with_criteria(FilterCriteria {
                namespace: namespace.clone(),
                ..self.criteria.clone()
            }),
            ExperimentsAction::ChangeStatus(status, enabled) => {
                let mut criteria = self.criteria.clone();
                criteria.status.set(status.clone(), *enabled);
                self.with_criteria(criteria)
            }
            ExperimentsAction::FetchNamespacesSuccess(namespaces) => ExperimentsState {
                namespaces: std::iter::once(NamespaceFilter::All)
                    .chain(namespaces.iter().cloned().map(NamespaceFilter::Only))
                    .collect(),
                ..self.clone()
            },
            ExperimentsAction::OpenDeleteDialog(key) => ExperimentsState {
                delete_dialog: Some(key.clone()),
                ..self.clone()
            },
            ExperimentsAction::CloseDeleteDialog => ExperimentsState {
                delete_dialog: None,
                ..self.clone()
            },
            ExperimentsAction::DeleteExperimentSuccess(key) => {
                let remaining = self
                    .all
                    .iter()
                    .filter(|experiment| !experiment.is(key))
                    .cloned()
                    .collect();
                ExperimentsState {
                    loading: false,
                    delete_dialog: None,
                    ..self.with_all(remaining)
                }
            }
            ExperimentsAction::DeleteExperimentFailure(message) => ExperimentsState {
                loading: false,
                delete_dialog: None,
                message: Some(message.clone()),
                ..self.clone()
            },
        }
    }
}
