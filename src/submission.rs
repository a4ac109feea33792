use crate::{
    api::{
        algorithm::{AlgorithmDocument, ObjectiveDocument, HP_ALGORITHMS, NAS_ALGORITHMS},
        collector::MetricsCollectorSpec,
        document::{
            ConfigMapReference, ExperimentDocument, ExperimentSpecDocument, ObjectMeta, TrialTemplateDocument,
            API_VERSION,
        },
        error::SubmissionError,
        nas::{GraphConfig, GraphConfigDocument, NasConfigDocument, Operation},
        parameter::ParameterSpec,
    },
    store::{
        algorithm::{AlgorithmAction, AlgorithmState},
        graph_config::GraphConfigAction,
        metadata::{MetadataAction, MetadataState},
        metrics_collector::MetricsCollectorAction,
        objective::{ObjectiveAction, ObjectiveState},
        parameters::ParametersAction,
        trial_template::{TemplateSelection, TemplateSource, TrialTemplateAction, TrialTemplateState},
        Action, Store,
    },
};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Hyperparameter,
    ArchitectureSearch,
}

impl JobKind {
    /// Algorithms able to drive this kind of job.
    pub fn algorithms(self) -> &'static [&'static str] {
        match self {
            JobKind::Hyperparameter => &HP_ALGORITHMS,
            JobKind::ArchitectureSearch => &NAS_ALGORITHMS,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            JobKind::Hyperparameter => "hyperparameter tuning",
            JobKind::ArchitectureSearch => "architecture search",
        }
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, SubmissionError> {
    value.trim().parse().map_err(|_| SubmissionError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

fn objective_document(objective: &ObjectiveState) -> Result<ObjectiveDocument, SubmissionError> {
    let goal = match objective.goal.trim() {
        "" => None,
        goal => Some(number("goal", goal)?),
    };
    Ok(ObjectiveDocument {
        objective_type: objective.objective_type,
        goal,
        objective_metric_name: objective.metric_name.clone(),
        additional_metric_names: objective
            .additional_metric_names
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect(),
    })
}

fn trial_template_document(template: &TrialTemplateState) -> Result<TrialTemplateDocument, SubmissionError> {
    let (config_map, trial_spec) = match template.source {
        TemplateSource::ConfigMap => {
            let selection = template.selection.ok_or(SubmissionError::NoTrialTemplate)?;
            let block = template
                .tree
                .namespaces()
                .get(selection.namespace)
                .ok_or(SubmissionError::NoTrialTemplate)?;
            let config_map = block
                .config_maps
                .get(selection.config_map)
                .ok_or(SubmissionError::NoTrialTemplate)?;
            let selected = template.selected().ok_or(SubmissionError::NoTrialTemplate)?;
            let reference = ConfigMapReference {
                config_map_name: config_map.config_map_name.clone(),
                config_map_namespace: block.namespace.clone(),
                template_path: selected.path.clone(),
            };
            (Some(reference), None)
        }
        TemplateSource::Yaml => {
            if template.yaml.trim().is_empty() {
                return Err(SubmissionError::NoTrialTemplate);
            }
            let trial_spec = serde_yaml::from_str(&template.yaml).map_err(SubmissionError::TrialTemplate)?;
            (None, Some(trial_spec))
        }
    };
    Ok(TrialTemplateDocument {
        primary_container_name: template.primary_container_name.clone(),
        trial_parameters: template.trial_parameters.clone(),
        config_map,
        trial_spec,
    })
}

fn graph_config_document(graph: &GraphConfig) -> Result<GraphConfigDocument, SubmissionError> {
    let sizes = |field: &'static str, sizes: &[String]| -> Result<Vec<u32>, SubmissionError> {
        sizes
            .iter()
            .filter(|size| !size.trim().is_empty())
            .map(|size| number(field, size))
            .collect()
    };
    Ok(GraphConfigDocument {
        num_layers: number("numLayers", &graph.num_layers)?,
        input_sizes: sizes("inputSizes", &graph.input_sizes[..])?,
        output_sizes: sizes("outputSizes", &graph.output_sizes[..])?,
    })
}

/// Assembles the experiment manifest from the form domains of `store`.
pub fn build_experiment(store: &Store, kind: JobKind) -> Result<ExperimentDocument, SubmissionError> {
    let metadata = store.metadata();
    if metadata.name.trim().is_empty() {
        return Err(SubmissionError::MissingName);
    }
    let algorithm = store.algorithm();
    if !kind.algorithms().contains(&algorithm.name.as_str()) {
        return Err(SubmissionError::UnsupportedAlgorithm {
            algorithm: algorithm.name.clone(),
            job: kind.describe(),
        });
    }
    let (parameters, nas_config) = match kind {
        JobKind::Hyperparameter => {
            let parameters = store
                .parameters()
                .parameters
                .iter()
                .map(|parameter| parameter.to_document(&algorithm.name))
                .collect();
            (parameters, None)
        }
        JobKind::ArchitectureSearch => {
            let graph_config = store.graph_config();
            let nas_config = NasConfigDocument {
                graph_config: graph_config_document(&graph_config.graph)?,
                operations: graph_config
                    .operations
                    .iter()
                    .map(|operation| operation.to_document(&algorithm.name))
                    .collect(),
            };
            (Vec::new(), Some(nas_config))
        }
    };
    let metrics_collector_spec = store
        .metrics_collector()
        .spec
        .to_document()
        .map_err(SubmissionError::CustomCollector)?;
    let document = ExperimentDocument {
        api_version: API_VERSION.to_owned(),
        kind: "Experiment".to_owned(),
        metadata: ObjectMeta {
            name: metadata.name.clone(),
            namespace: metadata.namespace.clone(),
        },
        spec: ExperimentSpecDocument {
            parallel_trial_count: number("parallelTrialCount", &metadata.parallel_trial_count)?,
            max_trial_count: number("maxTrialCount", &metadata.max_trial_count)?,
            max_failed_trial_count: number("maxFailedTrialCount", &metadata.max_failed_trial_count)?,
            resume_policy: metadata.resume_policy.clone(),
            objective: objective_document(store.objective())?,
            algorithm: AlgorithmDocument {
                algorithm_name: algorithm.name.clone(),
                algorithm_settings: algorithm.settings.clone(),
            },
            parameters,
            nas_config,
            trial_template: trial_template_document(store.trial_template())?,
            metrics_collector_spec,
        },
    };
    debug!(name = %document.metadata.name, ?kind, "built experiment");
    Ok(document)
}

pub fn to_yaml(document: &ExperimentDocument) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(document)
}

pub fn from_yaml(text: &str) -> Result<ExperimentDocument, SubmissionError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Finds the tree position a config map reference names.
fn find_selection(template: &TrialTemplateState, reference: &ConfigMapReference) -> Option<TemplateSelection> {
    let namespaces = template.tree.namespaces();
    let namespace = namespaces
        .iter()
        .position(|block| block.namespace == reference.config_map_namespace)?;
    let config_maps = &namespaces[namespace].config_maps;
    let config_map = config_maps
        .iter()
        .position(|config_map| config_map.config_map_name == reference.config_map_name)?;
    let path = config_maps[config_map]
        .templates
        .iter()
        .position(|template| template.path == reference.template_path)?;
    Some(TemplateSelection {
        namespace,
        config_map,
        path,
    })
}

impl Store {
    /// Replaces the form domains with the content of `document`.
    ///
    /// Nothing is dispatched unless the whole document converts.
    pub fn load_document(&mut self, document: &ExperimentDocument) -> Result<(), SubmissionError> {
        let spec = &document.spec;
        let metrics_collector =
            MetricsCollectorSpec::from_document(&spec.metrics_collector_spec).map_err(SubmissionError::CustomCollector)?;
        let template = &spec.trial_template;
        let (source, selection, yaml) = match (&template.config_map, &template.trial_spec) {
            (Some(reference), _) => {
                let selection = find_selection(self.trial_template(), reference).ok_or_else(|| {
                    SubmissionError::UnknownTemplate {
                        config_map_namespace: reference.config_map_namespace.clone(),
                        config_map_name: reference.config_map_name.clone(),
                        template_path: reference.template_path.clone(),
                    }
                })?;
                (TemplateSource::ConfigMap, Some(selection), String::new())
            }
            (None, Some(trial_spec)) => (TemplateSource::Yaml, None, serde_yaml::to_string(trial_spec)?),
            (None, None) => return Err(SubmissionError::NoTrialTemplate),
        };

        let mut actions = vec![
            Action::Metadata(MetadataAction::Load(MetadataState {
                name: document.metadata.name.clone(),
                namespace: document.metadata.namespace.clone(),
                parallel_trial_count: spec.parallel_trial_count.to_string(),
                max_trial_count: spec.max_trial_count.to_string(),
                max_failed_trial_count: spec.max_failed_trial_count.to_string(),
                resume_policy: spec.resume_policy.clone(),
            })),
            Action::Objective(ObjectiveAction::Load(ObjectiveState {
                objective_type: spec.objective.objective_type,
                goal: spec.objective.goal.map(|goal| goal.to_string()).unwrap_or_default(),
                metric_name: spec.objective.objective_metric_name.clone(),
                additional_metric_names: spec.objective.additional_metric_names.clone(),
            })),
            Action::Algorithm(AlgorithmAction::Load(AlgorithmState {
                name: spec.algorithm.algorithm_name.clone(),
                settings: spec.algorithm.algorithm_settings.clone(),
            })),
            Action::Parameters(ParametersAction::Load(
                spec.parameters.iter().map(ParameterSpec::from_document).collect(),
            )),
            Action::MetricsCollector(MetricsCollectorAction::Load(metrics_collector)),
            Action::TrialTemplate(TrialTemplateAction::Load {
                source,
                selection,
                yaml,
                primary_container_name: template.primary_container_name.clone(),
                trial_parameters: template.trial_parameters.clone(),
            }),
        ];
        if let Some(nas_config) = &spec.nas_config {
            actions.push(Action::GraphConfig(GraphConfigAction::Load(
                GraphConfig::from_document(&nas_config.graph_config),
                nas_config.operations.iter().map(Operation::from_document).collect(),
            )));
        }
        for action in actions {
            self.dispatch(action);
        }
        Ok(())
    }

    /// Loads user-edited yaml into the form; a parse failure becomes a notification.
    pub fn load_yaml(&mut self, text: &str) -> Result<(), SubmissionError> {
        let result = from_yaml(text).and_then(|document| self.load_document(&document));
        if let Err(err) = &result {
            warn!(%err, "could not load experiment yaml");
            self.dispatch(Action::Notify(err.to_string()));
        }
        result
    }
}
