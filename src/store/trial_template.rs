use crate::{
    api::{
        template::{Template, TemplateTree},
        trial::TrialParameter,
    },
    extract::extract_trial_parameters,
    store::{list, Reducer},
};

/// Position of the chosen template inside a [`TemplateTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSelection {
    pub namespace: usize,
    pub config_map: usize,
    pub path: usize,
}

impl TemplateSelection {
    /// Applies a requested selection inside the same namespace; a config map change resets the path.
    pub fn moved_to(&self, requested: TemplateSelection) -> TemplateSelection {
        if requested.config_map != self.config_map {
            TemplateSelection {
                path: 0,
                ..requested
            }
        } else {
            requested
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    ConfigMap,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialTemplateState {
    pub tree: TemplateTree,
    /// Always points at an existing template; `None` only while nothing can be selected.
    pub selection: Option<TemplateSelection>,
    pub source: TemplateSource,
    pub yaml: String,
    pub primary_container_name: String,
    pub trial_parameters: Vec<TrialParameter>,
    pub loading: bool,
    pub message: Option<String>,
}

impl Default for TrialTemplateState {
    fn default() -> Self {
        TrialTemplateState {
            tree: TemplateTree::default(),
            selection: None,
            source: TemplateSource::ConfigMap,
            yaml: String::new(),
            primary_container_name: "training-container".to_owned(),
            trial_parameters: Vec::new(),
            loading: false,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialParameterField {
    Reference,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialTemplateAction {
    FetchTemplates,
    FetchTemplatesSuccess(TemplateTree),
    FetchTemplatesFailure(String),
    Select(TemplateSelection),
    ChangeSource(TemplateSource),
    ChangeYaml(String),
    ChangePrimaryContainerName(String),
    EditTrialParameter(usize, TrialParameterField, String),
    Load {
        source: TemplateSource,
        selection: Option<TemplateSelection>,
        yaml: String,
        primary_container_name: String,
        trial_parameters: Vec<TrialParameter>,
    },
}

impl TrialTemplateState {
    pub fn selected(&self) -> Option<&Template> {
        self.selection
            .and_then(|selection| self.tree.get(selection.namespace, selection.config_map, selection.path))
    }

    /// Selection as `(namespace, config map, path)` with `-1` for nothing selected.
    pub fn indices(&self) -> (i64, i64, i64) {
        match self.selection {
            Some(selection) => (
                selection.namespace as i64,
                selection.config_map as i64,
                selection.path as i64,
            ),
            None => (-1, -1, -1),
        }
    }

    /// The text placeholders are read from under the current source.
    pub fn active_yaml(&self) -> &str {
        match self.source {
            TemplateSource::ConfigMap => self.selected().map(|template| template.yaml.as_str()).unwrap_or(""),
            TemplateSource::Yaml => &self.yaml,
        }
    }

    fn reextracted(self) -> Self {
        let trial_parameters = extract_trial_parameters(self.active_yaml());
        TrialTemplateState {
            trial_parameters,
            ..self
        }
    }

    /// First template of `namespace`, skipping config maps without templates.
    fn first_in(&self, namespace: usize) -> Option<TemplateSelection> {
        let block = self.tree.namespaces().get(namespace)?;
        let config_map = block
            .config_maps
            .iter()
            .position(|config_map| !config_map.templates.is_empty())?;
        Some(TemplateSelection {
            namespace,
            config_map,
            path: 0,
        })
    }

    fn first_available(&self) -> Option<TemplateSelection> {
        (0..self.tree.namespaces().len()).find_map(|namespace| self.first_in(namespace))
    }

    fn valid(&self, selection: TemplateSelection) -> bool {
        self.tree
            .get(selection.namespace, selection.config_map, selection.path)
            .is_some()
    }
}

impl Reducer for TrialTemplateState {
    type Action = TrialTemplateAction;

    fn reduce(&self, action: &TrialTemplateAction) -> Self {
        match action {
            TrialTemplateAction::FetchTemplates => TrialTemplateState {
                loading: true,
                ..self.clone()
            },
            TrialTemplateAction::FetchTemplatesSuccess(tree) => {
                let next = TrialTemplateState {
                    tree: tree.clone(),
                    loading: false,
                    message: None,
                    ..self.clone()
                };
                let selection = next.first_available();
                TrialTemplateState { selection, ..next }.reextracted()
            }
            TrialTemplateAction::FetchTemplatesFailure(message) => TrialTemplateState {
                loading: false,
                message: Some(message.clone()),
                ..self.clone()
            },
            TrialTemplateAction::Select(requested) => {
                let selection = match self.selection {
                    Some(current) if current.namespace == requested.namespace => Some(current.moved_to(*requested)),
                    _ => self.first_in(requested.namespace),
                };
                match selection.filter(|selection| self.valid(*selection)) {
                    Some(selection) => TrialTemplateState {
                        selection: Some(selection),
                        ..self.clone()
                    }
                    .reextracted(),
                    None => self.clone(),
                }
            }
            TrialTemplateAction::ChangeSource(source) => TrialTemplateState {
                source: *source,
                yaml: match (source, self.yaml.is_empty()) {
                    // start editing from the selected template
                    (TemplateSource::Yaml, true) => self.active_yaml().to_owned(),
                    _ => self.yaml.clone(),
                },
                ..self.clone()
            }
            .reextracted(),
            TrialTemplateAction::ChangeYaml(yaml) => TrialTemplateState {
                yaml: yaml.clone(),
                ..self.clone()
            }
            .reextracted(),
            TrialTemplateAction::ChangePrimaryContainerName(name) => TrialTemplateState {
                primary_container_name: name.clone(),
                ..self.clone()
            },
            TrialTemplateAction::EditTrialParameter(index, field, value) => TrialTemplateState {
                trial_parameters: list::updated(&self.trial_parameters, *index, |parameter| {
                    let mut parameter = parameter.clone();
                    match field {
                        TrialParameterField::Reference => parameter.reference = value.clone(),
                        TrialParameterField::Description => parameter.description = value.clone(),
                    }
                    parameter
                }),
                ..self.clone()
            },
            TrialTemplateAction::Load {
                source,
                selection,
                yaml,
                primary_container_name,
                trial_parameters,
            } => {
                let selection = match (source, selection) {
                    (_, Some(selection)) if self.valid(*selection) => Some(*selection),
                    // a config map source must name a template of the current tree
                    (TemplateSource::ConfigMap, _) => return self.clone(),
                    (TemplateSource::Yaml, _) => self.selection,
                };
                TrialTemplateState {
                    source: *source,
                    selection,
                    yaml: yaml.clone(),
                    primary_container_name: primary_container_name.clone(),
                    trial_parameters: trial_parameters.clone(),
                    ..self.clone()
                }
            }
        }
    }
}
