use crate::{
    api::{
        id::NamespaceFilter,
        template::{TemplateChange, TemplateTree},
    },
    filter::filter_templates,
    store::Reducer,
};

/// Content of the add/edit dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateDraft {
    pub namespace: String,
    pub config_map_name: String,
    pub path: String,
    pub yaml: String,
}

/// Which template dialog is open. Only one can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Add(TemplateDraft),
    /// `original_path` addresses the entry being replaced by `draft`.
    Edit {
        original_path: String,
        draft: TemplateDraft,
    },
    Delete {
        namespace: String,
        config_map_name: String,
        path: String,
    },
}

impl Default for DialogState {
    fn default() -> Self {
        DialogState::Closed
    }
}

impl DialogState {
    /// The request body for the open dialog's mutation.
    pub fn change(&self) -> Option<TemplateChange> {
        match self {
            DialogState::Closed => None,
            DialogState::Add(draft) => Some(TemplateChange {
                namespace: draft.namespace.clone(),
                config_map_name: draft.config_map_name.clone(),
                path: draft.path.clone(),
                updated_path: draft.path.clone(),
                yaml: draft.yaml.clone(),
            }),
            DialogState::Edit { original_path, draft } => Some(TemplateChange {
                namespace: draft.namespace.clone(),
                config_map_name: draft.config_map_name.clone(),
                path: original_path.clone(),
                updated_path: draft.path.clone(),
                yaml: draft.yaml.clone(),
            }),
            DialogState::Delete {
                namespace,
                config_map_name,
                path,
            } => Some(TemplateChange {
                namespace: namespace.clone(),
                config_map_name: config_map_name.clone(),
                path: path.clone(),
                updated_path: String::new(),
                yaml: String::new(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Namespace,
    ConfigMapName,
    Path,
    Yaml,
}

/// The trial template management page.
///
/// `filtered` always equals `filter_templates(&tree, &namespace, &config_map_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplatesState {
    pub tree: TemplateTree,
    pub filtered: TemplateTree,
    pub namespace: NamespaceFilter,
    pub config_map_name: String,
    pub dialog: DialogState,
    pub loading: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatesAction {
    FetchTemplates,
    FetchTemplatesSuccess(TemplateTree),
    FetchTemplatesFailure(String),
    FilterNamespace(NamespaceFilter),
    FilterConfigMapName(String),
    OpenDialog(DialogState),
    CloseDialog,
    EditDraft(DraftField, String),
    Mutate,
    MutateSuccess(TemplateTree),
    MutateFailure(String),
}

impl TemplatesState {
    fn refiltered(self) -> Self {
        TemplatesState {
            filtered: filter_templates(&self.tree, &self.namespace, &self.config_map_name),
            ..self
        }
    }
}

fn edit_draft(draft: &TemplateDraft, field: DraftField, value: &str) -> TemplateDraft {
    let mut draft = draft.clone();
    let slot = match field {
        DraftField::Namespace => &mut draft.namespace,
        DraftField::ConfigMapName => &mut draft.config_map_name,
        DraftField::Path => &mut draft.path,
        DraftField::Yaml => &mut draft.yaml,
    };
    *slot = value.to_owned();
    draft
}

impl Reducer for TemplatesState {
    type Action = TemplatesAction;

    fn reduce(&self, action: &TemplatesAction) -> Self {
        match action {
            TemplatesAction::FetchTemplates | TemplatesAction::Mutate => TemplatesState {
                loading: true,
                ..self.clone()
            },
            TemplatesAction::FetchTemplatesSuccess(tree) => TemplatesState {
                tree: tree.clone(),
                loading: false,
                message: None,
                ..self.clone()
            }
            .refiltered(),
            TemplatesAction::MutateSuccess(tree) => TemplatesState {
                tree: tree.clone(),
                dialog: DialogState::Closed,
                loading: false,
                message: None,
                ..self.clone()
            }
            .refiltered(),
            TemplatesAction::FetchTemplatesFailure(message) | TemplatesAction::MutateFailure(message) => {
                TemplatesState {
                    loading: false,
                    message: Some(message.clone()),
                    ..self.clone()
                }
            }
            TemplatesAction::FilterNamespace(namespace) => TemplatesState {
                namespace: namespace.clone(),
                ..self.clone()
            }
            .refiltered(),
            TemplatesAction::FilterConfigMapName(name) => TemplatesState {
                config_map_name: name.clone(),
                ..self.clone()
            }
            .refiltered(),
            TemplatesAction::OpenDialog(dialog) => TemplatesState {
                dialog: dialog.clone(),
                ..self.clone()
            },
            TemplatesAction::CloseDialog => TemplatesState {
                dialog: DialogState::Closed,
                ..self.clone()
            },
            TemplatesAction::EditDraft(field, value) => {
                let dialog = match &self.dialog {
                    DialogState::Add(draft) => DialogState::Add(edit_draft(draft, *field, value)),
                    DialogState::Edit { original_path, draft } => DialogState::Edit {
                        original_path: original_path.clone(),
                        draft: edit_draft(draft, *field, value),
                    },
                    other => other.clone(),
                };
                TemplatesState {
                    dialog,
                    ..self.clone()
                }
            }
        }
    }
}
