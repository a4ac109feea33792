use crate::store::Reducer;

/// State of the experiment submission, including the raw yaml editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitState {
    pub yaml: String,
    pub submitting: bool,
    /// Name of the last experiment the backend accepted.
    pub submitted: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    ChangeYaml(String),
    Submit,
    SubmitSuccess(String),
    SubmitFailure(String),
}

impl Reducer for SubmitState {
    type Action = SubmitAction;

    fn reduce(&self, action: &SubmitAction) -> Self {
        match action {
            SubmitAction::ChangeYaml(yaml) => SubmitState {
                yaml: yaml.clone(),
                ..self.clone()
            },
            SubmitAction::Submit => SubmitState {
                submitting: true,
                ..self.clone()
            },
            SubmitAction::SubmitSuccess(name) => SubmitState {
                submitting: false,
                submitted: Some(name.clone()),
                message: None,
                ..self.clone()
            },
            SubmitAction::SubmitFailure(message) => SubmitState {
                submitting: false,
                message: Some(message.clone()),
                ..self.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_editor_content() {
        let state = SubmitState::default()
            .reduce(&SubmitAction::ChangeYaml("kind: Experiment".to_owned()))
            .reduce(&SubmitAction::Submit);
        assert!(state.submitting);

        let failed = state.reduce(&SubmitAction::SubmitFailure("invalid spec".to_owned()));
        assert!(!failed.submitting);
        assert_eq!(failed.yaml, "kind: Experiment");
        assert_eq!(failed.message.as_deref(), Some("invalid spec"));

        let done = failed
            .reduce(&SubmitAction::Submit)
            .reduce(&SubmitAction::SubmitSuccess("random".to_owned()));
        assert_eq!(done.submitted.as_deref(), Some("random"));
        assert_eq!(done.message, None);
    }
}
