use crate::{
    api::algorithm::{default_settings, AlgorithmSetting},
    store::{list, Reducer},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmState {
    pub name: String,
    pub settings: Vec<AlgorithmSetting>,
}

impl Default for AlgorithmState {
    fn default() -> Self {
        AlgorithmState {
            name: "random".to_owned(),
            settings: default_settings("random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmAction {
    /// Picks an algorithm and replaces the settings with its defaults.
    ChangeAlgorithm(String),
    AddSetting,
    EditSetting(usize, AlgorithmSetting),
    DeleteSetting(usize),
    Load(AlgorithmState),
}

impl Reducer for AlgorithmState {
    type Action = AlgorithmAction;

    fn reduce(&self, action: &AlgorithmAction) -> Self {
        match action {
            AlgorithmAction::ChangeAlgorithm(name) => AlgorithmState {
                name: name.clone(),
                settings: default_settings(name),
            },
            AlgorithmAction::AddSetting => AlgorithmState {
                settings: list::appended(&self.settings, AlgorithmSetting::default()),
                ..self.clone()
            },
            AlgorithmAction::EditSetting(index, setting) => AlgorithmState {
                settings: list::replaced(&self.settings, *index, setting.clone()),
                ..self.clone()
            },
            AlgorithmAction::DeleteSetting(index) => AlgorithmState {
                settings: list::removed(&self.settings, *index),
                ..self.clone()
            },
            AlgorithmAction::Load(state) => state.clone(),
        }
    }
}
