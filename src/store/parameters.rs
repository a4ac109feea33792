use crate::{
    api::parameter::{FeasibleSpaceKind, ParameterSpec, ParameterType},
    store::{list, Reducer},
};

/// An edit to a single [`ParameterSpec`]; shared by hyperparameters and NAS operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterEdit {
    Name(String),
    Type(ParameterType),
    FeasibleSpace(FeasibleSpaceKind),
    Min(String),
    Max(String),
    Step(String),
    AddListValue,
    EditListValue(usize, String),
    DeleteListValue(usize),
}

pub fn edit_parameter(parameter: &ParameterSpec, edit: &ParameterEdit) -> ParameterSpec {
    let mut next = parameter.clone();
    match edit {
        ParameterEdit::Name(name) => next.name = name.clone(),
        ParameterEdit::Type(parameter_type) => {
            next.parameter_type = *parameter_type;
            // categorical values have no range
            if *parameter_type == ParameterType::Categorical {
                next.feasible_space = FeasibleSpaceKind::List;
            }
        }
        ParameterEdit::FeasibleSpace(kind) => next.feasible_space = *kind,
        ParameterEdit::Min(min) => next.min = min.clone(),
        ParameterEdit::Max(max) => next.max = max.clone(),
        ParameterEdit::Step(step) => next.step = step.clone(),
        ParameterEdit::AddListValue => next.list = list::appended(&parameter.list, String::new()),
        ParameterEdit::EditListValue(index, value) => {
            next.list = list::replaced(&parameter.list, *index, value.clone())
        }
        ParameterEdit::DeleteListValue(index) => next.list = list::removed(&parameter.list, *index),
    }
    next
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersState {
    pub parameters: Vec<ParameterSpec>,
}

impl Default for ParametersState {
    fn default() -> Self {
        let range = |name: &str, parameter_type, min: &str, max: &str| ParameterSpec {
            name: name.to_owned(),
            parameter_type,
            min: min.to_owned(),
            max: max.to_owned(),
            ..ParameterSpec::default()
        };
        ParametersState {
            parameters: vec![
                range("lr", ParameterType::Double, "0.01", "0.03"),
                range("num-layers", ParameterType::Int, "2", "5"),
                ParameterSpec {
                    name: "optimizer".to_owned(),
                    parameter_type: ParameterType::Categorical,
                    feasible_space: FeasibleSpaceKind::List,
                    list: vec!["sgd".to_owned(), "adam".to_owned(), "ftrl".to_owned()],
                    ..ParameterSpec::default()
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParametersAction {
    Add,
    Edit(usize, ParameterEdit),
    Delete(usize),
    Load(Vec<ParameterSpec>),
}

impl Reducer for ParametersState {
    type Action = ParametersAction;

    fn reduce(&self, action: &ParametersAction) -> Self {
        let parameters = match action {
            ParametersAction::Add => list::appended(&self.parameters, ParameterSpec::default()),
            ParametersAction::Edit(index, edit) => {
                list::updated(&self.parameters, *index, |parameter| edit_parameter(parameter, edit))
            }
            ParametersAction::Delete(index) => list::removed(&self.parameters, *index),
            ParametersAction::Load(parameters) => parameters.clone(),
        };
        ParametersState { parameters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_list_values_of_one_parameter() {
        let state = ParametersState::default()
            .reduce(&ParametersAction::Edit(2, ParameterEdit::AddListValue))
            .reduce(&ParametersAction::Edit(2, ParameterEdit::EditListValue(3, "rmsprop".to_owned())))
            .reduce(&ParametersAction::Edit(2, ParameterEdit::DeleteListValue(0)));
        assert_eq!(state.parameters[2].list, vec!["adam", "ftrl", "rmsprop"]);
        assert_eq!(state.parameters[0], ParametersState::default().parameters[0]);
    }

    #[test]
    fn categorical_switches_to_list() {
        let state = ParametersState::default()
            .reduce(&ParametersAction::Add)
            .reduce(&ParametersAction::Edit(3, ParameterEdit::Type(ParameterType::Categorical)));
        assert_eq!(state.parameters[3].feasible_space, FeasibleSpaceKind::List);
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        let before = ParametersState::default();
        let after = before.reduce(&ParametersAction::Edit(9, ParameterEdit::Name("x".to_owned())));
        assert_eq!(after, before);
    }
}
