use crate::{
    api::algorithm::ObjectiveType,
    store::{list, Reducer},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveState {
    pub objective_type: ObjectiveType,
    pub goal: String,
    pub metric_name: String,
    pub additional_metric_names: Vec<String>,
}

impl Default for ObjectiveState {
    fn default() -> Self {
        ObjectiveState {
            objective_type: ObjectiveType::Maximize,
            goal: "0.99".to_owned(),
            metric_name: "Validation-accuracy".to_owned(),
            additional_metric_names: vec!["Train-accuracy".to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveAction {
    ChangeType(ObjectiveType),
    ChangeGoal(String),
    ChangeMetricName(String),
    AddMetric,
    EditMetric(usize, String),
    DeleteMetric(usize),
    Load(ObjectiveState),
}

impl Reducer for ObjectiveState {
    type Action = ObjectiveAction;

    fn reduce(&self, action: &ObjectiveAction) -> Self {
        match action {
            ObjectiveAction::ChangeType(objective_type) => ObjectiveState {
                objective_type: *objective_type,
                ..self.clone()
            },
            ObjectiveAction::ChangeGoal(goal) => ObjectiveState {
                goal: goal.clone(),
                ..self.clone()
            },
            ObjectiveAction::ChangeMetricName(name) => ObjectiveState {
                metric_name: name.clone(),
                ..self.clone()
            },
            ObjectiveAction::AddMetric => ObjectiveState {
                additional_metric_names: list::appended(&self.additional_metric_names, String::new()),
                ..self.clone()
            },
            ObjectiveAction::EditMetric(index, name) => ObjectiveState {
                additional_metric_names: list::replaced(&self.additional_metric_names, *index, name.clone()),
                ..self.clone()
            },
            ObjectiveAction::DeleteMetric(index) => ObjectiveState {
                additional_metric_names: list::removed(&self.additional_metric_names, *index),
                ..self.clone()
            },
            ObjectiveAction::Load(state) => state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additional_metrics_editing() {
        let state = ObjectiveState::default()
            .reduce(&ObjectiveAction::AddMetric)
            .reduce(&ObjectiveAction::EditMetric(1, "loss".to_owned()))
            .reduce(&ObjectiveAction::DeleteMetric(0))
            .reduce(&ObjectiveAction::DeleteMetric(4));
        assert_eq!(state.additional_metric_names, vec!["loss"]);
    }
}
