use crate::store::Reducer;

/// Experiment name, namespace and trial budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataState {
    pub name: String,
    pub namespace: String,
    pub parallel_trial_count: String,
    pub max_trial_count: String,
    pub max_failed_trial_count: String,
    pub resume_policy: String,
}

impl Default for MetadataState {
    fn default() -> Self {
        MetadataState {
            name: "random-experiment".to_owned(),
            namespace: "kubeflow".to_owned(),
            parallel_trial_count: "3".to_owned(),
            max_trial_count: "12".to_owned(),
            max_failed_trial_count: "3".to_owned(),
            resume_policy: "LongRunning".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Name,
    Namespace,
    ParallelTrialCount,
    MaxTrialCount,
    MaxFailedTrialCount,
    ResumePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataAction {
    Change(MetadataField, String),
    Load(MetadataState),
}

impl Reducer for MetadataState {
    type Action = MetadataAction;

    fn reduce(&self, action: &MetadataAction) -> Self {
        match action {
            MetadataAction::Change(field, value) => {
                let mut next = self.clone();
                let slot = match field {
                    MetadataField::Name => &mut next.name,
                    MetadataField::Namespace => &mut next.namespace,
                    MetadataField::ParallelTrialCount => &mut next.parallel_trial_count,
                    MetadataField::MaxTrialCount => &mut next.max_trial_count,
                    MetadataField::MaxFailedTrialCount => &mut next.max_failed_trial_count,
                    MetadataField::ResumePolicy => &mut next.resume_policy,
                };
                *slot = value.clone();
                next
            }
            MetadataAction::Load(state) => state.clone(),
        }
    }
}
