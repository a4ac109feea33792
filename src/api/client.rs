use crate::api::{
    document::ExperimentDocument,
    error::GatewayError,
    experiment::Experiment,
    id::{ExperimentKey, Namespace, NamespaceFilter},
    table::Table,
    template::{TemplateChange, TemplateTree},
    trial::NasStep,
};

/// The backend operations the UI state layer depends on.
///
/// Implemented over HTTP by [`crate::backend::rest::Server`].
#[rustfmt::skip]
pub trait Client {
    fn fetch_experiments(&mut self, namespace: &NamespaceFilter) -> Result<Vec<Experiment>, GatewayError>;
    fn fetch_experiment(&mut self, experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError>;
    fn delete_experiment(&mut self, experiment: &ExperimentKey) -> Result<(), GatewayError>;
    fn fetch_suggestion(&mut self, experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError>;

    fn submit_yaml(&mut self, yaml: &str) -> Result<(), GatewayError>;
    fn submit_hp_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError>;
    fn submit_nas_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError>;

    fn fetch_hp_job_info(&mut self, experiment: &ExperimentKey) -> Result<Table, GatewayError>;
    fn fetch_hp_job_trial_info(&mut self, trial_name: &str, namespace: &Namespace) -> Result<Table, GatewayError>;
    fn fetch_nas_job_info(&mut self, experiment: &ExperimentKey) -> Result<Vec<NasStep>, GatewayError>;

    fn fetch_trial_templates(&mut self) -> Result<TemplateTree, GatewayError>;
    fn add_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError>;
    fn edit_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError>;
    fn delete_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError>;

    fn fetch_namespaces(&mut self) -> Result<Vec<Namespace>, GatewayError>;
}
