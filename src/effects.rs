use crate::{
    api::{
        client::Client,
        error::GatewayError,
        id::{ExperimentKey, Namespace},
    },
    store::{
        experiments::ExperimentsAction, monitor::MonitorAction, submit::SubmitAction, templates::TemplatesAction,
        trial_template::TrialTemplateAction, Action, Store,
    },
    submission::{build_experiment, JobKind},
};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Experiments of the namespace currently picked in the list filter.
    FetchExperiments,
    FetchNamespaces,
    /// Deletes the experiment the delete dialog was opened for.
    DeleteExperiment,
    /// Trial templates for the experiment form.
    FetchTrialTemplates,
    /// Trial templates for the management page.
    FetchTemplates,
    /// Applies the open add/edit/delete template dialog.
    MutateTemplate,
    FetchExperiment(ExperimentKey),
    FetchSuggestion(ExperimentKey),
    FetchHpJobInfo(ExperimentKey),
    FetchHpJobTrialInfo { trial_name: String, namespace: Namespace },
    FetchNasJobInfo(ExperimentKey),
    /// Submits the raw yaml editor content.
    SubmitYaml,
    /// Submits the experiment built from the form domains.
    SubmitJob(JobKind),
}

impl Request {
    /// The action marking the request as in flight.
    pub fn started(&self) -> Option<Action> {
        let action = match self {
            Request::FetchExperiments => Action::Experiments(ExperimentsAction::FetchExperiments),
            Request::DeleteExperiment => Action::Experiments(ExperimentsAction::DeleteExperiment),
            Request::FetchTrialTemplates => Action::TrialTemplate(TrialTemplateAction::FetchTemplates),
            Request::FetchTemplates => Action::Templates(TemplatesAction::FetchTemplates),
            Request::MutateTemplate => Action::Templates(TemplatesAction::Mutate),
            Request::FetchExperiment(key)
            | Request::FetchSuggestion(key)
            | Request::FetchHpJobInfo(key)
            | Request::FetchNasJobInfo(key) => Action::Monitor(MonitorAction::Fetch(key.clone())),
            Request::FetchHpJobTrialInfo { .. } => Action::Monitor(MonitorAction::FetchTrialInfo),
            Request::SubmitYaml | Request::SubmitJob(_) => Action::Submit(SubmitAction::Submit),
            Request::FetchNamespaces => return None,
        };
        Some(action)
    }
}

fn failed(request: &Request, error: &GatewayError) -> String {
    warn!(?request, %error, "request failed");
    error.user_message()
}

/// Performs `request` against `client` and describes the outcome as an action.
pub fn execute(client: &mut dyn Client, store: &Store, request: &Request) -> Action {
    debug!(?request, "executing");
    match request {
        Request::FetchExperiments => {
            let namespace = &store.experiments().criteria.namespace;
            match client.fetch_experiments(namespace) {
                Ok(experiments) => Action::Experiments(ExperimentsAction::FetchExperimentsSuccess(experiments)),
                Err(err) => Action::Experiments(ExperimentsAction::FetchExperimentsFailure(failed(request, &err))),
            }
        }
        Request::FetchNamespaces => match client.fetch_namespaces() {
            Ok(namespaces) => Action::Experiments(ExperimentsAction::FetchNamespacesSuccess(namespaces)),
            Err(err) => Action::Experiments(ExperimentsAction::FetchNamespacesFailure(failed(request, &err))),
        },
        Request::DeleteExperiment => {
            let key = match &store.experiments().delete_dialog {
                Some(key) => key.clone(),
                None => {
                    return Action::Experiments(ExperimentsAction::DeleteExperimentFailure(
                        "No experiment selected for deletion".to_owned(),
                    ))
                }
            };
            match client.delete_experiment(&key) {
                Ok(()) => Action::Experiments(ExperimentsAction::DeleteExperimentSuccess(key)),
                Err(err) => Action::Experiments(ExperimentsAction::DeleteExperimentFailure(failed(request, &err))),
            }
        }
        Request::FetchTrialTemplates => match client.fetch_trial_templates() {
            Ok(tree) => Action::TrialTemplate(TrialTemplateAction::FetchTemplatesSuccess(tree)),
            Err(err) => Action::TrialTemplate(TrialTemplateAction::FetchTemplatesFailure(failed(request, &err))),
        },
        Request::FetchTemplates => match client.fetch_trial_templates() {
            Ok(tree) => Action::Templates(TemplatesAction::FetchTemplatesSuccess(tree)),
            Err(err) => Action::Templates(TemplatesAction::FetchTemplatesFailure(failed(request, &err))),
        },
        Request::MutateTemplate => {
            use crate::store::templates::DialogState;

            let dialog = &store.templates().dialog;
            let result = match (dialog, dialog.change()) {
                (DialogState::Add(_), Some(change)) => client.add_template(&change),
                (DialogState::Edit { .. }, Some(change)) => client.edit_template(&change),
                (DialogState::Delete { .. }, Some(change)) => client.delete_template(&change),
                (DialogState::Closed, _) | (_, None) => {
                    return Action::Templates(TemplatesAction::MutateFailure("No template dialog is open".to_owned()))
                }
            };
            match result {
                Ok(tree) => Action::Templates(TemplatesAction::MutateSuccess(tree)),
                Err(err) => Action::Templates(TemplatesAction::MutateFailure(failed(request, &err))),
            }
        }
        Request::FetchExperiment(key) => match client.fetch_experiment(key) {
            Ok(manifest) => Action::Monitor(MonitorAction::FetchExperimentSuccess(manifest)),
            Err(err) => Action::Monitor(MonitorAction::FetchFailure(failed(request, &err))),
        },
        Request::FetchSuggestion(key) => match client.fetch_suggestion(key) {
            Ok(suggestion) => Action::Monitor(MonitorAction::FetchSuggestionSuccess(suggestion)),
            Err(err) => Action::Monitor(MonitorAction::FetchFailure(failed(request, &err))),
        },
        Request::FetchHpJobInfo(key) => match client.fetch_hp_job_info(key) {
            Ok(table) => Action::Monitor(MonitorAction::FetchHpJobInfoSuccess(table)),
            Err(err) => Action::Monitor(MonitorAction::FetchFailure(failed(request, &err))),
        },
        Request::FetchHpJobTrialInfo { trial_name, namespace } => {
            match client.fetch_hp_job_trial_info(trial_name, namespace) {
                Ok(table) => Action::Monitor(MonitorAction::FetchTrialInfoSuccess(trial_name.clone(), table)),
                Err(err) => Action::Monitor(MonitorAction::FetchFailure(failed(request, &err))),
            }
        }
        Request::FetchNasJobInfo(key) => match client.fetch_nas_job_info(key) {
            Ok(steps) => Action::Monitor(MonitorAction::FetchNasJobInfoSuccess(steps)),
            Err(err) => Action::Monitor(MonitorAction::FetchFailure(failed(request, &err))),
        },
        Request::SubmitYaml => {
            let yaml = &store.submit().yaml;
            let name = serde_yaml::from_str::<serde_yaml::Value>(yaml)
                .ok()
                .and_then(|value| value["metadata"]["name"].as_str().map(str::to_owned))
                .unwrap_or_default();
            match client.submit_yaml(yaml) {
                Ok(()) => Action::Submit(SubmitAction::SubmitSuccess(name)),
                Err(err) => Action::Submit(SubmitAction::SubmitFailure(failed(request, &err))),
            }
        }
        Request::SubmitJob(kind) => {
            let document = match build_experiment(store, *kind) {
                Ok(document) => document,
                Err(err) => {
                    warn!(%err, "experiment could not be built");
                    return Action::Submit(SubmitAction::SubmitFailure(err.to_string()));
                }
            };
            let result = match kind {
                JobKind::Hyperparameter => client.submit_hp_job(&document),
                JobKind::ArchitectureSearch => client.submit_nas_job(&document),
            };
            match result {
                Ok(()) => Action::Submit(SubmitAction::SubmitSuccess(document.metadata.name)),
                Err(err) => Action::Submit(SubmitAction::SubmitFailure(failed(request, &err))),
            }
        }
    }
}

impl Store {
    /// Marks `request` as started, runs it and applies its outcome.
    pub fn perform(&mut self, client: &mut dyn Client, request: Request) {
        if let Some(started) = request.started() {
            self.dispatch(started);
        }
        let outcome = execute(client, self, &request);
        self.dispatch(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{
            document::ExperimentDocument,
            experiment::{Experiment, ExperimentStatus},
            id::NamespaceFilter,
            table::Table,
            template::{ConfigMapTemplates, NamespaceTemplates, Template, TemplateChange, TemplateTree},
            trial::NasStep,
        },
        store::templates::{DialogState, TemplateDraft},
    };
    use anyhow::anyhow;

    /// In-memory backend recording what it was asked to do.
    #[derive(Default)]
    struct FakeClient {
        experiments: Vec<Experiment>,
        tree: TemplateTree,
        fail_with: Option<String>,
        deleted: Vec<ExperimentKey>,
        submitted: Vec<ExperimentDocument>,
        yaml: Vec<String>,
        changes: Vec<(&'static str, TemplateChange)>,
        fetched_namespace: Option<NamespaceFilter>,
    }

    impl FakeClient {
        fn check(&self) -> Result<(), GatewayError> {
            match &self.fail_with {
                Some(message) => Err(GatewayError::Rejected {
                    status: 500,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    impl Client for FakeClient {
        fn fetch_experiments(&mut self, namespace: &NamespaceFilter) -> Result<Vec<Experiment>, GatewayError> {
            self.check()?;
            self.fetched_namespace = Some(namespace.clone());
            Ok(self.experiments.clone())
        }

        fn fetch_experiment(&mut self, experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError> {
            self.check()?;
            Ok(serde_json::json!({ "metadata": { "name": experiment.name } }))
        }

        fn delete_experiment(&mut self, experiment: &ExperimentKey) -> Result<(), GatewayError> {
            self.check()?;
            self.deleted.push(experiment.clone());
            Ok(())
        }

        fn fetch_suggestion(&mut self, _experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError> {
            Err(GatewayError::Transport(anyhow!("connection refused")))
        }

        fn submit_yaml(&mut self, yaml: &str) -> Result<(), GatewayError> {
            self.check()?;
            self.yaml.push(yaml.to_owned());
            Ok(())
        }

        fn submit_hp_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError> {
            self.check()?;
            self.submitted.push(experiment.clone());
            Ok(())
        }

        fn submit_nas_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError> {
            self.submit_hp_job(experiment)
        }

        fn fetch_hp_job_info(&mut self, _experiment: &ExperimentKey) -> Result<Table, GatewayError> {
            self.check()?;
            Ok(Table::parse("trialName,Status\nrandom-1,Succeeded"))
        }

        fn fetch_hp_job_trial_info(&mut self, _trial_name: &str, _namespace: &Namespace) -> Result<Table, GatewayError> {
            self.check()?;
            Ok(Table::parse("metricName,time,value\nloss,2020-01-01,0.3"))
        }

        fn fetch_nas_job_info(&mut self, _experiment: &ExperimentKey) -> Result<Vec<NasStep>, GatewayError> {
            self.check()?;
            Ok(Vec::new())
        }

        fn fetch_trial_templates(&mut self) -> Result<TemplateTree, GatewayError> {
            self.check()?;
            Ok(self.tree.clone())
        }

        fn add_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
            self.check()?;
            self.changes.push(("add", change.clone()));
            Ok(self.tree.clone())
        }

        fn edit_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
            self.check()?;
            self.changes.push(("edit", change.clone()));
            Ok(self.tree.clone())
        }

        fn delete_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
            self.check()?;
            self.changes.push(("delete", change.clone()));
            Ok(TemplateTree::default())
        }

        fn fetch_namespaces(&mut self) -> Result<Vec<Namespace>, GatewayError> {
            self.check()?;
            Ok(vec!["kubeflow".into()])
        }
    }

    fn experiment(name: &str, status: ExperimentStatus) -> Experiment {
        Experiment {
            name: name.to_owned(),
            namespace: "kubeflow".to_owned(),
            status,
            created_at: None,
        }
    }

    fn tree() -> TemplateTree {
        TemplateTree(vec![NamespaceTemplates {
            namespace: "kubeflow".to_owned(),
            config_maps: vec![ConfigMapTemplates {
                config_map_name: "trial-templates".to_owned(),
                templates: vec![Template {
                    path: "default.yaml".to_owned(),
                    yaml: "{trialParameters.lr}".to_owned(),
                }],
            }],
        }])
    }

    #[test]
    fn fetch_toggle_and_delete() {
        let mut client = FakeClient {
            experiments: vec![
                experiment("running", ExperimentStatus::Running),
                experiment("failed", ExperimentStatus::Failed),
                experiment("succeeded", ExperimentStatus::Succeeded),
            ],
            ..FakeClient::default()
        };
        let mut store = Store::new();
        store.dispatch(Action::Experiments(ExperimentsAction::ChangeNamespace(NamespaceFilter::from(
            "kubeflow",
        ))));
        store.perform(&mut client, Request::FetchExperiments);
        assert_eq!(client.fetched_namespace, Some(NamespaceFilter::from("kubeflow")));
        assert!(!store.experiments().loading);

        store.dispatch(Action::Experiments(ExperimentsAction::ChangeStatus(
            ExperimentStatus::Failed,
            false,
        )));
        let names = |store: &Store| {
            store
                .experiments()
                .filtered
                .iter()
                .map(|e| e.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&store), vec!["running", "succeeded"]);

        store.dispatch(Action::Experiments(ExperimentsAction::OpenDeleteDialog(ExperimentKey::new(
            "running", "kubeflow",
        ))));
        store.perform(&mut client, Request::DeleteExperiment);
        assert_eq!(client.deleted, vec![ExperimentKey::new("running", "kubeflow")]);
        assert_eq!(names(&store), vec!["succeeded"]);
    }

    #[test]
    fn failure_keeps_previous_list() {
        let mut client = FakeClient {
            experiments: vec![experiment("a", ExperimentStatus::Running)],
            ..FakeClient::default()
        };
        let mut store = Store::new();
        store.perform(&mut client, Request::FetchExperiments);

        client.fail_with = Some("wrong namespace".to_owned());
        client.experiments.clear();
        store.perform(&mut client, Request::FetchExperiments);
        assert_eq!(store.experiments().all.len(), 1);
        assert!(!store.experiments().loading);
        assert_eq!(store.notification(), Some("wrong namespace"));
    }

    #[test]
    fn transport_failure_is_reported() {
        let mut client = FakeClient::default();
        let mut store = Store::new();
        store.perform(&mut client, Request::FetchSuggestion(ExperimentKey::new("a", "kubeflow")));
        assert!(!store.monitor().loading);
        assert!(store.notification().unwrap().contains("connection refused"));
    }

    #[test]
    fn submit_job_from_form() {
        let mut client = FakeClient {
            tree: tree(),
            ..FakeClient::default()
        };
        let mut store = Store::new();
        store.perform(&mut client, Request::SubmitJob(JobKind::Hyperparameter));
        assert!(client.submitted.is_empty());
        assert_eq!(store.notification(), Some("no trial template is selected"));

        store.perform(&mut client, Request::FetchTrialTemplates);
        store.perform(&mut client, Request::SubmitJob(JobKind::Hyperparameter));
        assert_eq!(client.submitted.len(), 1);
        assert_eq!(store.submit().submitted.as_deref(), Some("random-experiment"));
        assert!(!store.submit().submitting);
    }

    #[test]
    fn submit_raw_yaml() {
        let mut client = FakeClient::default();
        let mut store = Store::new();
        store.dispatch(Action::Submit(SubmitAction::ChangeYaml(
            "metadata:\n  name: from-yaml\n".to_owned(),
        )));
        store.perform(&mut client, Request::SubmitYaml);
        assert_eq!(client.yaml.len(), 1);
        assert_eq!(store.submit().submitted.as_deref(), Some("from-yaml"));
    }

    #[test]
    fn template_dialog_picks_endpoint() {
        let mut client = FakeClient {
            tree: tree(),
            ..FakeClient::default()
        };
        let mut store = Store::new();
        store.perform(&mut client, Request::FetchTemplates);
        assert_eq!(store.templates().filtered, tree());

        store.dispatch(Action::Templates(TemplatesAction::OpenDialog(DialogState::Add(TemplateDraft {
            namespace: "kubeflow".to_owned(),
            config_map_name: "trial-templates".to_owned(),
            path: "new.yaml".to_owned(),
            yaml: "kind: Job".to_owned(),
        }))));
        store.perform(&mut client, Request::MutateTemplate);
        assert_eq!(client.changes[0].0, "add");
        assert_eq!(client.changes[0].1.updated_path, "new.yaml");
        assert_eq!(store.templates().dialog, DialogState::Closed);

        store.perform(&mut client, Request::MutateTemplate);
        assert_eq!(client.changes.len(), 1);

        store.dispatch(Action::Templates(TemplatesAction::OpenDialog(DialogState::Edit {
            original_path: "default.yaml".to_owned(),
            draft: TemplateDraft {
                namespace: "kubeflow".to_owned(),
                config_map_name: "trial-templates".to_owned(),
                path: "renamed.yaml".to_owned(),
                yaml: "kind: Job".to_owned(),
            },
        })));
        store.perform(&mut client, Request::MutateTemplate);
        assert_eq!(client.changes[1].0, "edit");
        assert_eq!(client.changes[1].1.path, "default.yaml");
        assert_eq!(client.changes[1].1.updated_path, "renamed.yaml");

        store.dispatch(Action::Templates(TemplatesAction::OpenDialog(DialogState::Delete {
            namespace: "kubeflow".to_owned(),
            config_map_name: "trial-templates".to_owned(),
            path: "default.yaml".to_owned(),
        })));
        store.perform(&mut client, Request::MutateTemplate);
        assert_eq!(client.changes[2].0, "delete");
        assert!(store.templates().tree.is_empty());

        store.perform(&mut client, Request::MutateTemplate);
        assert_eq!(client.changes.len(), 3);
        assert_eq!(store.notification(), Some("No template dialog is open"));
    }

    #[test]
    fn monitor_round_trip() {
        let mut client = FakeClient::default();
        let mut store = Store::new();
        let key = ExperimentKey::new("random", "kubeflow");
        store.perform(&mut client, Request::FetchHpJobInfo(key.clone()));
        store.perform(&mut client, Request::FetchExperiment(key));
        store.perform(
            &mut client,
            Request::FetchHpJobTrialInfo {
                trial_name: "random-1".to_owned(),
                namespace: "kubeflow".into(),
            },
        );
        let monitor = store.monitor();
        assert_eq!(monitor.job_info.values("trialName"), vec!["random-1"]);
        assert_eq!(monitor.manifest.as_ref().unwrap()["metadata"]["name"], "random");
        assert_eq!(monitor.trial_info.as_ref().unwrap().0, "random-1");
    }

    #[test]
    fn namespaces_are_fetched_without_loading_flag() {
        let mut client = FakeClient::default();
        let mut store = Store::new();
        store.perform(&mut client, Request::FetchNamespaces);
        assert_eq!(store.experiments().namespaces.len(), 2);
        assert!(!store.experiments().loading);
    }
}
