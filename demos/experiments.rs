use anyhow::Result;
use katib_ui::{
    api::experiment::ExperimentStatus, backend::rest::Server, store::experiments::ExperimentsAction, Action, Config,
    NamespaceFilter, Request, Store,
};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<String>,
    namespace: Option<String>,
    name: Option<String>,
    hide: Option<String>,
    delete: Option<String>,
}

impl Args {
    pub fn from_env() -> Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        Ok(Args {
            config: args.opt_value_from_str(["-c", "--config"])?,
            namespace: args.opt_value_from_str(["-n", "--namespace"])?,
            name: args.opt_value_from_str("--name")?,
            hide: args.opt_value_from_str("--hide")?,
            delete: args.opt_value_from_str("--delete")?,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::from_env()?;
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };
    println!("Using {}", config.api_url());
    let mut client = Server::from_config(config);
    let mut store = Store::new();

    store.perform(&mut client, Request::FetchNamespaces);
    if let Some(namespace) = &args.namespace {
        store.dispatch(Action::Experiments(ExperimentsAction::ChangeNamespace(
            NamespaceFilter::from(namespace.as_str()),
        )));
    }
    store.perform(&mut client, Request::FetchExperiments);

    if let Some(name) = args.name {
        store.dispatch(Action::Experiments(ExperimentsAction::FilterName(name)));
    }
    if let Some(hide) = &args.hide {
        for status in hide.split(',').filter(|status| !status.is_empty()) {
            store.dispatch(Action::Experiments(ExperimentsAction::ChangeStatus(
                ExperimentStatus::from(status.trim()),
                false,
            )));
        }
    }

    if let Some(name) = &args.delete {
        let experiment = store.experiments().filtered.iter().find(|experiment| &experiment.name == name);
        match experiment.map(|experiment| experiment.key()) {
            Some(key) => {
                store.dispatch(Action::Experiments(ExperimentsAction::OpenDeleteDialog(key)));
                store.perform(&mut client, Request::DeleteExperiment);
            }
            None => println!("No listed experiment is named {}.", name),
        }
    }

    if let Some(message) = store.notification() {
        println!("Backend reported: {}", message);
    }
    let namespaces: Vec<String> = store
        .experiments()
        .namespaces
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Namespaces: {}", namespaces.join(", "));
    for experiment in &store.experiments().filtered {
        println!(
            "{:<40} {:<20} {:<12} {}",
            experiment.name,
            experiment.namespace,
            experiment.status.as_str(),
            experiment.created_at.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
