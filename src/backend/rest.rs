use crate::{
    api::{
        client::Client,
        document::ExperimentDocument,
        error::GatewayError,
        experiment::Experiment,
        id::{ExperimentKey, Namespace, NamespaceFilter},
        lowercase_keys,
        table::Table,
        template::{TemplateChange, TemplateTree},
        trial::NasStep,
    },
    config::Config,
};
use anyhow::{anyhow, Context, Error};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Deserialize)]
struct RestErrorResponse {
    message: String,
}

/// Extracts the human readable part of an error body.
///
/// The backend mostly answers with plain text; a JSON `message` field wins when present.
fn error_message(body: &str) -> String {
    serde_json::from_str::<RestErrorResponse>(body)
        .map(|response| response.message)
        .unwrap_or_else(|_| body.trim().to_owned())
}

fn parse_error(response: ureq::Response) -> GatewayError {
    let status = response.status();
    let body = response
        .into_string()
        .unwrap_or_else(|_| "Could not turn error body into String.".to_string());
    GatewayError::Rejected {
        status,
        message: error_message(&body),
    }
}

/// Anything but a 200 is a rejection.
fn check_status(response: ureq::Response) -> Result<ureq::Response, GatewayError> {
    if response.status() == 200 {
        Ok(response)
    } else {
        Err(parse_error(response))
    }
}

/// Decodes a JSON list and normalizes its keys before typed decoding.
fn read_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, Error> {
    let items = serde_json::from_str::<Vec<serde_json::Value>>(body)?;
    lowercase_keys(items)
        .into_iter()
        .map(|item| serde_json::from_value::<T>(item).map_err(Error::from))
        .collect()
}

fn read_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    Ok(serde_json::from_str::<T>(body)?)
}

/// HTTP implementation of [`Client`] against the Katib UI backend.
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Server {
            config: Config {
                url: url.into(),
                ..Config::default()
            },
        }
    }

    pub fn from_config(config: Config) -> Self {
        Server { config }
    }

    fn execute<Ep>(&mut self, request: &Ep) -> Result<Ep::Value, GatewayError>
    where
        Ep: Endpoint,
    {
        let url = format!("{}/{}", self.config.api_url(), Ep::PATH);
        let http_response = match Ep::ENCODING {
            Encoding::Query => {
                let query = serde_qs::to_string(request).context("serializing query failed")?;
                let url = if query.is_empty() { url } else { format!("{}?{}", url, query) };
                debug!(%url, "sending request");
                let mut http_request = Ep::METHOD(&url);
                if let Some(timeout) = self.config.timeout() {
                    http_request.timeout(timeout);
                }
                http_request.call()
            }
            Encoding::Json => {
                let buffer = serde_json::to_string(request).context("serializing request failed")?;
                debug!(%url, bytes = buffer.len(), "sending request");
                let mut http_request = Ep::METHOD(&url);
                if let Some(timeout) = self.config.timeout() {
                    http_request.timeout(timeout);
                }
                http_request
                    .set("Content-Type", "application/json")
                    .send_string(&buffer)
            }
        };
        if let Some(error) = http_response.synthetic_error() {
            warn!(path = Ep::PATH, %error, "request did not reach the backend");
            return Err(GatewayError::Transport(anyhow!("{}", error)));
        }
        let http_response = check_status(http_response).map_err(|error| {
            warn!(path = Ep::PATH, %error, "backend rejected request");
            error
        })?;
        let response_string = http_response
            .into_string()
            .context("failed to turn response into string")?;
        Ep::read_response(&response_string)
            .with_context(|| format!("deserializing response of {} failed:\n{}", Ep::PATH, &response_string))
            .map_err(GatewayError::Malformed)
    }
}

impl Client for Server {
    fn fetch_experiments(&mut self, namespace: &NamespaceFilter) -> Result<Vec<Experiment>, GatewayError> {
        let request = FetchExperiments {
            namespace: namespace.as_query(),
        };
        self.execute(&request)
    }

    fn fetch_experiment(&mut self, experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError> {
        self.execute(&FetchExperiment::from(experiment))
    }

    fn delete_experiment(&mut self, experiment: &ExperimentKey) -> Result<(), GatewayError> {
        let request = DeleteExperiment(FetchExperiment::from(experiment));
        self.execute(&request)
    }

    fn fetch_suggestion(&mut self, experiment: &ExperimentKey) -> Result<serde_json::Value, GatewayError> {
        let request = FetchSuggestion {
            suggestion_name: &experiment.name,
            namespace: experiment.namespace.as_ref(),
        };
        self.execute(&request)
    }

    fn submit_yaml(&mut self, yaml: &str) -> Result<(), GatewayError> {
        self.execute(&SubmitYaml { yaml })
    }

    fn submit_hp_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError> {
        self.execute(&SubmitHpJob(SubmitJob { post_data: experiment }))
    }

    fn submit_nas_job(&mut self, experiment: &ExperimentDocument) -> Result<(), GatewayError> {
        self.execute(&SubmitNasJob(SubmitJob { post_data: experiment }))
    }

    fn fetch_hp_job_info(&mut self, experiment: &ExperimentKey) -> Result<Table, GatewayError> {
        self.execute(&FetchHpJobInfo(FetchExperiment::from(experiment)))
    }

    fn fetch_hp_job_trial_info(&mut self, trial_name: &str, namespace: &Namespace) -> Result<Table, GatewayError> {
        let request = FetchHpJobTrialInfo {
            trial_name,
            namespace: namespace.as_ref(),
        };
        self.execute(&request)
    }

    fn fetch_nas_job_info(&mut self, experiment: &ExperimentKey) -> Result<Vec<NasStep>, GatewayError> {
        self.execute(&FetchNasJobInfo(FetchExperiment::from(experiment)))
    }

    fn fetch_trial_templates(&mut self) -> Result<TemplateTree, GatewayError> {
        self.execute(&FetchTrialTemplates {})
    }

    fn add_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
        self.execute(&AddTemplate(change))
    }

    fn edit_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
        self.execute(&EditTemplate(change))
    }

    fn delete_template(&mut self, change: &TemplateChange) -> Result<TemplateTree, GatewayError> {
        self.execute(&DeleteTemplate(change))
    }

    fn fetch_namespaces(&mut self) -> Result<Vec<Namespace>, GatewayError> {
        self.execute(&FetchNamespaces {})
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Query,
    Json,
}

trait Endpoint: Serialize {
    const PATH: &'static str;
    const METHOD: fn(&str) -> ureq::Request;
    const ENCODING: Encoding;

    type Value;

    fn read_response(body: &str) -> Result<Self::Value, Error>;
}

#[derive(Debug, Clone, Copy, Serialize)]
struct FetchExperiments<'a> {
    pub namespace: &'a str,
}
impl Endpoint for FetchExperiments<'_> {
    const PATH: &'static str = "fetch_experiments/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = Vec<Experiment>;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_list(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchExperiment<'a> {
    pub experiment_name: &'a str,
    pub namespace: &'a str,
}
impl<'a> From<&'a ExperimentKey> for FetchExperiment<'a> {
    fn from(key: &'a ExperimentKey) -> Self {
        FetchExperiment {
            experiment_name: &key.name,
            namespace: key.namespace.as_ref(),
        }
    }
}
impl Endpoint for FetchExperiment<'_> {
    const PATH: &'static str = "fetch_experiment/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = serde_json::Value;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_json(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct DeleteExperiment<'a>(FetchExperiment<'a>);
impl Endpoint for DeleteExperiment<'_> {
    const PATH: &'static str = "delete_experiment/";
    const METHOD: fn(&str) -> ureq::Request = ureq::delete;
    const ENCODING: Encoding = Encoding::Query;
    type Value = ();

    fn read_response(_body: &str) -> Result<Self::Value, Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchSuggestion<'a> {
    pub suggestion_name: &'a str,
    pub namespace: &'a str,
}
impl Endpoint for FetchSuggestion<'_> {
    const PATH: &'static str = "fetch_suggestion/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = serde_json::Value;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_json(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct SubmitYaml<'a> {
    pub yaml: &'a str,
}
impl Endpoint for SubmitYaml<'_> {
    const PATH: &'static str = "submit_yaml/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = ();

    fn read_response(_body: &str) -> Result<Self::Value, Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitJob<'a> {
    pub post_data: &'a ExperimentDocument,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct SubmitHpJob<'a>(SubmitJob<'a>);
impl Endpoint for SubmitHpJob<'_> {
    const PATH: &'static str = "submit_hp_job/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = ();

    fn read_response(_body: &str) -> Result<Self::Value, Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct SubmitNasJob<'a>(SubmitJob<'a>);
impl Endpoint for SubmitNasJob<'_> {
    const PATH: &'static str = "submit_nas_job/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = ();

    fn read_response(_body: &str) -> Result<Self::Value, Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct FetchHpJobInfo<'a>(FetchExperiment<'a>);
impl Endpoint for FetchHpJobInfo<'_> {
    const PATH: &'static str = "fetch_hp_job_info/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = Table;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        Ok(Table::parse(&read_csv_body(body)))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchHpJobTrialInfo<'a> {
    pub trial_name: &'a str,
    pub namespace: &'a str,
}
impl Endpoint for FetchHpJobTrialInfo<'_> {
    const PATH: &'static str = "fetch_hp_job_trial_info/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = Table;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        Ok(Table::parse(&read_csv_body(body)))
    }
}

/// The CSV endpoints answer with the text either raw or as a JSON string.
fn read_csv_body(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_owned())
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct FetchNasJobInfo<'a>(FetchExperiment<'a>);
impl Endpoint for FetchNasJobInfo<'_> {
    const PATH: &'static str = "fetch_nas_job_info/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = Vec<NasStep>;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_list(body)
    }
}

#[derive(Deserialize)]
struct TemplatesResponse {
    #[serde(rename = "Data", default)]
    data: TemplateTree,
}

fn read_templates(body: &str) -> Result<TemplateTree, Error> {
    read_json::<TemplatesResponse>(body).map(|response| response.data)
}

#[derive(Debug, Clone, Copy, Serialize)]
struct FetchTrialTemplates {}
impl Endpoint for FetchTrialTemplates {
    const PATH: &'static str = "fetch_trial_templates/";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = TemplateTree;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_templates(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct AddTemplate<'a>(&'a TemplateChange);
impl Endpoint for AddTemplate<'_> {
    const PATH: &'static str = "add_template/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = TemplateTree;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_templates(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct EditTemplate<'a>(&'a TemplateChange);
impl Endpoint for EditTemplate<'_> {
    const PATH: &'static str = "edit_template/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = TemplateTree;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_templates(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct DeleteTemplate<'a>(&'a TemplateChange);
impl Endpoint for DeleteTemplate<'_> {
    const PATH: &'static str = "delete_template/";
    const METHOD: fn(&str) -> ureq::Request = ureq::post;
    const ENCODING: Encoding = Encoding::Json;
    type Value = TemplateTree;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_templates(body)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct FetchNamespaces {}
impl Endpoint for FetchNamespaces {
    const PATH: &'static str = "fetch_namespaces";
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    const ENCODING: Encoding = Encoding::Query;
    type Value = Vec<Namespace>;

    fn read_response(body: &str) -> Result<Self::Value, Error> {
        read_json(body)
    }
}
