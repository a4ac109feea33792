use crate::{
    api::collector::{
        CollectorKind, FileSystemKind, HttpGet, HttpHeader, MetricsCollectorSpec, Scheme, SourceLocation,
    },
    store::{list, Reducer},
};

/// Container started next to the trial when the collector kind is `Custom`.
pub const DEFAULT_CUSTOM_COLLECTOR: &str = "name: custom-metrics-logger-and-collector\nimage: custom-metrics-collector:latest\n";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricsCollectorState {
    pub spec: MetricsCollectorSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsCollectorAction {
    /// Switches the kind; the previous kind's source location is discarded.
    ChangeKind(CollectorKind),
    ChangeFileSystemKind(FileSystemKind),
    /// File path for file collectors, URL path for HTTP collectors.
    ChangePath(String),
    ChangePort(u16),
    ChangeScheme(Scheme),
    ChangeHost(String),
    AddHeader,
    EditHeader(usize, HttpHeader),
    DeleteHeader(usize),
    AddMetricsFormat,
    EditMetricsFormat(usize, String),
    DeleteMetricsFormat(usize),
    ChangeCustomCollector(String),
    Load(MetricsCollectorSpec),
}

impl MetricsCollectorState {
    fn with_spec(&self, spec: MetricsCollectorSpec) -> Self {
        MetricsCollectorState { spec }
    }

    fn with_http_get(&self, edit: impl FnOnce(&HttpGet) -> HttpGet) -> Self {
        match &self.spec.location {
            SourceLocation::HttpGet(http_get) => self.with_spec(MetricsCollectorSpec {
                location: SourceLocation::HttpGet(edit(http_get)),
                ..self.spec.clone()
            }),
            _ => self.clone(),
        }
    }

    fn with_metrics_format(&self, edit: impl FnOnce(&[String]) -> Vec<String>) -> Self {
        let current = self.spec.metrics_format.as_deref().unwrap_or(&[]);
        let formats = edit(current);
        self.with_spec(MetricsCollectorSpec {
            metrics_format: if formats.is_empty() { None } else { Some(formats) },
            ..self.spec.clone()
        })
    }
}

impl Reducer for MetricsCollectorState {
    type Action = MetricsCollectorAction;

    fn reduce(&self, action: &MetricsCollectorAction) -> Self {
        match action {
            MetricsCollectorAction::ChangeKind(kind) => self.with_spec(MetricsCollectorSpec {
                kind: *kind,
                location: SourceLocation::for_kind(*kind),
                custom_collector: match kind {
                    CollectorKind::Custom => Some(
                        self.spec
                            .custom_collector
                            .clone()
                            .unwrap_or_else(|| DEFAULT_CUSTOM_COLLECTOR.to_owned()),
                    ),
                    _ => None,
                },
                ..self.spec.clone()
            }),
            MetricsCollectorAction::ChangeFileSystemKind(kind) => match &self.spec.location {
                SourceLocation::FileSystemPath(path) => {
                    let mut path = path.clone();
                    path.kind = *kind;
                    self.with_spec(MetricsCollectorSpec {
                        location: SourceLocation::FileSystemPath(path),
                        ..self.spec.clone()
                    })
                }
                _ => self.clone(),
            },
            MetricsCollectorAction::ChangePath(new_path) => match &self.spec.location {
                SourceLocation::FileSystemPath(path) => {
                    let mut path = path.clone();
                    path.path = new_path.clone();
                    self.with_spec(MetricsCollectorSpec {
                        location: SourceLocation::FileSystemPath(path),
                        ..self.spec.clone()
                    })
                }
                SourceLocation::HttpGet(_) => self.with_http_get(|http_get| HttpGet {
                    path: new_path.clone(),
                    ..http_get.clone()
                }),
                SourceLocation::Unset => self.clone(),
            },
            MetricsCollectorAction::ChangePort(port) => self.with_http_get(|http_get| HttpGet {
                port: *port,
                ..http_get.clone()
            }),
            MetricsCollectorAction::ChangeScheme(scheme) => self.with_http_get(|http_get| HttpGet {
                scheme: *scheme,
                ..http_get.clone()
            }),
            MetricsCollectorAction::ChangeHost(host) => self.with_http_get(|http_get| HttpGet {
                host: host.clone(),
                ..http_get.clone()
            }),
            MetricsCollectorAction::AddHeader => self.with_http_get(|http_get| HttpGet {
                http_headers: list::appended(&http_get.http_headers, HttpHeader::default()),
                ..http_get.clone()
            }),
            MetricsCollectorAction::EditHeader(index, header) => self.with_http_get(|http_get| HttpGet {
                http_headers: list::replaced(&http_get.http_headers, *index, header.clone()),
                ..http_get.clone()
            }),
            MetricsCollectorAction::DeleteHeader(index) => self.with_http_get(|http_get| HttpGet {
                http_headers: list::removed(&http_get.http_headers, *index),
                ..http_get.clone()
            }),
            MetricsCollectorAction::AddMetricsFormat => {
                self.with_metrics_format(|formats| list::appended(formats, String::new()))
            }
            MetricsCollectorAction::EditMetricsFormat(index, format) => {
                self.with_metrics_format(|formats| list::replaced(formats, *index, format.clone()))
            }
            MetricsCollectorAction::DeleteMetricsFormat(index) => {
                self.with_metrics_format(|formats| list::removed(formats, *index))
            }
            MetricsCollectorAction::ChangeCustomCollector(yaml) => match self.spec.kind {
                CollectorKind::Custom => self.with_spec(MetricsCollectorSpec {
                    custom_collector: Some(yaml.clone()),
                    ..self.spec.clone()
                }),
                _ => self.clone(),
            },
            MetricsCollectorAction::Load(spec) => self.with_spec(spec.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::collector::{DEFAULT_METRICS_PATH, DEFAULT_METRICS_PORT};
    use serde_json::json;

    fn document(state: &MetricsCollectorState) -> serde_json::Value {
        serde_json::to_value(state.spec.to_document().unwrap()).unwrap()
    }

    #[test]
    fn kind_switch_rebuilds_source() {
        let stdout = MetricsCollectorState::default();
        assert!(document(&stdout).get("source").is_none());

        let file = stdout.reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::File));
        assert_eq!(
            document(&file)["source"]["fileSystemPath"],
            json!({ "kind": "File", "path": "" })
        );

        let prometheus = file.reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::PrometheusMetric));
        let value = document(&prometheus);
        assert!(value["source"].get("fileSystemPath").is_none());
        assert_eq!(
            value["source"]["httpGet"],
            json!({
                "port": DEFAULT_METRICS_PORT,
                "path": DEFAULT_METRICS_PATH,
                "scheme": "HTTP",
                "host": "",
                "httpHeaders": []
            })
        );
        assert_eq!(value["collector"]["kind"], "PrometheusMetric");
    }

    #[test]
    fn metrics_format_survives_kind_switch() {
        let state = MetricsCollectorState::default()
            .reduce(&MetricsCollectorAction::AddMetricsFormat)
            .reduce(&MetricsCollectorAction::EditMetricsFormat(0, "{metricName: ([\\w|-]+)}".to_owned()))
            .reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::TensorFlowEvent));
        let value = document(&state);
        assert_eq!(value["source"]["filter"]["metricsFormat"][0], "{metricName: ([\\w|-]+)}");
        assert_eq!(value["source"]["fileSystemPath"]["kind"], "Directory");

        let cleared = state.reduce(&MetricsCollectorAction::DeleteMetricsFormat(0));
        assert_eq!(cleared.spec.metrics_format, None);
    }

    #[test]
    fn headers_are_copied_not_mutated() {
        let before = MetricsCollectorState::default()
            .reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::PrometheusMetric))
            .reduce(&MetricsCollectorAction::AddHeader);
        let header = HttpHeader {
            name: "Authorization".to_owned(),
            value: "Bearer token".to_owned(),
        };
        let after = before.reduce(&MetricsCollectorAction::EditHeader(0, header.clone()));
        match (&before.spec.location, &after.spec.location) {
            (SourceLocation::HttpGet(old), SourceLocation::HttpGet(new)) => {
                assert_eq!(old.http_headers, vec![HttpHeader::default()]);
                assert_eq!(new.http_headers, vec![header]);
            }
            other => panic!("unexpected locations {:?}", other),
        }
        let deleted = after.reduce(&MetricsCollectorAction::DeleteHeader(0));
        assert_eq!(document(&deleted)["source"]["httpGet"]["httpHeaders"], json!([]));
    }

    #[test]
    fn http_edits_ignored_for_file_collector() {
        let file = MetricsCollectorState::default().reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::File));
        assert_eq!(file.reduce(&MetricsCollectorAction::ChangePort(9090)), file);
        let moved = file.reduce(&MetricsCollectorAction::ChangePath("/var/log/katib/metrics.log".to_owned()));
        assert_eq!(document(&moved)["source"]["fileSystemPath"]["path"], "/var/log/katib/metrics.log");
    }

    #[test]
    fn custom_collector_only_for_custom_kind() {
        let custom = MetricsCollectorState::default().reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::Custom));
        assert_eq!(custom.spec.custom_collector.as_deref(), Some(DEFAULT_CUSTOM_COLLECTOR));
        assert_eq!(custom.spec.location, SourceLocation::Unset);
        let stdout = custom.reduce(&MetricsCollectorAction::ChangeKind(CollectorKind::StdOut));
        assert_eq!(stdout.spec.custom_collector, None);
        assert_eq!(stdout.reduce(&MetricsCollectorAction::ChangeCustomCollector("x: 1".to_owned())), stdout);
    }
}
