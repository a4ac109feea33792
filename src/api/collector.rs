use serde::{Deserialize, Serialize};

pub const DEFAULT_METRICS_PORT: u16 = 8080;
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectorKind {
    StdOut,
    File,
    TensorFlowEvent,
    PrometheusMetric,
    Custom,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileSystemKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemPath {
    pub kind: FileSystemKind,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGet {
    pub port: u16,
    pub path: String,
    pub scheme: Scheme,
    pub host: String,
    #[serde(default)]
    pub http_headers: Vec<HttpHeader>,
}

impl Default for HttpGet {
    fn default() -> Self {
        HttpGet {
            port: DEFAULT_METRICS_PORT,
            path: DEFAULT_METRICS_PATH.to_owned(),
            scheme: Scheme::Http,
            host: String::new(),
            http_headers: Vec::new(),
        }
    }
}

/// Where the collector reads metrics from. At most one location exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Unset,
    FileSystemPath(FileSystemPath),
    HttpGet(HttpGet),
}

impl SourceLocation {
    /// The fresh location a collector of `kind` starts with.
    pub fn for_kind(kind: CollectorKind) -> Self {
        match kind {
            CollectorKind::File => SourceLocation::FileSystemPath(FileSystemPath {
                kind: FileSystemKind::File,
                path: String::new(),
            }),
            CollectorKind::TensorFlowEvent => SourceLocation::FileSystemPath(FileSystemPath {
                kind: FileSystemKind::Directory,
                path: String::new(),
            }),
            CollectorKind::PrometheusMetric => SourceLocation::HttpGet(HttpGet::default()),
            CollectorKind::StdOut | CollectorKind::Custom | CollectorKind::None => SourceLocation::Unset,
        }
    }
}

/// Form-side metrics collector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsCollectorSpec {
    pub kind: CollectorKind,
    pub location: SourceLocation,
    /// Regular expressions for the metrics filter; `None` omits the filter entirely.
    pub metrics_format: Option<Vec<String>>,
    /// Container yaml, present only for `Custom`.
    pub custom_collector: Option<String>,
}

impl Default for MetricsCollectorSpec {
    fn default() -> Self {
        MetricsCollectorSpec {
            kind: CollectorKind::StdOut,
            location: SourceLocation::Unset,
            metrics_format: None,
            custom_collector: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorDocument {
    pub kind: CollectorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_collector: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDocument {
    #[serde(default)]
    pub metrics_format: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_system_path: Option<FileSystemPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDocument>,
}

/// Wire shape of `spec.metricsCollectorSpec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsCollectorDocument {
    pub collector: CollectorDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceDocument>,
}

impl MetricsCollectorSpec {
    pub fn to_document(&self) -> Result<MetricsCollectorDocument, serde_yaml::Error> {
        let custom_collector = match (self.kind, &self.custom_collector) {
            (CollectorKind::Custom, Some(yaml)) => Some(serde_yaml::from_str(yaml)?),
            _ => None,
        };
        let (file_system_path, http_get) = match &self.location {
            SourceLocation::Unset => (None, None),
            SourceLocation::FileSystemPath(path) => (Some(path.clone()), None),
            SourceLocation::HttpGet(http_get) => (None, Some(http_get.clone())),
        };
        let filter = self.metrics_format.as_ref().map(|formats| FilterDocument {
            metrics_format: formats.clone(),
        });
        let source = if file_system_path.is_none() && http_get.is_none() && filter.is_none() {
            None
        } else {
            Some(SourceDocument {
                file_system_path,
                http_get,
                filter,
            })
        };
        Ok(MetricsCollectorDocument {
            collector: CollectorDocument {
                kind: self.kind,
                custom_collector,
            },
            source,
        })
    }

    pub fn from_document(document: &MetricsCollectorDocument) -> Result<Self, serde_yaml::Error> {
        let custom_collector = match &document.collector.custom_collector {
            Some(container) => Some(serde_yaml::to_string(container)?),
            None => None,
        };
        let source = document.source.as_ref();
        let location = match source {
            Some(SourceDocument {
                file_system_path: Some(path),
                ..
            }) => SourceLocation::FileSystemPath(path.clone()),
            Some(SourceDocument {
                http_get: Some(http_get),
                ..
            }) => SourceLocation::HttpGet(http_get.clone()),
            _ => SourceLocation::Unset,
        };
        Ok(MetricsCollectorSpec {
            kind: document.collector.kind,
            location,
            metrics_format: source
                .and_then(|source| source.filter.as_ref())
                .map(|filter| filter.metrics_format.clone()),
            custom_collector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stdout_has_no_source() {
        let value = serde_json::to_value(MetricsCollectorSpec::default().to_document().unwrap()).unwrap();
        assert_eq!(value, json!({ "collector": { "kind": "StdOut" } }));
    }

    #[test]
    fn tensorflow_reads_a_directory() {
        assert_eq!(
            SourceLocation::for_kind(CollectorKind::TensorFlowEvent),
            SourceLocation::FileSystemPath(FileSystemPath {
                kind: FileSystemKind::Directory,
                path: String::new(),
            })
        );
    }

    #[test]
    fn custom_collector_yaml_becomes_an_object() {
        let spec = MetricsCollectorSpec {
            kind: CollectorKind::Custom,
            location: SourceLocation::Unset,
            metrics_format: Some(vec!["([\\w|-]+)\\s*=\\s*((-?\\d+)(\\.\\d+)?)".to_owned()]),
            custom_collector: Some("image: collector:latest\nname: custom".to_owned()),
        };
        let document = spec.to_document().unwrap();
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["collector"]["customCollector"]["name"], "custom");
        assert_eq!(value["source"]["filter"]["metricsFormat"][0], "([\\w|-]+)\\s*=\\s*((-?\\d+)(\\.\\d+)?)");

        let back = MetricsCollectorSpec::from_document(&document).unwrap();
        assert_eq!(back.kind, CollectorKind::Custom);
        assert_eq!(back.metrics_format, spec.metrics_format);
    }

    #[test]
    fn broken_custom_collector_is_an_error() {
        let spec = MetricsCollectorSpec {
            kind: CollectorKind::Custom,
            custom_collector: Some("name: [unclosed".to_owned()),
            ..MetricsCollectorSpec::default()
        };
        assert!(spec.to_document().is_err());
    }
}
