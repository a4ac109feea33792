use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Label the namespace picker shows for "no namespace restriction".
pub const ALL_NAMESPACES: &str = "All namespaces";

// NAMESPACES

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Namespace(name)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Namespace(name.to_owned())
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A namespace selection, either a concrete namespace or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceFilter {
    All,
    Only(Namespace),
}

impl NamespaceFilter {
    pub fn matches(&self, namespace: &str) -> bool {
        match self {
            NamespaceFilter::All => true,
            NamespaceFilter::Only(only) => only.as_ref() == namespace,
        }
    }

    /// The value sent in `?namespace=` query parameters. The wildcard is sent empty.
    pub fn as_query(&self) -> &str {
        match self {
            NamespaceFilter::All => "",
            NamespaceFilter::Only(namespace) => namespace.as_ref(),
        }
    }
}

impl Default for NamespaceFilter {
    fn default() -> Self {
        NamespaceFilter::All
    }
}

impl From<&str> for NamespaceFilter {
    fn from(value: &str) -> Self {
        if value == ALL_NAMESPACES {
            NamespaceFilter::All
        } else {
            NamespaceFilter::Only(value.into())
        }
    }
}

impl From<String> for NamespaceFilter {
    fn from(value: String) -> Self {
        if value == ALL_NAMESPACES {
            NamespaceFilter::All
        } else {
            NamespaceFilter::Only(value.into())
        }
    }
}

impl Display for NamespaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceFilter::All => f.write_str(ALL_NAMESPACES),
            NamespaceFilter::Only(namespace) => namespace.fmt(f),
        }
    }
}

/// Identity of an experiment on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperimentKey {
    pub name: String,
    pub namespace: Namespace,
}

impl ExperimentKey {
    pub fn new(name: impl Into<String>, namespace: impl Into<Namespace>) -> Self {
        ExperimentKey {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_label_maps_to_wildcard() {
        assert_eq!(NamespaceFilter::from(ALL_NAMESPACES), NamespaceFilter::All);
        assert_eq!(
            NamespaceFilter::from("kubeflow"),
            NamespaceFilter::Only("kubeflow".into())
        );
        assert_eq!(NamespaceFilter::All.to_string(), ALL_NAMESPACES);
    }

    #[test]
    fn wildcard_matches_everything() {
        assert!(NamespaceFilter::All.matches("anything"));
        assert!(!NamespaceFilter::from("a").matches("b"));
        assert_eq!(NamespaceFilter::All.as_query(), "");
    }
}
