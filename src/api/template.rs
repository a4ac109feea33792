use serde::{Deserialize, Serialize};

/// One trial template yaml stored under a config map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Yaml")]
    pub yaml: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapTemplates {
    #[serde(rename = "ConfigMapName")]
    pub config_map_name: String,
    #[serde(rename = "Templates", default)]
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTemplates {
    #[serde(rename = "ConfigMapNamespace")]
    pub namespace: String,
    #[serde(rename = "ConfigMaps", default)]
    pub config_maps: Vec<ConfigMapTemplates>,
}

/// `Namespace -> ConfigMapName -> TemplatePath -> yaml`, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateTree(pub Vec<NamespaceTemplates>);

impl TemplateTree {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn namespaces(&self) -> &[NamespaceTemplates] {
        &self.0
    }

    pub fn get(&self, namespace: usize, config_map: usize, path: usize) -> Option<&Template> {
        self.0
            .get(namespace)?
            .config_maps
            .get(config_map)?
            .templates
            .get(path)
    }
}

/// Body of the template mutation endpoints.
///
/// `path` addresses the existing entry, `updated_path` and `yaml` carry the new content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateChange {
    #[serde(rename = "updatedConfigMapNamespace")]
    pub namespace: String,
    #[serde(rename = "updatedConfigMapName")]
    pub config_map_name: String,
    #[serde(rename = "configMapPath")]
    pub path: String,
    #[serde(rename = "updatedConfigMapPath")]
    pub updated_path: String,
    #[serde(rename = "updatedTemplateYaml")]
    pub yaml: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_template_tree() {
        let raw = r#"[
            {
                "ConfigMapNamespace": "kubeflow",
                "ConfigMaps": [
                    {
                        "ConfigMapName": "trial-templates",
                        "Templates": [
                            { "Path": "defaultTrialTemplate.yaml", "Yaml": "kind: Job" }
                        ]
                    }
                ]
            }
        ]"#;
        let tree = serde_json::from_str::<TemplateTree>(raw).unwrap();
        assert_eq!(tree.get(0, 0, 0).unwrap().yaml, "kind: Job");
        assert!(tree.get(0, 1, 0).is_none());
        assert!(tree.get(1, 0, 0).is_none());
    }
}
