use crate::api::{
    experiment::{Experiment, ExperimentStatus},
    id::NamespaceFilter,
    template::{NamespaceTemplates, TemplateTree},
};
use std::collections::BTreeMap;

/// Which experiment statuses are shown. Statuses without an entry are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter(BTreeMap<ExperimentStatus, bool>);

impl StatusFilter {
    pub fn is_enabled(&self, status: &ExperimentStatus) -> bool {
        self.0.get(status).copied().unwrap_or(false)
    }

    pub fn set(&mut self, status: ExperimentStatus, enabled: bool) {
        self.0.insert(status, enabled);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExperimentStatus, bool)> {
        self.0.iter().map(|(status, enabled)| (status, *enabled))
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter(
            ExperimentStatus::KNOWN
                .iter()
                .cloned()
                .map(|status| (status, true))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub name_substring: String,
    pub namespace: NamespaceFilter,
    pub status: StatusFilter,
}

impl FilterCriteria {
    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.status.is_enabled(&experiment.status)
            && experiment.name.contains(self.name_substring.as_str())
            && self.namespace.matches(&experiment.namespace)
    }
}

/// Stable projection of `all` onto the experiments matching every predicate.
pub fn filter_experiments(all: &[Experiment], criteria: &FilterCriteria) -> Vec<Experiment> {
    all.iter()
        .filter(|experiment| criteria.matches(experiment))
        .cloned()
        .collect()
}

/// Filters config maps by name, drops namespaces left without any, then
/// keeps the namespaces matching `namespace`.
pub fn filter_templates(
    all: &TemplateTree,
    namespace: &NamespaceFilter,
    config_map_substring: &str,
) -> TemplateTree {
    let by_config_map = all.namespaces().iter().filter_map(|block| {
        let config_maps = block
            .config_maps
            .iter()
            .filter(|config_map| config_map.config_map_name.contains(config_map_substring))
            .cloned()
            .collect::<Vec<_>>();
        if config_maps.is_empty() {
            None
        } else {
            Some(NamespaceTemplates {
                namespace: block.namespace.clone(),
                config_maps,
            })
        }
    });
    TemplateTree(
        by_config_map
            .filter(|block| namespace.matches(&block.namespace))
            .collect(),
    )
}
