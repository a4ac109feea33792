use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Int,
    Double,
    Categorical,
    Discrete,
}

/// Which half of a [`ParameterSpec`] is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeasibleSpaceKind {
    FeasibleSpace,
    List,
}

/// A hyperparameter or NAS operation parameter as edited in the form.
///
/// Bounds are kept as entered; they are only interpreted when the
/// experiment document is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub parameter_type: ParameterType,
    pub feasible_space: FeasibleSpaceKind,
    pub min: String,
    pub max: String,
    pub step: String,
    pub list: Vec<String>,
}

impl Default for ParameterSpec {
    fn default() -> Self {
        ParameterSpec {
            name: String::new(),
            parameter_type: ParameterType::Double,
            feasible_space: FeasibleSpaceKind::FeasibleSpace,
            min: String::new(),
            max: String::new(),
            step: String::new(),
            list: Vec::new(),
        }
    }
}

/// Whether `step` is offered for a parameter of this type under this algorithm.
pub fn step_applies(parameter_type: ParameterType, algorithm_name: &str) -> bool {
    match parameter_type {
        ParameterType::Int => true,
        ParameterType::Double => algorithm_name == "grid",
        ParameterType::Categorical | ParameterType::Discrete => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibleSpaceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDocument {
    pub name: String,
    pub parameter_type: ParameterType,
    pub feasible_space: FeasibleSpaceDocument,
}

impl ParameterSpec {
    pub fn to_document(&self, algorithm_name: &str) -> ParameterDocument {
        let feasible_space = match self.feasible_space {
            FeasibleSpaceKind::List => FeasibleSpaceDocument {
                min: None,
                max: None,
                step: None,
                list: Some(self.list.clone()),
            },
            FeasibleSpaceKind::FeasibleSpace => FeasibleSpaceDocument {
                min: Some(self.min.clone()),
                max: Some(self.max.clone()),
                step: if !self.step.is_empty() && step_applies(self.parameter_type, algorithm_name) {
                    Some(self.step.clone())
                } else {
                    None
                },
                list: None,
            },
        };
        ParameterDocument {
            name: self.name.clone(),
            parameter_type: self.parameter_type,
            feasible_space,
        }
    }

    pub fn from_document(document: &ParameterDocument) -> Self {
        let space = &document.feasible_space;
        let feasible_space = if space.list.is_some() {
            FeasibleSpaceKind::List
        } else {
            FeasibleSpaceKind::FeasibleSpace
        };
        ParameterSpec {
            name: document.name.clone(),
            parameter_type: document.parameter_type,
            feasible_space,
            min: space.min.clone().unwrap_or_default(),
            max: space.max.clone().unwrap_or_default(),
            step: space.step.clone().unwrap_or_default(),
            list: space.list.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lr() -> ParameterSpec {
        ParameterSpec {
            name: "lr".to_owned(),
            min: "0.01".to_owned(),
            max: "0.03".to_owned(),
            step: "0.01".to_owned(),
            list: vec!["ignored".to_owned()],
            ..ParameterSpec::default()
        }
    }

    #[test]
    fn double_step_only_for_grid() {
        assert_eq!(lr().to_document("random").feasible_space.step, None);
        assert_eq!(
            lr().to_document("grid").feasible_space.step.as_deref(),
            Some("0.01")
        );
    }

    #[test]
    fn feasible_space_ignores_list_and_list_ignores_bounds() {
        let document = lr().to_document("random");
        assert_eq!(document.feasible_space.list, None);

        let mut optimizer = lr();
        optimizer.parameter_type = ParameterType::Categorical;
        optimizer.feasible_space = FeasibleSpaceKind::List;
        optimizer.list = vec!["sgd".to_owned(), "adam".to_owned()];
        let document = optimizer.to_document("grid");
        assert_eq!(document.feasible_space.min, None);
        assert_eq!(document.feasible_space.step, None);
        assert_eq!(document.feasible_space.list.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn document_serializes_camel_case() {
        let value = serde_json::to_value(lr().to_document("grid")).unwrap();
        assert_eq!(value["parameterType"], "double");
        assert_eq!(value["feasibleSpace"]["max"], "0.03");
    }
}
