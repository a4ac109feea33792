use crate::{
    api::{
        nas::{GraphConfig, Operation},
        parameter::ParameterSpec,
    },
    store::{
        list,
        parameters::{edit_parameter, ParameterEdit},
        Reducer,
    },
};

/// Graph constraints and candidate operations of an architecture search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfigState {
    pub graph: GraphConfig,
    pub operations: Vec<Operation>,
}

impl Default for GraphConfigState {
    fn default() -> Self {
        GraphConfigState {
            graph: GraphConfig {
                num_layers: "8".to_owned(),
                input_sizes: vec!["32".to_owned(), "32".to_owned(), "3".to_owned()],
                output_sizes: vec!["10".to_owned()],
            },
            operations: vec![Operation {
                operation_type: "convolution".to_owned(),
                parameters: Vec::new(),
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphConfigAction {
    ChangeNumLayers(String),
    AddSize(SizeKind),
    EditSize(SizeKind, usize, String),
    DeleteSize(SizeKind, usize),
    AddOperation,
    DeleteOperation(usize),
    ChangeOperationType(usize, String),
    AddOperationParameter(usize),
    EditOperationParameter(usize, usize, ParameterEdit),
    DeleteOperationParameter(usize, usize),
    Load(GraphConfig, Vec<Operation>),
}

impl GraphConfigState {
    fn with_sizes(&self, kind: SizeKind, edit: impl FnOnce(&[String]) -> Vec<String>) -> Self {
        let mut graph = self.graph.clone();
        match kind {
            SizeKind::Input => graph.input_sizes = edit(&self.graph.input_sizes[..]),
            SizeKind::Output => graph.output_sizes = edit(&self.graph.output_sizes[..]),
        }
        GraphConfigState {
            graph,
            ..self.clone()
        }
    }

    fn with_operation(&self, index: usize, edit: impl FnOnce(&Operation) -> Operation) -> Self {
        GraphConfigState {
            operations: list::updated(&self.operations, index, edit),
            ..self.clone()
        }
    }
}

impl Reducer for GraphConfigState {
    type Action = GraphConfigAction;

    fn reduce(&self, action: &GraphConfigAction) -> Self {
        match action {
            GraphConfigAction::ChangeNumLayers(num_layers) => GraphConfigState {
                graph: GraphConfig {
                    num_layers: num_layers.clone(),
                    ..self.graph.clone()
                },
                ..self.clone()
            },
            GraphConfigAction::AddSize(kind) => self.with_sizes(*kind, |sizes| list::appended(sizes, String::new())),
            GraphConfigAction::EditSize(kind, index, size) => {
                self.with_sizes(*kind, |sizes| list::replaced(sizes, *index, size.clone()))
            }
            GraphConfigAction::DeleteSize(kind, index) => self.with_sizes(*kind, |sizes| list::removed(sizes, *index)),
            GraphConfigAction::AddOperation => GraphConfigState {
                operations: list::appended(&self.operations, Operation::default()),
                ..self.clone()
            },
            GraphConfigAction::DeleteOperation(index) => GraphConfigState {
                operations: list::removed(&self.operations, *index),
                ..self.clone()
            },
            GraphConfigAction::ChangeOperationType(index, operation_type) => {
                self.with_operation(*index, |operation| Operation {
                    operation_type: operation_type.clone(),
                    ..operation.clone()
                })
            }
            GraphConfigAction::AddOperationParameter(index) => self.with_operation(*index, |operation| Operation {
                parameters: list::appended(&operation.parameters, ParameterSpec::default()),
                ..operation.clone()
            }),
            GraphConfigAction::EditOperationParameter(index, parameter, edit) => {
                self.with_operation(*index, |operation| Operation {
                    parameters: list::updated(&operation.parameters, *parameter, |spec| edit_parameter(spec, edit)),
                    ..operation.clone()
                })
            }
            GraphConfigAction::DeleteOperationParameter(index, parameter) => {
                self.with_operation(*index, |operation| Operation {
                    parameters: list::removed(&operation.parameters, *parameter),
                    ..operation.clone()
                })
            }
            GraphConfigAction::Load(graph, operations) => GraphConfigState {
                graph: graph.clone(),
                operations: operations.clone(),
            },
        }
    }
}
