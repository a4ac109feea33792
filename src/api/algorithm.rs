use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveType {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveDocument {
    #[serde(rename = "type")]
    pub objective_type: ObjectiveType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
    pub objective_metric_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_metric_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlgorithmSetting {
    pub name: String,
    pub value: String,
}

impl AlgorithmSetting {
    fn new(name: &str, value: &str) -> Self {
        AlgorithmSetting {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmDocument {
    pub algorithm_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub algorithm_settings: Vec<AlgorithmSetting>,
}

/// Algorithms offered for hyperparameter tuning.
pub const HP_ALGORITHMS: [&str; 8] = [
    "random",
    "grid",
    "hyperband",
    "bayesianoptimization",
    "tpe",
    "multivariate-tpe",
    "cmaes",
    "sobol",
];

/// Algorithms offered for architecture search.
pub const NAS_ALGORITHMS: [&str; 2] = ["enas", "darts"];

/// The settings table an algorithm starts with when it is picked.
pub fn default_settings(algorithm_name: &str) -> Vec<AlgorithmSetting> {
    let settings: &[(&str, &str)] = match algorithm_name {
        "random" | "sobol" => &[("random_state", "")],
        "hyperband" => &[("resource_name", ""), ("eta", ""), ("r_l", "")],
        "bayesianoptimization" => &[
            ("base_estimator", "GP"),
            ("n_initial_points", "10"),
            ("acq_func", "gp_hedge"),
            ("acq_optimizer", "auto"),
            ("random_state", ""),
        ],
        "tpe" | "multivariate-tpe" => &[
            ("n_startup_trials", "5"),
            ("n_ei_candidates", "24"),
            ("random_state", ""),
        ],
        "cmaes" => &[("random_state", ""), ("sigma", ""), ("restart_strategy", "none")],
        "enas" => &[
            ("controller_hidden_size", "64"),
            ("controller_temperature", "5.0"),
            ("controller_tanh_const", "2.25"),
            ("controller_entropy_weight", "1e-5"),
            ("controller_baseline_decay", "0.999"),
            ("controller_learning_rate", "5e-5"),
            ("controller_skip_target", "0.4"),
            ("controller_skip_weight", "0.8"),
            ("controller_train_steps", "50"),
            ("controller_log_every_steps", "10"),
        ],
        "darts" => &[
            ("num_epochs", "50"),
            ("w_lr", "0.025"),
            ("w_lr_min", "0.001"),
            ("w_momentum", "0.9"),
            ("w_weight_decay", "3e-4"),
            ("w_grad_clip", "5.0"),
            ("alpha_lr", "3e-4"),
            ("alpha_weight_decay", "1e-3"),
            ("batch_size", "128"),
            ("num_workers", "4"),
            ("init_channels", "16"),
            ("print_step", "50"),
            ("num_nodes", "4"),
            ("stem_multiplier", "3"),
        ],
        _ => &[],
    };
    settings
        .iter()
        .map(|(name, value)| AlgorithmSetting::new(name, value))
        .collect()
}
