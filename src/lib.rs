pub mod api;
pub mod backend;
pub mod config;
pub mod effects;
pub mod extract;
pub mod filter;
pub mod store;
pub mod submission;

pub use api::client::Client;
pub use api::id::{ExperimentKey, Namespace, NamespaceFilter};
pub use backend::rest::Server;
pub use config::Config;
pub use effects::Request;
pub use store::{Action, Store};
