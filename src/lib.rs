pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;

pub use config::ClientConfig;
pub use model::structs::ResponseStatus;
