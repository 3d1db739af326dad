//! Deep Space Network "now" feeds: decodes the configuration and live-state
//! documents, caches the configuration, and merges the two into one view.

pub mod clients;
pub mod config;
pub mod decode;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod repo;
pub mod routes;
pub mod services;
pub mod utils;

pub use clients::{DsnUrls, HttpClient, Transport};
pub use errors::{DecodeError, DsnError, DsnResult, Phase, TransportError};
pub use services::DsnService;
