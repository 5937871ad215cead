//! HTTP inbound adapter exposing the console's REST endpoints.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod minors;
pub mod navigation;
pub mod registration;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod staff;
pub mod state;
pub mod structures;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
