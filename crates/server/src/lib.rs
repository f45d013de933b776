pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod observability;

pub use startup::{build_app, run};
