//! HTTP API handlers for hexquiz-server

pub mod gallery;
pub mod health;
pub mod quiz;
pub mod validation;

pub use gallery::gallery_routes;
pub use health::health_routes;
pub use quiz::quiz_routes;
pub use validation::validation_routes;
