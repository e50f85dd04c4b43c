#![recursion_limit = "256"]
pub mod checks;
pub mod constants;
pub mod errors;
pub mod error_template;
pub mod icons;
pub mod routes;
pub mod unpack;
pub mod widget;
