pub mod config;
pub mod logging;

pub mod filter;
pub mod mapping;
pub mod url_model;
