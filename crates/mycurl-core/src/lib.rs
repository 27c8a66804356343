pub mod cache;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod report;
pub mod retry;
pub mod transfer;
pub mod url_model;
