pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod queries;
pub mod record;
pub mod report;
pub mod scoring;
pub mod wages;
