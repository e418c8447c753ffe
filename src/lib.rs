//! Contentplan - local-first planning store for marketing campaigns and content strategy

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod store;
