//! Contentplan configuration module

pub mod config;

pub use config::Config;
