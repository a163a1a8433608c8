pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod keywords;
