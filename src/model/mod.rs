pub mod chart;
pub mod config;
