//! Command handlers

pub mod config;
pub mod project;
pub mod seed;
pub mod status;
