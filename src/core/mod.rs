//! Configuration and transport-native data shapes.

pub mod config;
pub mod models;
