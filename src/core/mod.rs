//! Core module - Configuration, events and idle scheduling

pub mod config;
pub mod events;
pub mod idle;
