//! Type definitions for sdk-testing configuration

mod testing_config;

pub use testing_config::*;
