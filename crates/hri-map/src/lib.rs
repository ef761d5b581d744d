#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod engine;

pub use catalog::default_catalog;
pub use config::{load_mapping_config, save_mapping_config};
pub use engine::{KEYWORD_SCORE, MappingEngine, PATTERN_SCORE};
