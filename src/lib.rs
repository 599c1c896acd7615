// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod archive;
pub mod config;
pub mod content;
pub mod estimate;
pub mod format;
pub mod generate;
pub mod plan;
pub mod render;
