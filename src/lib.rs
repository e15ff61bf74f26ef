#![forbid(unsafe_code)]

pub mod anchor_id;
pub mod anchors;
pub mod cli;
pub mod commands;
pub mod env_config;
pub mod headings;
pub mod locale;
pub mod logging;
pub mod page;
pub mod render;
pub mod webpart;

pub use anchors::{AnchorConfig, AnchorTag, extract_anchors};
