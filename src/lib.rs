pub mod analyzer;
pub mod changelog;
pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod report;
pub mod workflow;

pub use error::{ReleasePublishError, Result};
