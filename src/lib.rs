//! runtime-localization
//!
//! Language catalog and translation resolver for `key=value` language files:
//! display-name discovery, runtime language switching with change
//! notification, and positional template formatting with visible fallbacks.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod preference;
pub mod resolver;
pub mod resource;
pub mod service;

pub use catalog::Catalog;
pub use resolver::{
    FormatArg,
    LoadOutcome,
    Resolver,
};
pub use service::Localization;
