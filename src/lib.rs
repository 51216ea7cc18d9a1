#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod category;
pub mod config;
pub mod controller;
pub mod data;
pub mod format;
pub mod hackernews;
pub mod logging;
pub mod markup;
pub mod pagination;
pub mod pager;
pub mod style;
pub mod thread;
pub mod ui;
pub mod wrap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
