// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod chord;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod platform;
pub mod quiz;
pub mod report;
pub mod runtime;
pub mod session;
pub mod theme;
pub mod timers;
pub mod ui;
