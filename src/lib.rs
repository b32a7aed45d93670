//! gigdeck - browse upcoming events at a venue from the terminal
//!
//! The library exposes the events client, the pagination coordinator and the
//! TUI building blocks so they can be exercised from integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod terminal;
pub mod traits;
pub mod ui;
