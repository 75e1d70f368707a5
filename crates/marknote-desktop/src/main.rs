//! marknote desktop application
//!
//! Markdown notes in a two-pane window, synchronized live with the remote
//! notes collection.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod bootstrap_config;
mod components;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, WindowBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marknote=debug")),
        )
        .init();

    tracing::info!("Starting marknote...");

    let config = Config::new().with_window(WindowBuilder::new().with_title("marknote"));

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
