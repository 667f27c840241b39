// Library surface for headless/integration tests and reuse.
// The binary only adds terminal setup, the CLI and key mapping.
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod logging;
pub mod passage;
pub mod render;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod ui;
