pub mod advice;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod exit;
pub mod platform;
pub mod probe;
pub mod render;
pub mod rules;
pub mod ui;
