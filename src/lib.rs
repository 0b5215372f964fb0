// ABOUTME: Library root for image-promote - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod auth;
pub mod command;
pub mod config;
pub mod daemon;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod output;
pub mod promote;
pub mod types;
