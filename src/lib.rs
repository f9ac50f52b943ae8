//! Guided front end over everyday git and GitHub token setup.
//!
//! This crate provides:
//! - A gateway that runs git in the configured project directory
//! - Persisted configuration and a separately stored GitHub token
//! - Token validation against the GitHub API, skipped when offline
//! - A guided setup workflow and a read-only doctor check

pub mod app;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod doctor;
pub mod error_log;
pub mod git;
pub mod github;
pub mod logging;
pub mod menu;
pub mod network;
pub mod ops;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod setup;
