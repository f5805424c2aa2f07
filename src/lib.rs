//! Recon scan server library.
//!
//! Validates scan targets against a scope registry, runs reconnaissance
//! tools out-of-process and stores their normalized results for polling.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
