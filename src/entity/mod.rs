//! SeaORM entity definitions for PostgreSQL database.

pub mod fuzz_config;
pub mod fuzz_wordlist;
pub mod scan_job;
pub mod scope_target;
