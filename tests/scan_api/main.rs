//! Scan API integration suite.
//!
//! Drives the full `/api/v1` surface through `actix_web::test` with the
//! in-memory store and a scripted tool host, so no database or docker is
//! needed.
//!
//! Run with: cargo test --test scan_api

mod helpers;

mod fuzz_tests;
mod scan_tests;
mod scope_tests;
mod wordlist_tests;
