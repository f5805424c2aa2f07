//! Business logic services.

pub mod event_broadcaster;
pub mod fuzz_config;
pub mod normalizer;
pub mod process_runner;
pub mod scan_controller;
pub mod scope_validator;
pub mod tool_commands;
pub mod wordlists;

pub use event_broadcaster::EventBroadcaster;
pub use process_runner::{ProcessOutput, ProcessRunner, ToolHost, ToolInvocation};
pub use scan_controller::{ScanController, StartedScan};
pub use scope_validator::{ScopeError, validate_target};
pub use wordlists::WordlistStore;
