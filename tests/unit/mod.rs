//! Unit tests for termfolio modules
//!
//! Timing tests run on a paused tokio clock; HTTP tests talk to a local
//! wiremock server.

mod test_api;
mod test_config;
mod test_engine;
mod test_error_paths;
mod test_submission;
