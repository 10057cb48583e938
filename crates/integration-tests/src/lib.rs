//! Integration tests for Orchard.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process API tests (no external dependencies)
//! cargo test -p orchard-integration-tests
//!
//! # Full scenarios against a running stack
//! docker run -d -p 5984:5984 couchdb
//! cargo run -p orchard-order &
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `order_api` - Routing, auth-gateway, and error-surface tests that
//!   spawn the service in-process and never touch the document store
//! - `order_scenarios` - End-to-end identity and payment flows; these
//!   require a running CouchDB and order service and are `#[ignore]`d
//!   by default
