//! Integration tests across all layers
//!
//! Builds model graphs, writes them, reads them back through the default
//! registry and checks structure and identity survive.
