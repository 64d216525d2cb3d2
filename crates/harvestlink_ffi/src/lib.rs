//! Flutter-facing FFI crate for HarvestLink.
//! Exposes the core catalog API to Dart hosts through flutter_rust_bridge.

pub mod api;
