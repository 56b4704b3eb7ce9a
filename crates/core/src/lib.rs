//! Autotienda Core - Shared types library.
//!
//! This crate provides the domain types used across the Autotienda
//! storefront gateway: type-safe IDs, the Chilean-peso price type, a
//! validated email wrapper, and the user role enum.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
