//! Autotienda Storefront library.
//!
//! This crate provides the storefront gateway functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod categories;
pub mod config;
pub mod error;
pub mod events;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
