//! The story relay: validates generate requests, builds the prompt and makes a
//! single call to the configured completion provider.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
