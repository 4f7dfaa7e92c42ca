#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # sapi-utils
//!
//! Reusable request helper utilities for the Shareabouts API server.
//!
//! These are the framework-agnostic pieces the web layer consumes: geometry
//! text formatting, request payload normalization, per-instance memoization
//! and short time-based tokens. The web framework itself (routing, CSRF
//! middleware, responders) lives elsewhere.

pub mod base62;
pub mod error;
pub mod geometry;
pub mod memo;
pub mod payload;
pub mod time;

pub use self::error::{Error, JsonErrorResponse};

pub type Result<T> = std::result::Result<T, Error>;
