//! # rlpwire-core
//!
//! Shared error types for the `rlpwire` RLP codec.
//!
//! This crate defines the decode error taxonomy used by every entry
//! point of the codec. It is split out so that downstream layers
//! (transaction parsing, wire protocols) can match on decode failures
//! without depending on the codec implementation itself.
//!
//! See [`error::DecodeError`] for the full taxonomy.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{DecodeError, RlpResult};
