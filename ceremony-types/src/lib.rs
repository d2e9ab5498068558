//! # Ceremony Types
//!
//! Rust type definitions for negotiating [Webauthn] ceremonies between a Relying Party that hands
//! out ceremony options over HTTP and a client that drives the platform's credential APIs.
//!
//! The crate has two halves:
//!
//! * [`webauthn`] contains the option and credential types that are handed to, and returned by, the
//!   platform's `create()` and `get()` ceremonies.
//! * [`options`] contains the wire representation of the Relying Party's options resource, its
//!   decoded form with true binary buffers, and the partial options a caller may supply.
//!
//! [Webauthn]: https://w3c.github.io/webauthn/

mod utils;

pub mod options;
pub mod webauthn;

// Re-exports
pub use utils::{
    bytes::{Bytes, NotBase64Encoded},
    encoding,
};
