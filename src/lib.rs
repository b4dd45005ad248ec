//! # evatr
//!
//! Client for the German Federal Central Tax Office's eVatR service,
//! which confirms foreign EU VAT identification numbers on behalf of a
//! German VAT-registered business.
//!
//! Every check runs in two stages: a local format check of both VAT
//! numbers (no network), then a single XML-RPC request whose positional
//! `[name, value]` response arrays are decoded into a typed result.
//!
//! ## Quick Start
//!
//! ```rust
//! use evatr::core::*;
//!
//! assert!(is_valid_domestic(&normalize(" DE 1234 56789 ")));
//! assert!(is_valid_foreign(&normalize("LU 26375245")));
//! assert!(!is_valid_foreign("DE123456789"));
//!
//! assert_eq!(MatchStatus::from_code("A"), MatchStatus::Matched);
//! assert_eq!(MatchStatus::from_code(""), MatchStatus::Invalid);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Format validation, response decoding, `Checker` over any `Transport` |
//! | `http` (default) | Blocking `reqwest` transport for the live endpoint |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod rpc;

#[cfg(feature = "core")]
pub mod transport;

#[cfg(feature = "core")]
pub mod check;

// Re-export the common entry points at crate root for convenience
#[cfg(feature = "core")]
pub use crate::check::Checker;
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "core")]
pub use crate::transport::{EvatrConfig, Transport, TransportError};
#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;
