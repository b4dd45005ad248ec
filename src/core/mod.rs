//! Core eVatR types: input normalization, format validation, match
//! statuses, and check inputs/results.
//!
//! Nothing in this module touches the network.

mod error;
pub mod format;
mod normalize;
mod status;
mod types;

pub use error::*;
pub use format::{
    DOMESTIC_COUNTRY, VatNumber, is_valid_domestic, is_valid_foreign, supported_countries,
};
pub use normalize::normalize;
pub use status::MatchStatus;
pub use types::*;
