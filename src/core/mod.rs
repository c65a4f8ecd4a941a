//! Shared error type and AFM constants.

pub mod afm;
mod error;

pub use afm::{VALID_COUNTERPART_AFM, VALID_ISSUER_AFM, is_valid_afm};
pub use error::*;
