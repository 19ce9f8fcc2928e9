//! Core invoice record, error type, and scalar normalizers.
//!
//! Everything here is pure and independent of the XML layer: the record
//! types the extractor fills, the normalizers it applies, and the admission
//! checks a transport runs before handing bytes to the parser.

mod admission;
mod error;
mod normalize;
pub mod payment_means;
mod types;

pub use admission::*;
pub use error::*;
pub use normalize::*;
pub use payment_means::{PaymentMeans, UNKNOWN_PAYMENT_MEANS_LABEL, payment_means_label};
pub use types::*;
