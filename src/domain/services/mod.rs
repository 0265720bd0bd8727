//! Domain services
//!
//! Pure business rules that span more than one entity.

pub mod pricing;

pub use pricing::{additional_cost, booking_cost, quote_extension, ExtensionQuote};
