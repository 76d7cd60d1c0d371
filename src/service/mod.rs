//! External services the round talks to.
//!
//! Only claim submission lives here. It is async and may fail; the
//! controller has already committed the win by the time it is called.

pub mod claims;

pub use claims::{from_config, ClaimService, DryRunClaimService, HttpClaimService};
