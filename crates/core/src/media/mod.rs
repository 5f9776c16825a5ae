//! Media identity types shared by the resolver, matcher and filter.

mod types;

pub use types::{MediaQuery, MediaType, ResolvedIdentity};
