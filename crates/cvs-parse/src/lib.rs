//! Interpretation of CVS client output.
//!
//! CVS prints sentences, not a protocol. Every function here is total: text
//! that does not match a known phrasing yields the most conservative value
//! instead of an error. The phrasings themselves live in [`markers`].

mod failure;
mod info;
pub mod markers;
mod outcome;
mod status;
mod tags;

pub use failure::{FailureKind, classify_failure};
pub use info::parse_info;
pub use outcome::parse_outcome;
pub use status::parse_status;
pub use tags::parse_latest_tags;
