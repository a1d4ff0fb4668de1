//! Version handling
//!
//! - [`dotted`]: Dotted numeric versions with segment-wise ordering and padding
//! - [`extract`]: Extraction of the single referenced version from a release listing

pub mod dotted;
pub mod extract;

pub use dotted::{DottedVersion, PADDED_SEGMENTS};
pub use extract::ListingPattern;
