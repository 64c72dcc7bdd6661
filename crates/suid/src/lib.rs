//! Sortable, timestamp-carrying, human-friendly unique string ids.
//!
//! A [`Suid`] is a fixed-length ASCII string (default 24 characters) over an
//! unambiguous lowercase-and-digit alphabet. The leading twelve characters
//! pack the generation time at 50ns tick resolution, so plain string
//! comparison sorts ids chronologically and [`decode_timestamp`] recovers
//! the timestamp. The remaining characters carry entropy mixed with a
//! process-wide counter, keeping ids distinct even within a single tick.
//!
//! ```
//! use suid::{SuidGenerator, decode_timestamp};
//!
//! let generator = SuidGenerator::new();
//! let id = generator.generate().unwrap();
//!
//! assert_eq!(id.as_str().len(), 24);
//! assert_eq!(decode_timestamp(id.as_str()).unwrap(), id.timestamp_ns());
//! ```

mod alphabet;
mod counter;
mod error;
mod generator;
mod id;
mod rand;
mod random_native;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::alphabet::*;
pub use crate::counter::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::random_native::*;
pub use crate::time::*;
