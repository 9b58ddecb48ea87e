//! Error types and classification for request execution

mod constructors;
mod types;

#[allow(unused_imports)]
pub(crate) use constructors::BoxError;
pub use constructors::{body, builder, io, protocol, unexpected};
pub use types::{Error, Kind, Result};
