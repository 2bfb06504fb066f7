//! Infrastructure layer.

pub mod backend;

pub use self::backend::{Authorized, Backend};
#[cfg(feature = "http")]
pub use self::backend::{http, Http};
