#[cfg(feature = "server")]
pub(crate) mod auth;

mod account;
pub use account::*;

mod flags;
pub use flags::*;

mod teacher;
pub use teacher::*;
