#![doc = include_str!("../README.md")]
// If this was in Cargo.toml, it would cover examples as well
#![warn(
    missing_docs,
    clippy::panic_in_result_fn,
    clippy::missing_assert_message,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

#[cfg(not(unix))]
compile_error!("anonpipe only supports Unix-like platforms");

#[macro_use]
mod macros;

#[cfg(unix)]
mod c_wrappers;
#[cfg(unix)]
mod error;
#[cfg(unix)]
mod outcome;
#[cfg(unix)]
mod pipe;

#[cfg(unix)]
pub use {error::*, outcome::*, pipe::*};

#[cfg(test)]
#[path = "../tests/index.rs"]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests;
