//! Configuration loading and resolution.
//!
//! Values come from default config files, `--config` files, `PKACHU__*`
//! environment variables and CLI flags, in increasing precedence. [`load`]
//! returns a [`ResolvedConfig`] with every value parsed and checked.

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::ResolvedConfig;
