//! Bindings from concrete parsers to the node model.
//!
//! Each binding implements [`ExternalValue`](crate::adapter::ExternalValue)
//! for its parser's value type and provides a
//! [`ConfigFactory`](crate::factory::ConfigFactory). Bindings are enabled by
//! Cargo features of the same name.

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "toml")]
pub mod toml;
#[cfg(feature = "hocon")]
pub mod hocon;
