#![warn(clippy::all)]

//! # csv-mapper-enums
//!
//! Enum support for `csv-mapper`.
//!
//! Wrapping a provider with [`TypeConverterProviderExt::add_enums`] makes it
//! answer three kinds of request it would otherwise reject as not registered:
//!
//! - `E`: a member name (case-insensitive by default) or integer ordinal
//! - `Option<E>`: a blank field is `None`, anything else converts like `E`
//! - `Vec<E>` over a column range: each column converts like `E`, in order
//!
//! Enum types are declared with [`csv_enum!`] (or by implementing
//! [`CsvEnum`]) and registered on the wrapping provider at startup. Requests
//! for any other type are passed to the wrapped provider unchanged.

/// Enum and nullable-enum converters.
pub mod converters;
/// The `CsvEnum` trait and the `csv_enum!` declaration macro.
pub mod enumeration;
/// `add_enums` registration helpers.
pub mod extensions;
/// Runtime enum type values and converter construction.
pub mod factory;
/// Provider decorator that falls back to enum converters.
pub mod provider;
/// Classification of requested types into enum shapes.
pub mod registry;

pub use converters::{EnumConverter, NullableEnumConverter};
pub use enumeration::CsvEnum;
pub use extensions::TypeConverterProviderExt;
pub use factory::{EnumType, TypeConverterFactory};
pub use provider::EnumRespectingTypeConverterProvider;
pub use registry::{EnumRegistry, EnumShape, EnumTarget};
