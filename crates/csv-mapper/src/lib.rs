#![warn(clippy::all)]

//! # csv-mapper
//!
//! Typed CSV parsing: rows are tokenized, then each mapped column is run
//! through a converter looked up by target type.
//!
//! Converters come from a [`TypeConverterProvider`]. The bundled
//! [`DefaultTypeConverterProvider`] knows strings, booleans, chars and the
//! primitive numeric types. Other crates extend resolution by wrapping a
//! provider and answering requests it reports as
//! [`ProviderError::NotRegistered`].
//!
//! ## Example Usage
//!
//! ```rust
//! use csv_mapper::{
//!     CsvMapping, CsvParser, CsvParserOptions, CsvReaderOptions, DefaultTypeConverterProvider,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let provider = DefaultTypeConverterProvider::new();
//! let mapping = CsvMapping::<Person>::builder(&provider)
//!     .map_property(0, |p: &mut Person, v: String| p.name = v)?
//!     .map_property(1, |p: &mut Person, v: u32| p.age = v)?
//!     .build();
//!
//! let parser = CsvParser::new(CsvParserOptions::new(), mapping);
//! let rows = parser.read_from_string(&CsvReaderOptions::default(), "name,age\nAda,36")?;
//!
//! assert_eq!(rows[0].entity().map(|p| p.age), Some(36));
//! # Ok::<(), csv_mapper::CsvError>(())
//! ```

pub mod config;
pub mod converter;
pub mod errors;
pub mod mapping;
pub mod parser;
pub mod provider;

// Re-export main types
pub use config::{CsvParserOptions, CsvReaderOptions};
pub use converter::{
    ArrayConverter, ArrayTypeConverter, BoolConverter, FromStrConverter, NullableConverter,
    StringConverter, TypeConverter,
};
pub use errors::{ConversionError, CsvError, CsvResult, ProviderError, ProviderResult};
pub use mapping::{CsvMapping, CsvMappingBuilder, CsvMappingResult, RangeDefinition};
pub use parser::CsvParser;
pub use provider::{DefaultTypeConverterProvider, TypeConverterProvider};
