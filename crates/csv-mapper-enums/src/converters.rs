//! Converters for enum and nullable-enum fields

use crate::enumeration::CsvEnum;
use csv_mapper::{ConversionError, TypeConverter};
use std::any::type_name;
use std::marker::PhantomData;

/// Converts a declared member name or an integer ordinal into `E`
///
/// Surrounding whitespace is ignored. Names match case-insensitively unless
/// the converter is built with [`EnumConverter::case_sensitive`].
pub struct EnumConverter<E> {
    ignore_case: bool,
    _enum: PhantomData<fn() -> E>,
}

impl<E: CsvEnum> EnumConverter<E> {
    /// Create a converter that matches names in any casing
    pub fn new() -> Self {
        Self::with_ignore_case(true)
    }

    /// Create a converter that only accepts names in their declared casing
    pub fn case_sensitive() -> Self {
        Self::with_ignore_case(false)
    }

    /// Create a converter with explicit case handling
    pub fn with_ignore_case(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            _enum: PhantomData,
        }
    }

    /// Whether names are matched case-insensitively
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    fn parse(&self, value: &str) -> Result<E, ConversionError> {
        let token = value.trim();
        if token.is_empty() {
            return Err(ConversionError::new(value, type_name::<E>(), "empty value"));
        }

        if let Ok(ordinal) = token.parse::<i64>() {
            return E::from_ordinal(ordinal).ok_or_else(|| {
                ConversionError::new(
                    value,
                    type_name::<E>(),
                    format!("no member with ordinal {}", ordinal),
                )
            });
        }

        E::from_name(token, self.ignore_case).ok_or_else(|| {
            ConversionError::new(
                value,
                type_name::<E>(),
                format!("no member named '{}'", token),
            )
        })
    }
}

impl<E: CsvEnum> Default for EnumConverter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EnumConverter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumConverter")
            .field("enum", &type_name::<E>())
            .field("ignore_case", &self.ignore_case)
            .finish()
    }
}

impl<E: CsvEnum> TypeConverter<E> for EnumConverter<E> {
    fn try_convert(&self, value: &str) -> Result<E, ConversionError> {
        self.parse(value)
    }
}

/// Converts a blank token to `None` and anything else like [`EnumConverter`]
pub struct NullableEnumConverter<E> {
    inner: EnumConverter<E>,
}

impl<E: CsvEnum> NullableEnumConverter<E> {
    /// Create a converter that matches names in any casing
    pub fn new() -> Self {
        Self::with_ignore_case(true)
    }

    /// Create a converter with explicit case handling
    pub fn with_ignore_case(ignore_case: bool) -> Self {
        Self {
            inner: EnumConverter::with_ignore_case(ignore_case),
        }
    }
}

impl<E: CsvEnum> Default for NullableEnumConverter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for NullableEnumConverter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NullableEnumConverter")
            .field(&self.inner)
            .finish()
    }
}

impl<E: CsvEnum> TypeConverter<Option<E>> for NullableEnumConverter<E> {
    fn try_convert(&self, value: &str) -> Result<Option<E>, ConversionError> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        self.inner.parse(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_enum;

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Signal {
            Red = 2,
            Amber = 3,
            Green = 1,
        }
    }

    #[test]
    fn test_convert_by_name() {
        let converter = EnumConverter::<Signal>::new();
        assert_eq!(converter.try_convert("Amber").unwrap(), Signal::Amber);
        assert_eq!(converter.try_convert("  Green ").unwrap(), Signal::Green);
        assert_eq!(converter.try_convert("red").unwrap(), Signal::Red);
    }

    #[test]
    fn test_convert_by_ordinal() {
        let converter = EnumConverter::<Signal>::new();
        assert_eq!(converter.try_convert("1").unwrap(), Signal::Green);
        assert_eq!(converter.try_convert("+3").unwrap(), Signal::Amber);

        let err = converter.try_convert("7").unwrap_err();
        assert_eq!(err.message, "no member with ordinal 7");
    }

    #[test]
    fn test_case_sensitive_converter() {
        let converter = EnumConverter::<Signal>::case_sensitive();
        assert!(!converter.ignores_case());
        assert!(converter.try_convert("Red").is_ok());

        let err = converter.try_convert("red").unwrap_err();
        assert_eq!(err.value, "red");
        assert!(err.target.ends_with("Signal"));
    }

    #[test]
    fn test_empty_token_is_an_error() {
        let converter = EnumConverter::<Signal>::new();
        assert_eq!(converter.try_convert("").unwrap_err().message, "empty value");
    }

    #[test]
    fn test_nullable_converter() {
        let converter = NullableEnumConverter::<Signal>::new();
        assert_eq!(converter.try_convert("").unwrap(), None);
        assert_eq!(converter.try_convert("  ").unwrap(), None);
        assert_eq!(converter.try_convert("Amber").unwrap(), Some(Signal::Amber));
        assert_eq!(converter.try_convert("2").unwrap(), Some(Signal::Red));
        assert!(converter.try_convert("Blue").is_err());
    }

    #[test]
    fn test_debug_names_enum() {
        let rendered = format!("{:?}", NullableEnumConverter::<Signal>::new());
        assert!(rendered.contains("Signal"));
        assert!(rendered.contains("ignore_case: true"));
    }
}
