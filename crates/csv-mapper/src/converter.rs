//! Converters from CSV tokens to typed values

use crate::errors::ConversionError;
use std::any::type_name;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// Converts a single field token into a `T`
pub trait TypeConverter<T>: Send + Sync {
    /// Convert `value`, or report why it cannot be converted
    fn try_convert(&self, value: &str) -> Result<T, ConversionError>;

    /// Name of the produced type, for diagnostics
    fn target_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Converts a positional group of field tokens into a `T`
pub trait ArrayTypeConverter<T>: Send + Sync {
    /// Convert `values` in order, or report the first failure
    fn try_convert(&self, values: &[&str]) -> Result<T, ConversionError>;

    /// Name of the produced type, for diagnostics
    fn target_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Passes the token through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl TypeConverter<String> for StringConverter {
    fn try_convert(&self, value: &str) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
}

/// Accepts `true`/`false` in any casing
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl TypeConverter<bool> for BoolConverter {
    fn try_convert(&self, value: &str) -> Result<bool, ConversionError> {
        let token = value.trim();
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::new(
                value,
                "bool",
                "expected 'true' or 'false'",
            ))
        }
    }
}

/// Converts through the type's [`FromStr`] implementation after trimming
pub struct FromStrConverter<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> FromStrConverter<T> {
    /// Create a new converter
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FromStrConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromStrConverter")
            .field("target", &type_name::<T>())
            .finish()
    }
}

impl<T> TypeConverter<T> for FromStrConverter<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn try_convert(&self, value: &str) -> Result<T, ConversionError> {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConversionError::new(value, type_name::<T>(), e.to_string()))
    }
}

/// Maps a blank token to `None` and delegates everything else
pub struct NullableConverter<T> {
    inner: Arc<dyn TypeConverter<T>>,
}

impl<T: 'static> NullableConverter<T> {
    /// Wrap an element converter
    pub fn new(inner: impl TypeConverter<T> + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Wrap an already shared element converter
    pub fn from_arc(inner: Arc<dyn TypeConverter<T>>) -> Self {
        Self { inner }
    }
}

impl<T> TypeConverter<Option<T>> for NullableConverter<T> {
    fn try_convert(&self, value: &str) -> Result<Option<T>, ConversionError> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        self.inner.try_convert(value).map(Some)
    }
}

/// Applies an element converter to each token of a group, keeping order
pub struct ArrayConverter<T> {
    element: Arc<dyn TypeConverter<T>>,
}

impl<T: 'static> ArrayConverter<T> {
    /// Wrap an element converter
    pub fn new(element: impl TypeConverter<T> + 'static) -> Self {
        Self {
            element: Arc::new(element),
        }
    }

    /// Wrap an already shared element converter
    pub fn from_arc(element: Arc<dyn TypeConverter<T>>) -> Self {
        Self { element }
    }
}

impl<T> ArrayTypeConverter<Vec<T>> for ArrayConverter<T> {
    fn try_convert(&self, values: &[&str]) -> Result<Vec<T>, ConversionError> {
        values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                self.element
                    .try_convert(value)
                    .map_err(|e| e.at_position(position))
            })
            .collect()
    }
}
