//! Registration helpers on any converter provider

use crate::provider::EnumRespectingTypeConverterProvider;
use crate::registry::EnumRegistry;
use csv_mapper::TypeConverterProvider;

/// Adds enum support to a converter provider
///
/// ```rust
/// use csv_mapper::{DefaultTypeConverterProvider, TypeConverterProvider};
/// use csv_mapper_enums::{csv_enum, TypeConverterProviderExt};
///
/// csv_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     enum Level { Trace, Info, Warn }
/// }
///
/// let provider = DefaultTypeConverterProvider::new()
///     .add_enums()
///     .with_enum::<Level>();
///
/// let converter = provider.resolve::<Level>()?;
/// assert_eq!(converter.try_convert("Warn")?, Level::Warn);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TypeConverterProviderExt: TypeConverterProvider + Sized {
    /// Wrap this provider so enum-shaped lookup misses are answered
    fn add_enums(self) -> EnumRespectingTypeConverterProvider<Self> {
        EnumRespectingTypeConverterProvider::new(self)
    }

    /// Wrap this provider with a prepared enum registry
    fn add_enums_with(self, registry: EnumRegistry) -> EnumRespectingTypeConverterProvider<Self> {
        EnumRespectingTypeConverterProvider::with_registry(self, registry)
    }
}

impl<P: TypeConverterProvider> TypeConverterProviderExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_enum;
    use csv_mapper::DefaultTypeConverterProvider;

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Axis {
            X,
            Y,
        }
    }

    #[test]
    fn test_add_enums_keeps_base_behavior() {
        let provider = DefaultTypeConverterProvider::new().add_enums();
        assert!(provider.registry().is_empty());
        assert!(provider.resolve::<f32>().is_ok());
        assert!(provider.resolve::<Axis>().err().unwrap().is_not_registered());
    }

    #[test]
    fn test_add_enums_with_registry() {
        let registry = EnumRegistry::new().with::<Axis>();
        let provider = DefaultTypeConverterProvider::new().add_enums_with(registry);

        let converter = provider.resolve::<Axis>().unwrap();
        assert_eq!(converter.try_convert("y").unwrap(), Axis::Y);
    }

    #[test]
    fn test_add_enums_on_borrowed_provider() {
        let base = DefaultTypeConverterProvider::new();
        let provider = (&base).add_enums().with_enum::<Axis>();

        assert!(provider.resolve::<Option<Axis>>().is_ok());
        assert!(base.resolve::<Option<Axis>>().is_err());
    }
}
