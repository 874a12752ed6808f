//! Provider decorator answering enum-shaped requests

use crate::enumeration::CsvEnum;
use crate::factory::TypeConverterFactory;
use crate::registry::{EnumRegistry, EnumShape};
use csv_mapper::{
    ArrayTypeConverter, ProviderError, ProviderResult, TypeConverter, TypeConverterProvider,
};
use std::sync::Arc;
use tracing::debug;

/// Wraps a provider and builds enum converters for the types it does not know
///
/// Every request goes to the wrapped provider first. Only a
/// [`ProviderError::NotRegistered`] answer is inspected; if the requested
/// type is shaped around a registered enum a fresh converter is built,
/// otherwise the original error is returned unchanged.
#[derive(Debug, Clone)]
pub struct EnumRespectingTypeConverterProvider<P> {
    inner: P,
    registry: EnumRegistry,
}

impl<P: TypeConverterProvider> EnumRespectingTypeConverterProvider<P> {
    /// Wrap `inner` with an empty enum registry
    pub fn new(inner: P) -> Self {
        Self::with_registry(inner, EnumRegistry::new())
    }

    /// Wrap `inner` with a prepared enum registry
    pub fn with_registry(inner: P, registry: EnumRegistry) -> Self {
        Self { inner, registry }
    }

    /// Register `E`, matching names in any casing
    pub fn with_enum<E: CsvEnum>(mut self) -> Self {
        self.registry.register::<E>();
        self
    }

    /// Register `E`, matching names only in their declared casing
    pub fn with_case_sensitive_enum<E: CsvEnum>(mut self) -> Self {
        self.registry.register_case_sensitive::<E>();
        self
    }

    /// The wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// The enum registry consulted on lookup misses
    pub fn registry(&self) -> &EnumRegistry {
        &self.registry
    }

    /// Mutable access to the enum registry
    pub fn registry_mut(&mut self) -> &mut EnumRegistry {
        &mut self.registry
    }

    /// Unwrap into the wrapped provider
    pub fn into_inner(self) -> P {
        self.inner
    }

    fn resolve_enum<T: 'static>(
        &self,
        not_registered: ProviderError,
    ) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        let Some(target) = self.registry.classify::<T>() else {
            return Err(not_registered);
        };

        match target.shape() {
            EnumShape::Enum => {
                debug!(target_type = target.type_name(), "Falling back to enum converter");
                TypeConverterFactory::create_enum_converter::<T>(target.enum_type())
            }
            EnumShape::NullableEnum => {
                debug!(
                    target_type = target.type_name(),
                    "Falling back to nullable enum converter"
                );
                TypeConverterFactory::create_nullable_converter::<T>(target.enum_type())
            }
            EnumShape::EnumArray | EnumShape::NullableEnumArray => Err(not_registered),
        }
    }

    fn resolve_enum_collection<T: 'static>(
        &self,
        not_registered: ProviderError,
    ) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        let Some(target) = self.registry.classify::<T>() else {
            return Err(not_registered);
        };

        match target.shape() {
            EnumShape::EnumArray => {
                debug!(
                    target_type = target.type_name(),
                    "Falling back to enum array converter"
                );
                TypeConverterFactory::create_array_converter::<T>(target.enum_type())
            }
            EnumShape::NullableEnumArray => Err(ProviderError::unsupported(
                target.type_name(),
                format!(
                    "arrays of nullable '{}' have no defined conversion",
                    target.enum_type().name()
                ),
            )),
            EnumShape::Enum | EnumShape::NullableEnum => Err(not_registered),
        }
    }
}

impl<P: TypeConverterProvider> TypeConverterProvider for EnumRespectingTypeConverterProvider<P> {
    fn resolve<T: 'static>(&self) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        match self.inner.resolve::<T>() {
            Err(err) if err.is_not_registered() => self.resolve_enum::<T>(err),
            other => other,
        }
    }

    fn resolve_collection<T: 'static>(&self) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        match self.inner.resolve_collection::<T>() {
            Err(err) if err.is_not_registered() => self.resolve_enum_collection::<T>(err),
            other => other,
        }
    }
}
