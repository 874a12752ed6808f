//! Converter lookup by target type

use crate::converter::{
    ArrayConverter, ArrayTypeConverter, BoolConverter, FromStrConverter, NullableConverter,
    StringConverter, TypeConverter,
};
use crate::errors::{ProviderError, ProviderResult};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Looks up converters for a requested target type
///
/// Both operations fail with [`ProviderError::NotRegistered`] when nothing is
/// known for `T`. Decorating providers rely on that variant to decide whether
/// they may supply a converter of their own.
pub trait TypeConverterProvider {
    /// Resolve a converter for a single field
    fn resolve<T: 'static>(&self) -> ProviderResult<Arc<dyn TypeConverter<T>>>;

    /// Resolve a converter for a positional group of fields
    fn resolve_collection<T: 'static>(&self) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>>;
}

impl<P: TypeConverterProvider> TypeConverterProvider for &P {
    fn resolve<T: 'static>(&self) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        (**self).resolve::<T>()
    }

    fn resolve_collection<T: 'static>(&self) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        (**self).resolve_collection::<T>()
    }
}

impl<P: TypeConverterProvider> TypeConverterProvider for Arc<P> {
    fn resolve<T: 'static>(&self) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        (**self).resolve::<T>()
    }

    fn resolve_collection<T: 'static>(&self) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        (**self).resolve_collection::<T>()
    }
}

/// A registered converter, stored type-erased
///
/// `converter` always holds an `Arc<dyn TypeConverter<T>>` or an
/// `Arc<dyn ArrayTypeConverter<T>>` for the `T` it is keyed by.
struct Registration {
    type_name: &'static str,
    converter: Box<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Registry of converters keyed by target type
#[derive(Debug)]
pub struct DefaultTypeConverterProvider {
    converters: HashMap<TypeId, Registration>,
    collections: HashMap<TypeId, Registration>,
}

impl DefaultTypeConverterProvider {
    /// Create a provider with converters for strings, booleans, chars and
    /// the primitive numeric types, plus their `Option<_>` and `Vec<_>` forms
    pub fn new() -> Self {
        let mut provider = Self::empty();
        provider.add_with_wrappers::<String>(Arc::new(StringConverter));
        provider.add_with_wrappers::<bool>(Arc::new(BoolConverter));

        macro_rules! from_str_types {
            ($provider:ident; $($ty:ty),+ $(,)?) => {
                $($provider.add_with_wrappers::<$ty>(Arc::new(FromStrConverter::<$ty>::new()));)+
            };
        }
        from_str_types!(provider; char, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

        provider
    }

    /// Create a provider without any registered converters
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// Register a single-field converter for `T`, replacing any previous one
    pub fn add<T: 'static>(&mut self, converter: impl TypeConverter<T> + 'static) -> &mut Self {
        let converter: Arc<dyn TypeConverter<T>> = Arc::new(converter);
        self.insert_converter(converter);
        self
    }

    /// Register a collection converter for `T`, replacing any previous one
    pub fn add_collection<T: 'static>(
        &mut self,
        converter: impl ArrayTypeConverter<T> + 'static,
    ) -> &mut Self {
        let converter: Arc<dyn ArrayTypeConverter<T>> = Arc::new(converter);
        self.insert_collection(converter);
        self
    }

    /// Whether a single-field converter is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Whether a collection converter is registered for `T`
    pub fn contains_collection<T: 'static>(&self) -> bool {
        self.collections.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered converters of both kinds
    pub fn len(&self) -> usize {
        self.converters.len() + self.collections.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty() && self.collections.is_empty()
    }

    /// Names of the types with a single-field converter, sorted
    pub fn registered_type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.converters.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }

    fn add_with_wrappers<T: 'static>(&mut self, converter: Arc<dyn TypeConverter<T>>) {
        let nullable: Arc<dyn TypeConverter<Option<T>>> =
            Arc::new(NullableConverter::from_arc(converter.clone()));
        let array: Arc<dyn ArrayTypeConverter<Vec<T>>> =
            Arc::new(ArrayConverter::from_arc(converter.clone()));

        self.insert_converter(converter);
        self.insert_converter(nullable);
        self.insert_collection(array);
    }

    fn insert_converter<T: 'static>(&mut self, converter: Arc<dyn TypeConverter<T>>) {
        trace!(target_type = type_name::<T>(), "Registered converter");
        self.converters.insert(
            TypeId::of::<T>(),
            Registration {
                type_name: type_name::<T>(),
                converter: Box::new(converter),
            },
        );
    }

    fn insert_collection<T: 'static>(&mut self, converter: Arc<dyn ArrayTypeConverter<T>>) {
        trace!(target_type = type_name::<T>(), "Registered collection converter");
        self.collections.insert(
            TypeId::of::<T>(),
            Registration {
                type_name: type_name::<T>(),
                converter: Box::new(converter),
            },
        );
    }
}

impl Default for DefaultTypeConverterProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConverterProvider for DefaultTypeConverterProvider {
    fn resolve<T: 'static>(&self) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|r| r.converter.downcast_ref::<Arc<dyn TypeConverter<T>>>())
            .cloned()
            .ok_or_else(ProviderError::not_registered::<T>)
    }

    fn resolve_collection<T: 'static>(&self) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        self.collections
            .get(&TypeId::of::<T>())
            .and_then(|r| r.converter.downcast_ref::<Arc<dyn ArrayTypeConverter<T>>>())
            .cloned()
            .ok_or_else(ProviderError::not_registered::<T>)
    }
}
