//! Construction of enum converters from a runtime enum type value

use crate::converters::{EnumConverter, NullableEnumConverter};
use crate::enumeration::CsvEnum;
use csv_mapper::{
    ArrayConverter, ArrayTypeConverter, ProviderError, ProviderResult, TypeConverter,
};
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tracing::debug;

type Constructor = fn() -> Box<dyn Any>;

/// Runtime handle for one enum type and the converters it can produce
///
/// Each constructor returns a boxed `Arc` of the converter trait object:
/// `Arc<dyn TypeConverter<E>>`, `Arc<dyn TypeConverter<Option<E>>>` and
/// `Arc<dyn ArrayTypeConverter<Vec<E>>>` respectively.
#[derive(Debug, Clone, Copy)]
pub struct EnumType {
    type_id: TypeId,
    name: &'static str,
    ignore_case: bool,
    enum_converter: Constructor,
    nullable_converter: Constructor,
    array_converter: Constructor,
}

impl EnumType {
    /// Handle for `E`, matching names in any casing
    pub fn of<E: CsvEnum>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            name: type_name::<E>(),
            ignore_case: true,
            enum_converter: build_enum::<E, true>,
            nullable_converter: build_nullable::<E, true>,
            array_converter: build_array::<E, true>,
        }
    }

    /// Handle for `E`, matching names only in their declared casing
    pub fn case_sensitive<E: CsvEnum>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            name: type_name::<E>(),
            ignore_case: false,
            enum_converter: build_enum::<E, false>,
            nullable_converter: build_nullable::<E, false>,
            array_converter: build_array::<E, false>,
        }
    }

    /// Type id of the enum
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Type name of the enum
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether produced converters match names case-insensitively
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }
}

fn enum_converter<E: CsvEnum, const IGNORE_CASE: bool>() -> Arc<dyn TypeConverter<E>> {
    Arc::new(EnumConverter::<E>::with_ignore_case(IGNORE_CASE))
}

fn build_enum<E: CsvEnum, const IGNORE_CASE: bool>() -> Box<dyn Any> {
    Box::new(enum_converter::<E, IGNORE_CASE>())
}

fn build_nullable<E: CsvEnum, const IGNORE_CASE: bool>() -> Box<dyn Any> {
    let converter: Arc<dyn TypeConverter<Option<E>>> =
        Arc::new(NullableEnumConverter::<E>::with_ignore_case(IGNORE_CASE));
    Box::new(converter)
}

fn build_array<E: CsvEnum, const IGNORE_CASE: bool>() -> Box<dyn Any> {
    let element = enum_converter::<E, IGNORE_CASE>();
    let converter: Arc<dyn ArrayTypeConverter<Vec<E>>> =
        Arc::new(ArrayConverter::from_arc(element));
    Box::new(converter)
}

/// Builds converters for enum-shaped target types
///
/// The requested type `T` must be the one the enum type value produces:
/// `E`, `Option<E>` or `Vec<E>`. Any other pairing fails with
/// [`ProviderError::Configuration`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeConverterFactory;

impl TypeConverterFactory {
    /// Create a converter for the enum itself
    pub fn create_enum_converter<T: 'static>(
        enum_type: &EnumType,
    ) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        let built = (enum_type.enum_converter)();
        downcast::<Arc<dyn TypeConverter<T>>>(built, enum_type, type_name::<T>())
    }

    /// Create a converter for an optional enum value
    pub fn create_nullable_converter<T: 'static>(
        enum_type: &EnumType,
    ) -> ProviderResult<Arc<dyn TypeConverter<T>>> {
        let built = (enum_type.nullable_converter)();
        downcast::<Arc<dyn TypeConverter<T>>>(built, enum_type, type_name::<T>())
    }

    /// Create a converter for a positional group of enum values
    pub fn create_array_converter<T: 'static>(
        enum_type: &EnumType,
    ) -> ProviderResult<Arc<dyn ArrayTypeConverter<T>>> {
        let built = (enum_type.array_converter)();
        downcast::<Arc<dyn ArrayTypeConverter<T>>>(built, enum_type, type_name::<T>())
    }
}

fn downcast<C: 'static>(
    built: Box<dyn Any>,
    enum_type: &EnumType,
    requested: &'static str,
) -> ProviderResult<C> {
    match built.downcast::<C>() {
        Ok(converter) => {
            debug!(
                enum_type = enum_type.name,
                target_type = requested,
                "Built enum converter"
            );
            Ok(*converter)
        }
        Err(_) => Err(ProviderError::configuration(
            requested,
            format!(
                "no construction path from enum type '{}'",
                enum_type.name
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_enum;

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Grade {
            Pass,
            Fail,
        }
    }

    #[test]
    fn test_enum_type_value() {
        let enum_type = EnumType::of::<Grade>();
        assert_eq!(enum_type.type_id(), TypeId::of::<Grade>());
        assert!(enum_type.name().ends_with("Grade"));
        assert!(enum_type.ignores_case());
        assert!(!EnumType::case_sensitive::<Grade>().ignores_case());
    }

    #[test]
    fn test_create_enum_converter() {
        let converter =
            TypeConverterFactory::create_enum_converter::<Grade>(&EnumType::of::<Grade>()).unwrap();
        assert_eq!(converter.try_convert("fail").unwrap(), Grade::Fail);
        assert_eq!(converter.try_convert("0").unwrap(), Grade::Pass);
    }

    #[test]
    fn test_create_case_sensitive_converter() {
        let converter = TypeConverterFactory::create_enum_converter::<Grade>(
            &EnumType::case_sensitive::<Grade>(),
        )
        .unwrap();
        assert!(converter.try_convert("fail").is_err());
        assert_eq!(converter.try_convert("Fail").unwrap(), Grade::Fail);
    }

    #[test]
    fn test_create_nullable_converter() {
        let converter = TypeConverterFactory::create_nullable_converter::<Option<Grade>>(
            &EnumType::of::<Grade>(),
        )
        .unwrap();
        assert_eq!(converter.try_convert("").unwrap(), None);
        assert_eq!(converter.try_convert("Pass").unwrap(), Some(Grade::Pass));
    }

    #[test]
    fn test_create_array_converter() {
        let converter =
            TypeConverterFactory::create_array_converter::<Vec<Grade>>(&EnumType::of::<Grade>())
                .unwrap();
        assert_eq!(
            converter.try_convert(&["Fail", "Pass", "1"]).unwrap(),
            vec![Grade::Fail, Grade::Pass, Grade::Fail]
        );
    }

    #[test]
    fn test_mismatched_target_is_configuration_error() {
        let enum_type = EnumType::of::<Grade>();

        let err = TypeConverterFactory::create_enum_converter::<u32>(&enum_type)
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Configuration { .. }));
        assert_eq!(err.type_name(), "u32");
        assert!(err.to_string().contains("Grade"));

        let err = TypeConverterFactory::create_nullable_converter::<Grade>(&enum_type)
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Configuration { .. }));

        let err = TypeConverterFactory::create_array_converter::<Vec<Option<Grade>>>(&enum_type)
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Configuration { .. }));
    }
}
