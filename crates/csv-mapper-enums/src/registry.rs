//! Classification of requested types into enum shapes
//!
//! Enum types are registered once at startup. Registering `E` makes four
//! target types recognizable: `E`, `Option<E>`, `Vec<E>` and
//! `Vec<Option<E>>`. Anything else classifies as unsupported.

use crate::enumeration::CsvEnum;
use crate::factory::EnumType;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use tracing::trace;

/// Shape of a requested target type relative to a registered enum `E`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumShape {
    /// `E`
    Enum,
    /// `Option<E>`
    NullableEnum,
    /// `Vec<E>`
    EnumArray,
    /// `Vec<Option<E>>`
    NullableEnumArray,
}

impl std::fmt::Display for EnumShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumShape::Enum => write!(f, "enum"),
            EnumShape::NullableEnum => write!(f, "nullable enum"),
            EnumShape::EnumArray => write!(f, "enum array"),
            EnumShape::NullableEnumArray => write!(f, "nullable enum array"),
        }
    }
}

/// A requested type recognized as enum-shaped
#[derive(Debug, Clone, Copy)]
pub struct EnumTarget {
    type_name: &'static str,
    shape: EnumShape,
    enum_type: EnumType,
}

impl EnumTarget {
    /// Name of the requested type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// How the requested type wraps the enum
    pub fn shape(&self) -> EnumShape {
        self.shape
    }

    /// The underlying enum type
    pub fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }
}

/// Registry of enum types, keyed by every target type they can answer
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    targets: HashMap<TypeId, EnumTarget>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `E` with case-insensitive name matching
    pub fn register<E: CsvEnum>(&mut self) -> &mut Self {
        self.insert::<E>(EnumType::of::<E>())
    }

    /// Register `E` with case-sensitive name matching
    pub fn register_case_sensitive<E: CsvEnum>(&mut self) -> &mut Self {
        self.insert::<E>(EnumType::case_sensitive::<E>())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<E: CsvEnum>(mut self) -> Self {
        self.register::<E>();
        self
    }

    /// Classify the requested type `T`
    ///
    /// Returns `None` when `T` is not shaped around a registered enum.
    pub fn classify<T: 'static>(&self) -> Option<&EnumTarget> {
        self.targets.get(&TypeId::of::<T>())
    }

    /// Whether `E` itself is registered
    pub fn contains<E: 'static>(&self) -> bool {
        self.classify::<E>()
            .is_some_and(|t| t.shape == EnumShape::Enum)
    }

    /// Number of registered enum types
    pub fn len(&self) -> usize {
        self.targets
            .values()
            .filter(|t| t.shape == EnumShape::Enum)
            .count()
    }

    /// Whether no enum type is registered
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Names of the registered enum types, sorted
    pub fn enum_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .targets
            .values()
            .filter(|t| t.shape == EnumShape::Enum)
            .map(|t| t.type_name)
            .collect();
        names.sort_unstable();
        names
    }

    fn insert<E: CsvEnum>(&mut self, enum_type: EnumType) -> &mut Self {
        self.insert_target::<E>(EnumShape::Enum, enum_type);
        self.insert_target::<Option<E>>(EnumShape::NullableEnum, enum_type);
        self.insert_target::<Vec<E>>(EnumShape::EnumArray, enum_type);
        self.insert_target::<Vec<Option<E>>>(EnumShape::NullableEnumArray, enum_type);
        trace!(enum_type = enum_type.name(), "Registered enum type");
        self
    }

    fn insert_target<T: 'static>(&mut self, shape: EnumShape, enum_type: EnumType) {
        self.targets.insert(
            TypeId::of::<T>(),
            EnumTarget {
                type_name: type_name::<T>(),
                shape,
                enum_type,
            },
        );
    }
}
