//! Column-to-field mappings

use crate::converter::{ArrayTypeConverter, TypeConverter};
use crate::errors::{ConversionError, CsvError, CsvResult};
use crate::provider::TypeConverterProvider;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::sync::Arc;

/// An inclusive range of column indices mapped to a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeDefinition {
    /// First column (0-indexed)
    pub start: usize,
    /// Last column, inclusive
    pub end: usize,
}

impl RangeDefinition {
    /// Create a range spanning `start..=end`
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a range covering one column
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of columns covered, zero for an inverted range
    ///
    /// Saturates at `usize::MAX` for the full-width range.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Whether the range is inverted
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Whether two ranges share a column
    pub fn overlaps(&self, other: &RangeDefinition) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for RangeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..={}", self.start, self.end)
        }
    }
}

type FieldSetter<E> = Box<dyn Fn(&mut E, &[&str]) -> Result<(), ConversionError> + Send + Sync>;

struct FieldBinding<E> {
    columns: RangeDefinition,
    target: &'static str,
    apply: FieldSetter<E>,
}

/// Outcome of mapping one row
#[derive(Debug)]
pub struct CsvMappingResult<E> {
    /// Index of the source line, counting the header and skipped lines
    pub row_index: usize,
    /// The mapped entity, or why the row could not be mapped
    pub result: CsvResult<E>,
}

impl<E> CsvMappingResult<E> {
    /// Whether the row mapped without errors
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// Borrow the mapped entity if the row is valid
    pub fn entity(&self) -> Option<&E> {
        self.result.as_ref().ok()
    }

    /// Borrow the error if the row is invalid
    pub fn error(&self) -> Option<&CsvError> {
        self.result.as_ref().err()
    }

    /// Consume into the underlying result
    pub fn into_result(self) -> CsvResult<E> {
        self.result
    }
}

/// Converts tokenized rows into entities of type `E`
///
/// Built with [`CsvMapping::builder`], which resolves every converter up
/// front so that lookup failures surface before any data is read.
pub struct CsvMapping<E> {
    bindings: Vec<FieldBinding<E>>,
}

impl<E> std::fmt::Debug for CsvMapping<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.bindings
                    .iter()
                    .map(|b| format!("{} -> {}", b.columns, b.target)),
            )
            .finish()
    }
}

impl<E: Default + 'static> CsvMapping<E> {
    /// Start a mapping whose converters come from `provider`
    pub fn builder<P: TypeConverterProvider>(provider: &P) -> CsvMappingBuilder<'_, E, P> {
        CsvMappingBuilder {
            provider,
            bindings: Vec::new(),
        }
    }

    /// Number of mapped fields
    pub fn field_count(&self) -> usize {
        self.bindings.len()
    }

    /// Highest column index any field reads, if any field is mapped
    pub fn max_column(&self) -> Option<usize> {
        self.bindings.iter().map(|b| b.columns.end).max()
    }

    /// Map one tokenized row
    pub fn map(&self, row_index: usize, tokens: &[&str]) -> CsvMappingResult<E> {
        CsvMappingResult {
            row_index,
            result: self.map_entity(row_index, tokens),
        }
    }

    fn map_entity(&self, row_index: usize, tokens: &[&str]) -> CsvResult<E> {
        let mut entity = E::default();
        for binding in &self.bindings {
            let RangeDefinition { start, end } = binding.columns;
            let Some(values) = tokens.get(start..=end) else {
                return Err(CsvError::missing_column(row_index, end, tokens.len()));
            };
            (binding.apply)(&mut entity, values)
                .map_err(|source| CsvError::conversion(row_index, start, source))?;
        }
        Ok(entity)
    }
}

/// Builder for [`CsvMapping`]
pub struct CsvMappingBuilder<'p, E, P> {
    provider: &'p P,
    bindings: Vec<FieldBinding<E>>,
}

impl<'p, E: Default + 'static, P: TypeConverterProvider> CsvMappingBuilder<'p, E, P> {
    /// Map the column at `index` to a field of type `T`
    pub fn map_property<T: 'static>(
        mut self,
        index: usize,
        setter: impl Fn(&mut E, T) + Send + Sync + 'static,
    ) -> CsvResult<Self> {
        let converter: Arc<dyn TypeConverter<T>> = self.provider.resolve::<T>()?;
        self.push(
            RangeDefinition::single(index),
            type_name::<T>(),
            Box::new(move |entity: &mut E, values: &[&str]| -> Result<(), ConversionError> {
                let value = converter.try_convert(values[0])?;
                setter(entity, value);
                Ok(())
            }),
        )?;
        Ok(self)
    }

    /// Map the columns in `range` to a collection field of type `T`
    pub fn map_range<T: 'static>(
        mut self,
        range: RangeDefinition,
        setter: impl Fn(&mut E, T) + Send + Sync + 'static,
    ) -> CsvResult<Self> {
        if range.is_empty() {
            return Err(CsvError::config(format!(
                "range {}..={} for '{}' is inverted",
                range.start,
                range.end,
                type_name::<T>()
            )));
        }
        let converter: Arc<dyn ArrayTypeConverter<T>> = self.provider.resolve_collection::<T>()?;
        self.push(
            range,
            type_name::<T>(),
            Box::new(move |entity: &mut E, values: &[&str]| -> Result<(), ConversionError> {
                let value = converter.try_convert(values)?;
                setter(entity, value);
                Ok(())
            }),
        )?;
        Ok(self)
    }

    /// Finish the mapping
    pub fn build(self) -> CsvMapping<E> {
        CsvMapping {
            bindings: self.bindings,
        }
    }

    fn push(
        &mut self,
        columns: RangeDefinition,
        target: &'static str,
        apply: FieldSetter<E>,
    ) -> CsvResult<()> {
        if let Some(existing) = self.bindings.iter().find(|b| b.columns.overlaps(&columns)) {
            return Err(CsvError::config(format!(
                "columns {} for '{}' overlap columns {} already mapped to '{}'",
                columns, target, existing.columns, existing.target
            )));
        }
        self.bindings.push(FieldBinding {
            columns,
            target,
            apply,
        });
        Ok(())
    }
}
