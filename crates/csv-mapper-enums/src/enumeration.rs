//! Enumerated types with a CSV text form

use std::fmt::Debug;

/// A fieldless enum whose members are written as their declared name or
/// their integer ordinal
///
/// Implement it with [`csv_enum!`] or by hand.
pub trait CsvEnum: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every member, in declaration order
    const MEMBERS: &'static [Self];

    /// Declared name of the member
    fn name(self) -> &'static str;

    /// Integer ordinal of the member
    ///
    /// Ordinals are matched as `i64`, so every member's discriminant must
    /// fit in that range. [`csv_enum!`] rejects enums that do not at
    /// compile time.
    fn ordinal(self) -> i64;

    /// Find a member by name
    ///
    /// With `ignore_case`, an exact match still wins over a case-folded one.
    fn from_name(name: &str, ignore_case: bool) -> Option<Self> {
        let exact = Self::MEMBERS.iter().copied().find(|m| m.name() == name);
        if exact.is_some() || !ignore_case {
            return exact;
        }
        Self::MEMBERS
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Find a member by ordinal
    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.ordinal() == ordinal)
    }
}

/// Declare a fieldless enum and implement [`CsvEnum`] for it
///
/// Discriminants are optional; ordinals follow the usual Rust rules. A
/// discriminant outside the `i64` range, possible with `#[repr(u64)]` or
/// wider, fails to compile.
///
/// ```rust
/// use csv_mapper_enums::{csv_enum, CsvEnum};
///
/// csv_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Priority {
///         Low = 10,
///         High = 20,
///     }
/// }
///
/// assert_eq!(Priority::High.name(), "High");
/// assert_eq!(Priority::from_ordinal(10), Some(Priority::Low));
/// ```
#[macro_export]
macro_rules! csv_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $value)?,
            )+
        }

        const _: () = {
            $(
                let ordinal = $name::$variant as i128;
                assert!(
                    ordinal >= i64::MIN as i128 && ordinal <= i64::MAX as i128,
                    "csv_enum! discriminants must fit in i64"
                );
            )+
        };

        impl $crate::CsvEnum for $name {
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            fn ordinal(self) -> i64 {
                self as i64
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Shade {
            Light = 2,
            Dark = 3,
            Mid = 1,
        }
    }

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Implicit {
            Zero,
            One,
            Two
        }
    }

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Negative {
            Below = -1,
            Above = 1,
        }
    }

    csv_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u64)]
        enum Wide {
            Small = 1,
            Largest = 9_223_372_036_854_775_807,
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CaseClash {
        Upper,
        Lower,
    }

    impl CsvEnum for CaseClash {
        const MEMBERS: &'static [Self] = &[CaseClash::Upper, CaseClash::Lower];

        fn name(self) -> &'static str {
            match self {
                CaseClash::Upper => "VALUE",
                CaseClash::Lower => "value",
            }
        }

        fn ordinal(self) -> i64 {
            self as i64
        }
    }

    #[test]
    fn test_members_in_declaration_order() {
        assert_eq!(Shade::MEMBERS, &[Shade::Light, Shade::Dark, Shade::Mid]);
        assert_eq!(Implicit::MEMBERS.len(), 3);
    }

    #[test]
    fn test_explicit_ordinals() {
        assert_eq!(Shade::Light.ordinal(), 2);
        assert_eq!(Shade::Mid.ordinal(), 1);
        assert_eq!(Shade::from_ordinal(3), Some(Shade::Dark));
        assert_eq!(Shade::from_ordinal(0), None);
    }

    #[test]
    fn test_implicit_and_negative_ordinals() {
        assert_eq!(Implicit::Two.ordinal(), 2);
        assert_eq!(Implicit::from_ordinal(0), Some(Implicit::Zero));
        assert_eq!(Negative::from_ordinal(-1), Some(Negative::Below));
    }

    #[test]
    fn test_wide_repr_ordinals_round_trip() {
        assert_eq!(Wide::Largest.ordinal(), i64::MAX);
        assert_eq!(Wide::from_ordinal(i64::MAX), Some(Wide::Largest));
        assert_eq!(Wide::from_ordinal(1), Some(Wide::Small));

        let text = Wide::Largest.ordinal().to_string();
        assert_eq!(text.parse::<i64>().ok().and_then(Wide::from_ordinal), Some(Wide::Largest));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Shade::from_name("Dark", false), Some(Shade::Dark));
        assert_eq!(Shade::from_name("dark", false), None);
        assert_eq!(Shade::from_name("dARK", true), Some(Shade::Dark));
        assert_eq!(Shade::from_name("Darker", true), None);
    }

    #[test]
    fn test_exact_name_wins_over_case_folding() {
        assert_eq!(CaseClash::from_name("value", true), Some(CaseClash::Lower));
        assert_eq!(CaseClash::from_name("VALUE", true), Some(CaseClash::Upper));
        assert_eq!(CaseClash::from_name("Value", true), Some(CaseClash::Upper));
    }

    #[test]
    fn test_name_round_trip() {
        for member in Shade::MEMBERS {
            assert_eq!(Shade::from_name(member.name(), false), Some(*member));
            assert_eq!(Shade::from_ordinal(member.ordinal()), Some(*member));
        }
    }
}
