//! Enum ⇄ wire-string tables.
//!
//! Each enum declares its members once, as a static table, through
//! [`wire_enum!`](crate::wire_enum). The lookup maps are built on first
//! use and cached for the lifetime of the process.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Wire spelling of one enum member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireName {
    /// The member's symbolic name, verbatim.
    Symbol,
    /// An explicit wire string.
    Text(&'static str),
    /// Sentinel member that never appears on the wire.
    Absent,
}

/// One declared enum member.
#[derive(Debug)]
pub struct Member<T: 'static> {
    /// The member itself.
    pub value: T,
    /// Symbolic (Rust) name.
    pub symbol: &'static str,
    /// Numeric code; defaults to the declaration index.
    pub code: Option<i64>,
    /// Wire spelling.
    pub wire: WireName,
}

/// An enum with a static wire-string table.
///
/// `Default` yields the tolerant fallback member: the one named
/// `Unknown`, otherwise the first declared member.
pub trait WireEnum: Copy + Eq + Hash + Debug + Default + Send + Sync + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Members in declaration order.
    const MEMBERS: &'static [Member<Self>];
    /// Whether the enum travels as its numeric code rather than a string.
    const NUMERIC: bool;

    /// Returns the cached lookup table, building it on first use.
    fn table() -> &'static EnumTable<Self>;
}

/// Bidirectional lookup table for one enum type.
#[derive(Debug)]
pub struct EnumTable<T> {
    /// Member → wire string (`None` for sentinels).
    names: HashMap<T, Option<&'static str>>,
    /// Member → symbolic name.
    symbols: HashMap<T, &'static str>,
    /// Lower-cased wire string → member.
    by_name: HashMap<String, T>,
    /// Member → numeric code.
    codes: HashMap<T, i64>,
    /// Numeric code → member (sentinels excluded).
    by_code: HashMap<i64, T>,
    /// Tolerant fallback member.
    fallback: Option<T>,
}

impl<T: Copy + Eq + Hash> EnumTable<T> {
    /// Builds the table from a member declaration.
    ///
    /// When two members share a wire string or code, the first declared wins.
    #[must_use]
    pub fn build(members: &'static [Member<T>]) -> Self {
        let mut names = HashMap::with_capacity(members.len());
        let mut symbols = HashMap::with_capacity(members.len());
        let mut by_name = HashMap::with_capacity(members.len());
        let mut codes = HashMap::with_capacity(members.len());
        let mut by_code = HashMap::with_capacity(members.len());

        for (index, member) in members.iter().enumerate() {
            let wire = match member.wire {
                WireName::Symbol => Some(member.symbol),
                WireName::Text(text) => Some(text),
                WireName::Absent => None,
            };
            let code = member
                .code
                .unwrap_or_else(|| i64::try_from(index).unwrap_or(i64::MAX));

            names.insert(member.value, wire);
            symbols.insert(member.value, member.symbol);
            codes.insert(member.value, code);

            if let Some(wire) = wire {
                by_name.entry(wire.to_ascii_lowercase()).or_insert(member.value);
                by_code.entry(code).or_insert(member.value);
            }
        }

        let fallback = members
            .iter()
            .find(|member| member.symbol == "Unknown")
            .or_else(|| members.first())
            .map(|member| member.value);

        Self {
            names,
            symbols,
            by_name,
            codes,
            by_code,
            fallback,
        }
    }

    /// Wire string of `value` (`None` for sentinels).
    #[must_use]
    pub fn name_of(&self, value: T) -> Option<&'static str> {
        self.names.get(&value).copied().flatten()
    }

    /// Symbolic name of `value`.
    #[must_use]
    pub fn symbol_of(&self, value: T) -> &'static str {
        self.symbols.get(&value).copied().unwrap_or_default()
    }

    /// Case-insensitive reverse lookup.
    #[must_use]
    pub fn lookup(&self, wire: &str) -> Option<T> {
        self.by_name.get(&wire.to_ascii_lowercase()).copied()
    }

    /// Numeric code of `value`.
    #[must_use]
    pub fn code_of(&self, value: T) -> i64 {
        self.codes.get(&value).copied().unwrap_or_default()
    }

    /// Reverse lookup by numeric code.
    #[must_use]
    pub fn lookup_code(&self, code: i64) -> Option<T> {
        self.by_code.get(&code).copied()
    }

    /// Tolerant fallback member (`Unknown`, else first declared).
    #[must_use]
    pub const fn fallback(&self) -> Option<T> {
        self.fallback
    }
}

/// Returns the wire string of `value`, or `None` for a sentinel member.
#[must_use]
pub fn string_for<T: WireEnum>(value: T) -> Option<&'static str> {
    T::table().name_of(value)
}

/// Resolves a wire string (case-insensitive). Unknown strings yield `None`.
#[must_use]
pub fn value_for<T: WireEnum>(wire: &str) -> Option<T> {
    T::table().lookup(wire)
}

/// Returns the numeric code of `value`.
#[must_use]
pub fn code_for<T: WireEnum>(value: T) -> i64 {
    T::table().code_of(value)
}

/// Resolves a numeric code. Unknown codes yield `None`.
#[must_use]
pub fn value_for_code<T: WireEnum>(code: i64) -> Option<T> {
    T::table().lookup_code(code)
}

/// Returns `true` if `value` is a sentinel with no wire spelling.
///
/// Meant for `#[serde(skip_serializing_if = "...")]`.
#[must_use]
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn is_absent<T: WireEnum>(value: &T) -> bool {
    !T::NUMERIC && string_for(*value).is_none()
}

/// Resolves a raw JSON scalar (string or integer) against the table.
pub(crate) fn resolve<T: WireEnum>(raw: &Value) -> Option<T> {
    match raw {
        Value::String(wire) => value_for(wire),
        Value::Number(number) => number.as_i64().and_then(value_for_code),
        _ => None,
    }
}

/// Writes `value` as its wire string, its code for numeric enums, or
/// `null` for a sentinel.
///
/// # Errors
///
/// Returns the serializer's error.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<T: WireEnum, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    if T::NUMERIC {
        return serializer.serialize_i64(code_for(*value));
    }
    match string_for(*value) {
        Some(wire) => serializer.serialize_str(wire),
        None => serializer.serialize_none(),
    }
}

/// Reads a wire string or numeric code; anything unrecognized is an error.
///
/// # Errors
///
/// Returns an `unknown variant` error for values missing from the table.
pub fn deserialize<'de, T: WireEnum, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    resolve(&raw).ok_or_else(|| {
        D::Error::custom(format_args!("unknown variant {raw} for enum {}", T::NAME))
    })
}

/// Declares an enum together with its wire-string table.
///
/// Each member may carry `= code` (defaults to the declaration index) and
/// `=> "wire"` or `=> null` (defaults to the symbolic name). Adding
/// `as numeric` after the name makes the enum travel as its code.
///
/// The generated type derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`
/// and `Hash`, and implements strict `Serialize`/`Deserialize`, `Display`
/// (wire string, else symbol) and `Default` (the fallback member).
#[macro_export]
macro_rules! wire_enum {
    (@wire) => { $crate::convert::WireName::Symbol };
    (@wire null) => { $crate::convert::WireName::Absent };
    (@wire $text:literal) => { $crate::convert::WireName::Text($text) };
    (@code) => { ::core::option::Option::None };
    (@code $code:literal) => { ::core::option::Option::Some($code) };
    (@numeric) => { false };
    (@numeric numeric) => { true };
    (@first $name:ident; $first:ident $(, $rest:ident)*) => { $name::$first };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident $(as $repr:ident)? {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $code:literal)? $(=> $wire:tt)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::convert::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [$crate::convert::Member<Self>] = &[
                $(
                    $crate::convert::Member {
                        value: $name::$variant,
                        symbol: stringify!($variant),
                        code: $crate::wire_enum!(@code $($code)?),
                        wire: $crate::wire_enum!(@wire $($wire)?),
                    },
                )+
            ];
            const NUMERIC: bool = $crate::wire_enum!(@numeric $($repr)?);

            fn table() -> &'static $crate::convert::EnumTable<Self> {
                static TABLE: ::std::sync::OnceLock<$crate::convert::EnumTable<$name>> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| {
                    $crate::convert::EnumTable::build(
                        <$name as $crate::convert::WireEnum>::MEMBERS,
                    )
                })
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                <Self as $crate::convert::WireEnum>::table()
                    .fallback()
                    .unwrap_or($crate::wire_enum!(@first $name; $($variant),+))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let table = <Self as $crate::convert::WireEnum>::table();
                f.write_str(table.name_of(*self).unwrap_or_else(|| table.symbol_of(*self)))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::convert::wire_enum::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::convert::wire_enum::deserialize(deserializer)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::{Arc, Barrier};

    use super::*;

    crate::wire_enum! {
        /// Test enum with every kind of wire spelling.
        enum Shade {
            /// Sentinel.
            Unknown => null,
            /// Explicit lower-case name.
            Dark => "dark",
            /// Symbolic name.
            Light,
            /// Explicit name with a space.
            HalfTone => "Half Tone",
        }
    }

    crate::wire_enum! {
        /// Numeric test enum without an `Unknown` member.
        enum Level as numeric {
            /// Zero.
            Low = 0,
            /// One.
            Mid = 1,
            /// Five.
            High = 5,
        }
    }

    #[test]
    fn test_string_for_uses_configured_or_symbolic_name() {
        // Arrange & Act & Assert
        assert_eq!(string_for(Shade::Dark), Some("dark"));
        assert_eq!(string_for(Shade::Light), Some("Light"));
        assert_eq!(string_for(Shade::HalfTone), Some("Half Tone"));
        assert_eq!(string_for(Shade::Unknown), None);
    }

    #[test]
    fn test_value_for_round_trips_every_member() {
        // Arrange
        let members = [Shade::Dark, Shade::Light, Shade::HalfTone];

        // Act & Assert
        for member in members {
            let wire = string_for(member).unwrap();
            assert_eq!(value_for::<Shade>(wire), Some(member));
        }
    }

    #[test]
    fn test_value_for_is_case_insensitive() {
        // Arrange & Act & Assert
        assert_eq!(value_for::<Shade>("DARK"), Some(Shade::Dark));
        assert_eq!(value_for::<Shade>("light"), Some(Shade::Light));
        assert_eq!(value_for::<Shade>("half tone"), Some(Shade::HalfTone));
    }

    #[test]
    fn test_value_for_never_yields_sentinel() {
        // Arrange & Act & Assert
        assert_eq!(value_for::<Shade>("Unknown"), None);
        assert_eq!(value_for::<Shade>(""), None);
        assert_eq!(value_for::<Shade>("null"), None);
        assert_eq!(value_for_code::<Shade>(0), None);
    }

    #[test]
    fn test_value_for_unknown_string_is_none() {
        // Arrange & Act
        let result = value_for::<Shade>("sepia");

        // Assert
        assert_eq!(result, None);
    }

    #[test]
    fn test_codes_default_to_declaration_index() {
        // Arrange & Act & Assert
        assert_eq!(code_for(Shade::Dark), 1);
        assert_eq!(code_for(Shade::HalfTone), 3);
        assert_eq!(code_for(Level::High), 5);
        assert_eq!(value_for_code::<Level>(5), Some(Level::High));
        assert_eq!(value_for_code::<Level>(2), None);
    }

    #[test]
    fn test_default_prefers_unknown_then_first() {
        // Arrange & Act & Assert
        assert_eq!(Shade::default(), Shade::Unknown);
        assert_eq!(Level::default(), Level::Low);
    }

    #[test]
    fn test_display_uses_wire_name_then_symbol() {
        // Arrange & Act & Assert
        assert_eq!(Shade::HalfTone.to_string(), "Half Tone");
        assert_eq!(Shade::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_serialize_text_numeric_and_sentinel() {
        // Arrange & Act & Assert
        assert_eq!(serde_json::to_string(&Shade::Dark).unwrap(), r#""dark""#);
        assert_eq!(serde_json::to_string(&Shade::Unknown).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Level::Mid).unwrap(), "1");
    }

    #[test]
    fn test_deserialize_strict() {
        // Arrange & Act
        let dark: Shade = serde_json::from_str(r#""Dark""#).unwrap();
        let high: Level = serde_json::from_str("5").unwrap();
        let by_name: Level = serde_json::from_str(r#""mid""#).unwrap();
        let unknown = serde_json::from_str::<Shade>(r#""sepia""#);

        // Assert
        assert_eq!(dark, Shade::Dark);
        assert_eq!(high, Level::High);
        assert_eq!(by_name, Level::Mid);
        let err = unknown.unwrap_err().to_string();
        assert!(err.contains("unknown variant"));
        assert!(err.contains("Shade"));
    }

    #[test]
    fn test_is_absent_only_for_sentinels() {
        // Arrange & Act & Assert
        assert!(is_absent(&Shade::Unknown));
        assert!(!is_absent(&Shade::Dark));
        assert!(!is_absent(&Level::Low));
    }

    #[test]
    fn test_table_is_built_once_under_concurrent_first_use() {
        // Arrange
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        // Act
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    let table = <Level as WireEnum>::table();
                    (table, table.lookup("HIGH"))
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Assert
        let first = results[0].0;
        for (table, found) in &results {
            assert!(std::ptr::eq(*table, first));
            assert_eq!(*found, Some(Level::High));
        }
    }
}
