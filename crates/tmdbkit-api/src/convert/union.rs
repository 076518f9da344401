//! Discriminator-driven dispatch for polymorphic objects.
//!
//! A family (e.g. search results keyed by `media_type`) declares one
//! [`DiscriminatorMap`] listing the wire value → constructor pairs and
//! what to do when the discriminator is absent. Reading buffers the
//! object as a [`Value`], resolves the constructor from the discriminator
//! and hands it the untouched object, so shared and variant-specific
//! fields (the discriminator included) are populated in one pass.
//!
//! Writing needs no dispatch: families derive `Serialize` with
//! `#[serde(untagged)]` and the concrete record is written as-is.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ConvertError;

/// Builds one variant from the whole JSON object.
pub type Constructor<T> = fn(Value) -> serde_json::Result<T>;

/// A discriminator value as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKey {
    /// String value, matched case-insensitively.
    Text(&'static str),
    /// Integer value, matched exactly.
    Code(i64),
}

impl std::fmt::Display for WireKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "`{text}`"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

/// What to produce when the discriminator field is absent or `null`.
#[derive(Debug)]
pub enum AbsentPolicy<T> {
    /// Populate the family's declared base record.
    Fallback(Constructor<T>),
    /// Produce no instance.
    Skip,
}

/// Dispatch table for one polymorphic family.
#[derive(Debug)]
pub struct DiscriminatorMap<T> {
    /// Discriminator field name.
    field: &'static str,
    /// Wire value → constructor, in declaration order.
    entries: Vec<(WireKey, Constructor<T>)>,
    /// Absent-discriminator policy.
    absent: AbsentPolicy<T>,
}

impl<T> DiscriminatorMap<T> {
    /// Creates an empty table for `field`.
    #[must_use]
    pub const fn new(field: &'static str, absent: AbsentPolicy<T>) -> Self {
        Self {
            field,
            entries: Vec::new(),
            absent,
        }
    }

    /// Adds a string-keyed variant.
    #[must_use]
    pub fn variant(mut self, key: &'static str, constructor: Constructor<T>) -> Self {
        self.entries.push((WireKey::Text(key), constructor));
        self
    }

    /// Adds an integer-keyed variant.
    #[must_use]
    pub fn code(mut self, key: i64, constructor: Constructor<T>) -> Self {
        self.entries.push((WireKey::Code(key), constructor));
        self
    }

    /// Discriminator field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Finds the constructor registered for a discriminator value.
    #[must_use]
    pub fn resolve(&self, tag: &Value) -> Option<Constructor<T>> {
        self.entries
            .iter()
            .find(|(key, _)| match (key, tag) {
                (WireKey::Text(key), Value::String(tag)) => key.eq_ignore_ascii_case(tag),
                (WireKey::Code(key), Value::Number(tag)) => tag.as_i64() == Some(*key),
                _ => false,
            })
            .map(|(_, constructor)| *constructor)
    }

    /// Reads an object whose discriminator is one of its own fields.
    ///
    /// Returns `Ok(None)` only for a [`AbsentPolicy::Skip`] family whose
    /// object carries no discriminator.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::NotAnObject`] if `value` is not an object.
    /// - [`ConvertError::UnknownDiscriminator`] for an unregistered value.
    /// - [`ConvertError::Variant`] if populating the variant fails.
    pub fn read(&self, value: Value) -> Result<Option<T>, ConvertError> {
        let Value::Object(object) = &value else {
            return Err(ConvertError::NotAnObject { field: self.field });
        };
        let tag = object.get(self.field).cloned();
        self.read_as(tag.as_ref(), value)
    }

    /// Reads `value` using a discriminator taken from elsewhere, typically
    /// a sibling field on the parent object.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::UnknownDiscriminator`] for an unregistered value.
    /// - [`ConvertError::Variant`] if populating the variant fails.
    pub fn read_as(&self, tag: Option<&Value>, value: Value) -> Result<Option<T>, ConvertError> {
        let Some(tag) = tag.filter(|tag| !tag.is_null()) else {
            return match &self.absent {
                AbsentPolicy::Fallback(constructor) => constructor(value)
                    .map(Some)
                    .map_err(ConvertError::Variant),
                AbsentPolicy::Skip => Ok(None),
            };
        };

        let constructor = self.resolve(tag).ok_or_else(|| ConvertError::UnknownDiscriminator {
            field: self.field,
            value: tag.as_str().map_or_else(|| tag.to_string(), String::from),
            expected: self.entries.iter().map(|(key, _)| key.to_string()).collect(),
        })?;

        constructor(value).map(Some).map_err(ConvertError::Variant)
    }
}

/// Splits `nested_field` off a parent object and dispatches it on the
/// parent's discriminator; the rest of the object populates `P`.
///
/// # Errors
///
/// - [`ConvertError::NotAnObject`] if `value` is not an object.
/// - [`ConvertError::UnknownDiscriminator`] for an unregistered value.
/// - [`ConvertError::Variant`] if populating the parent or the nested value fails.
pub fn read_nested<P, T>(
    map: &DiscriminatorMap<T>,
    value: Value,
    nested_field: &str,
) -> Result<(P, Option<T>), ConvertError>
where
    P: DeserializeOwned,
{
    let Value::Object(mut object) = value else {
        return Err(ConvertError::NotAnObject { field: map.field() });
    };
    let nested = object.remove(nested_field);
    let tag = object.get(map.field()).cloned();
    let parent: P = serde_json::from_value(Value::Object(object)).map_err(ConvertError::Variant)?;

    let nested = match nested {
        None | Some(Value::Null) => None,
        Some(nested) => map.read_as(tag.as_ref(), nested)?,
    };
    Ok((parent, nested))
}

/// A polymorphic family bound to its static dispatch table.
pub trait Union: Sized + 'static {
    /// Returns the family's dispatch table.
    fn discriminator_map() -> &'static DiscriminatorMap<Self>;
}

/// `Deserialize` body for a family.
///
/// A [`AbsentPolicy::Skip`] family has no instance to return for an
/// object without a discriminator, so this reports it as an error; use
/// [`nullable`] or [`list`] where such objects are expected.
///
/// # Errors
///
/// Returns any [`ConvertError`] as a custom deserializer error.
pub fn deserialize<'de, T: Union, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let map = T::discriminator_map();
    let value = Value::deserialize(deserializer)?;
    map.read(value)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom(ConvertError::MissingDiscriminator { field: map.field() }))
}

/// `Option<T>` fields: `null` or an absent discriminator yields `None`.
pub mod nullable {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::Union;

    /// Writes the concrete record, or `null`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Reads an optional family member.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown discriminator or a malformed variant.
    pub fn deserialize<'de, T: Union, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        T::discriminator_map().read(value).map_err(D::Error::custom)
    }
}

/// `Vec<T>` fields: entries without a discriminator are dropped.
pub mod list {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::Union;

    /// Writes each concrete record.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<T: Serialize, S: Serializer>(items: &[T], serializer: S) -> Result<S::Ok, S::Error> {
        items.serialize(serializer)
    }

    /// Reads a list of family members; `null` reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown discriminator or a malformed variant;
    /// one bad entry fails the whole list.
    pub fn deserialize<'de, T: Union, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<T>, D::Error> {
        let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
        let raw = raw.unwrap_or_default();
        let total = raw.len();

        let map = T::discriminator_map();
        let mut items = Vec::with_capacity(total);
        for value in raw {
            if let Some(item) = map.read(value).map_err(D::Error::custom)? {
                items.push(item);
            }
        }

        if items.len() < total {
            tracing::debug!(
                field = map.field(),
                skipped = total.saturating_sub(items.len()),
                "dropped entries without a discriminator"
            );
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::LazyLock;

    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Base {
        id: u64,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Film {
        id: u64,
        kind: String,
        title: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Show {
        id: u64,
        kind: String,
        name: String,
    }

    #[derive(Debug, PartialEq, Serialize)]
    #[serde(untagged)]
    enum Media {
        Film(Film),
        Show(Show),
        Plain(Base),
    }

    static MEDIA: LazyLock<DiscriminatorMap<Media>> = LazyLock::new(|| {
        DiscriminatorMap::new(
            "kind",
            AbsentPolicy::Fallback(|v| serde_json::from_value(v).map(Media::Plain)),
        )
        .variant("film", |v| serde_json::from_value(v).map(Media::Film))
        .variant("show", |v| serde_json::from_value(v).map(Media::Show))
    });

    impl Union for Media {
        fn discriminator_map() -> &'static DiscriminatorMap<Self> {
            &MEDIA
        }
    }

    impl<'de> Deserialize<'de> for Media {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            super::deserialize(deserializer)
        }
    }

    #[derive(Debug, PartialEq, Serialize)]
    #[serde(untagged)]
    enum Graded {
        Pass(Base),
        Fail(Base),
    }

    static GRADED: LazyLock<DiscriminatorMap<Graded>> = LazyLock::new(|| {
        DiscriminatorMap::new("grade", AbsentPolicy::Skip)
            .code(1, |v| serde_json::from_value(v).map(Graded::Pass))
            .code(0, |v| serde_json::from_value(v).map(Graded::Fail))
    });

    impl Union for Graded {
        fn discriminator_map() -> &'static DiscriminatorMap<Self> {
            &GRADED
        }
    }

    #[derive(Debug, Deserialize)]
    struct Report {
        #[serde(default, with = "list")]
        grades: Vec<Graded>,
        #[serde(default, with = "nullable")]
        best: Option<Graded>,
    }

    #[test]
    fn test_dispatch_populates_shared_and_variant_fields() {
        // Arrange
        let value = json!({"kind": "film", "id": 1, "title": "Die Hard"});

        // Act
        let media = MEDIA.read(value).unwrap();

        // Assert
        assert_eq!(
            media,
            Some(Media::Film(Film {
                id: 1,
                kind: String::from("film"),
                title: String::from("Die Hard"),
            }))
        );
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        // Arrange
        let value = json!({"kind": "SHOW", "id": 2, "name": "Lost"});

        // Act
        let media: Media = serde_json::from_value(value).unwrap();

        // Assert
        assert!(matches!(media, Media::Show(ref show) if show.kind == "SHOW"));
    }

    #[test]
    fn test_absent_discriminator_uses_fallback() {
        // Arrange & Act
        let missing: Media = serde_json::from_value(json!({"id": 3})).unwrap();
        let null: Media = serde_json::from_value(json!({"id": 4, "kind": null})).unwrap();

        // Assert
        assert_eq!(missing, Media::Plain(Base { id: 3 }));
        assert_eq!(null, Media::Plain(Base { id: 4 }));
    }

    #[test]
    fn test_unknown_discriminator_is_fatal() {
        // Arrange
        let value = json!({"kind": "alien-broadcast", "id": 1});

        // Act
        let err = MEDIA.read(value).unwrap_err();

        // Assert
        assert!(err.is_unknown_discriminator());
        assert_eq!(
            err.to_string(),
            "unknown variant `alien-broadcast` for `kind`, expected one of `film`, `show`"
        );
    }

    #[test]
    fn test_unknown_discriminator_through_serde() {
        // Arrange
        let json = r#"[{"kind":"film","id":1,"title":"A"},{"kind":"radio","id":2}]"#;

        // Act
        let err = serde_json::from_str::<Vec<Media>>(json).unwrap_err();

        // Assert
        assert!(err.is_data());
        assert!(err.to_string().contains("unknown variant `radio`"));
    }

    #[test]
    fn test_not_an_object() {
        // Arrange & Act
        let err = MEDIA.read(json!([1, 2])).unwrap_err();

        // Assert
        assert!(matches!(err, ConvertError::NotAnObject { field: "kind" }));
    }

    #[test]
    fn test_variant_errors_propagate() {
        // Arrange
        let value = json!({"kind": "film", "id": "one", "title": "A"});

        // Act
        let err = MEDIA.read(value).unwrap_err();

        // Assert
        assert!(matches!(err, ConvertError::Variant(_)));
        assert!(!err.is_unknown_discriminator());
    }

    #[test]
    fn test_skip_policy_yields_no_instance() {
        // Arrange & Act
        let result = GRADED.read(json!({"id": 1})).unwrap();

        // Assert
        assert_eq!(result, None);
    }

    #[test]
    fn test_integer_keys() {
        // Arrange & Act
        let pass = GRADED.read(json!({"grade": 1, "id": 7})).unwrap();
        let unknown = GRADED.read(json!({"grade": 9, "id": 7})).unwrap_err();
        let wrong_type = GRADED.read(json!({"grade": "1", "id": 7})).unwrap_err();

        // Assert
        assert_eq!(pass, Some(Graded::Pass(Base { id: 7 })));
        assert!(unknown.is_unknown_discriminator());
        assert!(wrong_type.is_unknown_discriminator());
    }

    #[test]
    fn test_skip_family_standalone_requires_discriminator() {
        // Arrange
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "super::deserialize")]
            grade: Graded,
        }

        // Act
        let err = serde_json::from_value::<Wrapper>(json!({"grade": {"id": 1}})).unwrap_err();

        // Assert
        assert!(err.to_string().contains("missing discriminator field `grade`"));
    }

    #[test]
    fn test_list_and_nullable_helpers() {
        // Arrange
        let value = json!({
            "grades": [{"grade": 1, "id": 1}, {"id": 2}, {"grade": 0, "id": 3}],
            "best": {"id": 4}
        });

        // Act
        let report: Report = serde_json::from_value(value).unwrap();

        // Assert
        assert_eq!(
            report.grades,
            vec![Graded::Pass(Base { id: 1 }), Graded::Fail(Base { id: 3 })]
        );
        assert_eq!(report.best, None);
    }

    #[test]
    fn test_list_null_and_missing_read_as_empty() {
        // Arrange & Act
        let null: Report = serde_json::from_value(json!({"grades": null})).unwrap();
        let missing: Report = serde_json::from_value(json!({})).unwrap();

        // Assert
        assert!(null.grades.is_empty());
        assert!(missing.grades.is_empty());
    }

    #[test]
    fn test_read_nested_uses_parent_discriminator() {
        // Arrange
        #[derive(Debug, Deserialize)]
        struct Parent {
            id: u64,
            kind: String,
        }
        let value = json!({"id": 9, "kind": "film", "media": {"id": 1, "kind": "film", "title": "Heat"}});

        // Act
        let (parent, media) = read_nested::<Parent, _>(&MEDIA, value, "media").unwrap();

        // Assert
        assert_eq!(parent.id, 9);
        assert_eq!(parent.kind, "film");
        assert!(matches!(media, Some(Media::Film(ref film)) if film.title == "Heat"));
    }

    #[test]
    fn test_serialize_writes_concrete_record() {
        // Arrange
        let media = Media::Show(Show {
            id: 2,
            kind: String::from("show"),
            name: String::from("Lost"),
        });

        // Act
        let value = serde_json::to_value(&media).unwrap();

        // Assert
        assert_eq!(value, json!({"id": 2, "kind": "show", "name": "Lost"}));
    }
}
