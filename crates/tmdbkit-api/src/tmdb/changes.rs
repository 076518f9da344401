//! Change logs, dispatched on each item's `action`.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value};

use super::enums::ChangeAction;
use crate::convert::{AbsentPolicy, DiscriminatorMap};

/// Response from `movie/{movie_id}/changes` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChanges {
    /// Changed keys.
    #[serde(default)]
    pub changes: Vec<TmdbChange>,
}

/// All changes to one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChange {
    /// Changed key (e.g. `title`, `images`).
    pub key: String,
    /// Individual edits, newest first.
    #[serde(default)]
    pub items: Vec<TmdbChangeItem>,
}

/// Fields shared by every change item; used as-is when `action` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeItemBase {
    /// Change ID.
    pub id: String,
    /// Action, [`ChangeAction::Unknown`] when absent.
    #[serde(
        default,
        with = "crate::convert::tolerant_enum",
        skip_serializing_if = "crate::convert::wire_enum::is_absent"
    )]
    pub action: ChangeAction,
    /// When the change was made.
    #[serde(with = "crate::convert::tolerant::utc_timestamp")]
    pub time: DateTime<Utc>,
    /// Language of the changed value (ISO 639-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_639_1: Option<String>,
    /// Country of the changed value (ISO 3166-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_3166_1: Option<String>,
}

/// `added`: a value was appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeAdded {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TmdbChangeItemBase,
    /// Added value.
    #[serde(default)]
    pub value: Value,
}

/// `created`: the resource was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeCreated {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TmdbChangeItemBase,
    /// Initial value, if any.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

/// `updated`: a value was replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeUpdated {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TmdbChangeItemBase,
    /// New value.
    #[serde(default)]
    pub value: Value,
    /// Previous value.
    #[serde(default)]
    pub original_value: Value,
}

/// `deleted`: a value was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeDeleted {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TmdbChangeItemBase,
    /// Removed value.
    #[serde(default)]
    pub original_value: Value,
}

/// `destroyed`: the resource was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbChangeDestroyed {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TmdbChangeItemBase,
    /// Last value, if any.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

/// One change-log item, dispatched on `action`.
///
/// An item without `action` reads as [`TmdbChangeItem::Untyped`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TmdbChangeItem {
    /// `added`.
    Added(TmdbChangeAdded),
    /// `created`.
    Created(TmdbChangeCreated),
    /// `updated`.
    Updated(TmdbChangeUpdated),
    /// `deleted`.
    Deleted(TmdbChangeDeleted),
    /// `destroyed`.
    Destroyed(TmdbChangeDestroyed),
    /// No `action` on the wire.
    Untyped(TmdbChangeItemBase),
}

static CHANGE_ITEM: LazyLock<DiscriminatorMap<TmdbChangeItem>> = LazyLock::new(|| {
    DiscriminatorMap::new(
        "action",
        AbsentPolicy::Fallback(|v| from_value(v).map(TmdbChangeItem::Untyped)),
    )
    .variant("added", |v| from_value(v).map(TmdbChangeItem::Added))
    .variant("created", |v| from_value(v).map(TmdbChangeItem::Created))
    .variant("updated", |v| from_value(v).map(TmdbChangeItem::Updated))
    .variant("deleted", |v| from_value(v).map(TmdbChangeItem::Deleted))
    .variant("destroyed", |v| from_value(v).map(TmdbChangeItem::Destroyed))
});

impl_union!(TmdbChangeItem, CHANGE_ITEM);

impl TmdbChangeItem {
    /// Shared fields.
    #[must_use]
    pub const fn base(&self) -> &TmdbChangeItemBase {
        match self {
            Self::Added(item) => &item.base,
            Self::Created(item) => &item.base,
            Self::Updated(item) => &item.base,
            Self::Deleted(item) => &item.base,
            Self::Destroyed(item) => &item.base,
            Self::Untyped(base) => base,
        }
    }

    /// Action as populated from the wire.
    #[must_use]
    pub const fn action(&self) -> ChangeAction {
        self.base().action
    }
}
