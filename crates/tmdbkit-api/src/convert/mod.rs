//! Serde converters for TMDb's irregular JSON shapes.
//!
//! - [`wire_enum`]: enum ⇄ wire-string tables, cached per enum type.
//! - [`tolerant`]: null-as-default numbers/booleans, lenient partial dates,
//!   strict `yyyy-MM-dd HH:mm:ss UTC` timestamps.
//! - [`union`]: discriminator-driven dispatch for polymorphic objects.
//! - [`rated`]: the `rated: false | {"value": n}` shape.
//! - [`tolerant_enum`]: enum fields that fall back instead of failing.

mod error;
pub mod rated;
pub mod tolerant;
pub mod tolerant_enum;
pub mod union;
pub mod wire_enum;

pub use error::ConvertError;
pub use union::{AbsentPolicy, Constructor, DiscriminatorMap, Union, WireKey};
pub use wire_enum::{
    EnumTable, Member, WireEnum, WireName, code_for, string_for, value_for, value_for_code,
};
