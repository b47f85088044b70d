//! Pure data structures (DTOs) for the documents the booking service stores.
//!
//! Each document type implements [`ActorEntity`](actor_framework::ActorEntity)
//! in its actor module; this module only holds the shapes that travel over
//! HTTP and between actors.

pub mod lesson;
pub mod order;

pub use lesson::*;
pub use order::*;

use thiserror::Error;

/// An identifier string that does not name a document of the expected kind.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Malformed identifier: {0:?}")]
pub struct IdParseError(pub String);

/// Declares a numeric document id that renders as `<prefix>_<n>`.
///
/// The actor mints the number; the text form is what clients see in `_id`
/// fields and URL paths.
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                Self(n)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix(concat!($prefix, "_"))
                    .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|n| n.parse().ok())
                    .map(Self)
                    .ok_or_else(|| IdParseError(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }
    };
}

document_id!(
    /// Identifier of a lesson in the catalog, e.g. `lesson_3`.
    LessonId,
    "lesson"
);

document_id!(
    /// Identifier of a placed order, e.g. `order_12`.
    OrderId,
    "order"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_with_their_prefix() {
        assert_eq!(LessonId(3).to_string(), "lesson_3");
        assert_eq!(OrderId(12).to_string(), "order_12");
    }

    #[test]
    fn ids_parse_only_their_own_prefix() {
        assert_eq!("lesson_7".parse::<LessonId>(), Ok(LessonId(7)));
        assert!("order_7".parse::<LessonId>().is_err());
        assert!("lesson_".parse::<LessonId>().is_err());
        assert!("lesson_-1".parse::<LessonId>().is_err());
        assert!("lesson_+1".parse::<LessonId>().is_err());
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn ids_serialize_as_strings() {
        let json = serde_json::to_string(&LessonId(4)).unwrap();
        assert_eq!(json, r#""lesson_4""#);
        let back: LessonId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LessonId(4));
        assert!(serde_json::from_str::<LessonId>("4").is_err());
    }
}
