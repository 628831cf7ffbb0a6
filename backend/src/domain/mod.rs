//! Domain primitives and aggregates.
//!
//! Strongly typed catalog entities used by the API and persistence layers.
//! Types are immutable once constructed; invariants are enforced by the
//! draft-to-entity conversions in each module.

pub mod catalog;
pub mod error;
pub mod locale;
pub mod ports;
pub(crate) mod slug;

pub use self::catalog::{
    Application, ApplicationDraft, ApplicationFilter, ApplicationFilterDraft,
    CatalogValidationError, NewApplication, NewApplicationDraft, NewTag, NewTagDraft, OrderField,
    Ordering, PlatformSupport, PlatformSupportDraft, Screenshot, ScreenshotDraft, Tag, TagDraft,
    TagKind, TagRef,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::locale::{Locale, TranslatedText};
