//! Request extractors shared by handlers.

pub mod validated_json;

pub use validated_json::ValidatedJson;
