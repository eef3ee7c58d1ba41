pub mod if_match;
pub mod validated_json;

pub use if_match::IfMatch;
pub use validated_json::ValidatedJson;
