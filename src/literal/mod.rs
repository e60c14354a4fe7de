pub mod pattern;

pub use pattern::{
    escape_bounding_quotes, ConstantPattern, LiteralMatch, BOUNDING_QUOTE, DEFAULT_IDENTIFIER,
    ESCAPE_MARKER,
};
