//! # jsonb_rs
//!
//! A compact, type-tagged binary encoding for JSON documents.
//!
//! Every record starts with a one-byte tag. Integers are packed into the
//! narrowest of 1, 2, 4 or 8 bytes, floats are stored as 32-bit IEEE-754,
//! strings and containers carry their length as a nested integer record.
//! Object key order is preserved. Fixed-width fields use native byte order,
//! so encoded files are not portable across hosts of differing endianness.
//!
//! Floats are narrowed to `f32` on the way in; this loss of precision is part
//! of the format.
//!
//! ## Example
//!
//! ```rust
//! use jsonb_rs::{decode, encode, Document, Value};
//!
//! let doc = Document::load_from_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! let bytes = doc.to_binary().to_vec();
//!
//! let reloaded = Document::load_from_binary(&bytes).unwrap();
//! assert_eq!(reloaded.root().get("age"), Some(&Value::Integer(30)));
//!
//! // The codec also works on bare value trees
//! let value = Value::Array(vec![Value::Integer(200), Value::Null]);
//! assert_eq!(decode(&encode(&value)).unwrap(), value);
//! ```

mod common;
mod decoder;
mod document;
mod encoder;
mod error;
mod value;

// Re-export public API
pub use common::Tag;
pub use decoder::{decode, decode_with_options, DecoderOptions};
pub use document::Document;
pub use encoder::encode;
pub use error::{DecodeError, Error};
pub use value::{Map, Value};
