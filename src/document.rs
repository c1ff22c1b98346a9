//! A loaded document holding both the value tree and its binary form

use crate::decoder::{decode_with_options, DecoderOptions};
use crate::encoder::encode;
use crate::error::Error;
use crate::value::Value;
use tracing::debug;

/// One JSON document, loaded from text or from binary.
///
/// Both forms are kept: the value tree for printing and the encoded bytes
/// for storage. Loading from binary keeps a copy of the input bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
    binary: Vec<u8>,
}

impl Document {
    /// Parse JSON text and encode it
    pub fn load_from_json(text: &str) -> Result<Self, Error> {
        let root: Value = serde_json::from_str(text)?;
        let document = Self::from_value(root);
        debug!(
            text_len = text.len(),
            binary_len = document.binary.len(),
            "loaded document from json"
        );
        Ok(document)
    }

    /// Decode a binary buffer with default options
    pub fn load_from_binary(bytes: &[u8]) -> Result<Self, Error> {
        Self::load_from_binary_with_options(bytes, &DecoderOptions::default())
    }

    pub fn load_from_binary_with_options(
        bytes: &[u8],
        options: &DecoderOptions,
    ) -> Result<Self, Error> {
        let root = decode_with_options(bytes, options)?;
        debug!(
            binary_len = bytes.len(),
            strict = options.strict,
            "loaded document from binary"
        );
        Ok(Self {
            root,
            binary: bytes.to_vec(),
        })
    }

    /// Wrap an existing value tree, encoding it immediately
    pub fn from_value(root: Value) -> Self {
        let binary = encode(&root);
        Self { root, binary }
    }

    /// Pretty-printed JSON text of the value tree
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn to_binary(&self) -> &[u8] {
        &self.binary
    }

    pub fn binary_size(&self) -> usize {
        self.binary.len()
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_key_float_scenario() {
        let doc = Document::load_from_json(r#"{"key" : 0.123}"#).unwrap();
        let reloaded = Document::load_from_binary(doc.to_binary()).unwrap();

        let json = reloaded.to_json().unwrap();
        let printed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let key = printed["key"].as_f64().unwrap();
        assert_eq!(key as f32, 0.123f32);
        assert_eq!(json, "{\n  \"key\": 0.123\n}");
    }

    #[test]
    fn test_binary_size_for_key_float() {
        // object header, key record, float record
        let doc = Document::load_from_json(r#"{"key": 0.123}"#).unwrap();
        assert_eq!(doc.binary_size(), 3 + 6 + 5);
    }

    #[test]
    fn test_parse_error() {
        let err = Document::load_from_json("{\"key\": }").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_empty_binary_rejected() {
        let err = Document::load_from_binary(&[]).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_binary_is_kept_verbatim() {
        let bytes = [1, 4, 2, 3, 200, 13];
        let doc = Document::load_from_binary(&bytes).unwrap();
        assert_eq!(doc.to_binary(), &bytes);
        assert_eq!(
            doc.root(),
            &Value::Array(vec![Value::Integer(200), Value::Null])
        );
        assert_eq!(
            doc.into_root(),
            Value::Array(vec![Value::Integer(200), Value::Null])
        );
    }

    #[test]
    fn test_lenient_load() {
        let options = DecoderOptions {
            strict: false,
            ..DecoderOptions::default()
        };
        let doc = Document::load_from_binary_with_options(&[13, 0xff], &options).unwrap();
        assert!(doc.root().is_null());
        assert_eq!(doc.to_json().unwrap(), "null");
    }
}
