//! Value tree to binary encoder implementation

use crate::common::Tag;
use crate::value::{Map, Value};

/// Encode a value tree to its binary form
///
/// Never fails: every tree has an encoding. Integers are packed into the
/// narrowest tag their range allows, floats are written as 4-byte `f32`.
///
/// Nesting is not limited here: the walk recurses once per object/array
/// level, so a hand-built tree thousands of levels deep can exhaust the
/// stack. Trees parsed by `serde_json` stop at 128 levels, and decoding is
/// bounded by [`DecoderOptions::max_depth`](crate::DecoderOptions).
pub fn encode(value: &Value) -> Vec<u8> {
    let mut encoder = Encoder::new();
    encoder.encode_value(value);
    encoder.output
}

struct Encoder {
    output: Vec<u8>,
}

impl Encoder {
    fn new() -> Self {
        Self { output: Vec::new() }
    }

    /// Tag dispatch over the value variants
    fn encode_value(&mut self, value: &Value) {
        match value {
            Value::Object(map) => self.write_object(map),
            Value::Array(items) => self.write_array(items),
            Value::String(s) => self.write_string(s),
            Value::Integer(i) => self.write_integer(*i),
            Value::UnsignedInteger(u) => self.write_unsigned(*u),
            Value::Float(f) => self.write_float(*f),
            Value::Bool(b) => self.write_bool(*b),
            Value::Null => self.write_tag(Tag::Null),
        }
    }

    fn write_object(&mut self, map: &Map) {
        self.write_tag(Tag::Object);
        self.write_size(map.len());

        for (key, value) in map {
            self.write_string(key);
            self.encode_value(value);
        }
    }

    fn write_array(&mut self, items: &[Value]) {
        self.write_tag(Tag::Array);
        self.write_size(items.len());

        for item in items {
            self.encode_value(item);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.write_tag(Tag::String);
        self.write_size(s.len());
        self.output.extend_from_slice(s.as_bytes());
    }

    /// Counts and lengths go through the same packing as integer values.
    ///
    /// Sizes above `i32::MAX` pack to tags the decoder refuses as sizes.
    fn write_size(&mut self, size: usize) {
        self.write_integer(i64::try_from(size).unwrap_or(i64::MAX));
    }

    /// Numeric packer for signed integers.
    ///
    /// The range split is asymmetric: `[-128, 127]` is Int8, `[128, 255]`
    /// is Uint8, and Int16 then covers both `[-32768, -129]` and
    /// `[256, 32767]`. The same pattern repeats at 16 and 32 bits. Existing
    /// encoded files depend on this exact partition.
    fn write_integer(&mut self, i: i64) {
        if (-128..=127).contains(&i) {
            self.write_tag(Tag::Int8);
            self.output.extend_from_slice(&(i as i8).to_ne_bytes());
        } else if (128..=255).contains(&i) {
            self.write_tag(Tag::Uint8);
            self.output.extend_from_slice(&(i as u8).to_ne_bytes());
        } else if (-32768..=32767).contains(&i) {
            self.write_tag(Tag::Int16);
            self.output.extend_from_slice(&(i as i16).to_ne_bytes());
        } else if (32768..=65535).contains(&i) {
            self.write_tag(Tag::Uint16);
            self.output.extend_from_slice(&(i as u16).to_ne_bytes());
        } else if (-2147483648..=2147483647).contains(&i) {
            self.write_tag(Tag::Int32);
            self.output.extend_from_slice(&(i as i32).to_ne_bytes());
        } else if (2147483648..=4294967295).contains(&i) {
            self.write_tag(Tag::Uint32);
            self.output.extend_from_slice(&(i as u32).to_ne_bytes());
        } else {
            self.write_tag(Tag::Int64);
            self.output.extend_from_slice(&i.to_ne_bytes());
        }
    }

    /// Unsigned values are never narrowed
    fn write_unsigned(&mut self, u: u64) {
        self.write_tag(Tag::Uint64);
        self.output.extend_from_slice(&u.to_ne_bytes());
    }

    fn write_float(&mut self, f: f32) {
        self.write_tag(Tag::Float);
        self.output.extend_from_slice(&f.to_ne_bytes());
    }

    fn write_bool(&mut self, b: bool) {
        self.write_tag(Tag::Bool);
        self.output.push(u8::from(b));
    }

    #[inline]
    fn write_tag(&mut self, tag: Tag) {
        self.output.push(tag.as_byte());
    }
}
