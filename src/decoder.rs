//! Binary to value tree decoder implementation

use crate::common::Tag;
use crate::error::DecodeError;
use crate::value::{Map, Value};
use tracing::warn;

/// Upper bound on slots reserved for a container before its elements are read
const MAX_PREALLOCATED_ITEMS: usize = 256;

/// Decoder configuration options
#[derive(Debug, Clone)]
pub struct DecoderOptions {
    /// Strict mode - rejects bool payloads other than 0/1 and trailing bytes (default: true)
    pub strict: bool,
    /// Maximum nesting of objects and arrays (default: 512)
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: 512,
        }
    }
}

/// Decode a binary buffer with default options
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with_options(input, &DecoderOptions::default())
}

/// Decode a binary buffer back to a value tree
pub fn decode_with_options(input: &[u8], options: &DecoderOptions) -> Result<Value, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let mut decoder = Decoder::new(input, options);
    decoder.decode()
}

struct Decoder<'a> {
    data: &'a [u8],
    options: &'a DecoderOptions,
    pos: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], options: &'a DecoderOptions) -> Self {
        Self {
            data,
            options,
            pos: 0,
            depth: 0,
        }
    }

    fn decode(&mut self) -> Result<Value, DecodeError> {
        let root = self.read_value()?;

        let remaining = self.remaining_len();
        if remaining > 0 {
            if self.options.strict {
                return Err(DecodeError::TrailingBytes {
                    offset: self.pos,
                    remaining,
                });
            }
            warn!(offset = self.pos, remaining, "ignoring trailing bytes after root record");
        }

        Ok(root)
    }

    /// Reads one full record: tag byte then payload
    fn read_value(&mut self) -> Result<Value, DecodeError> {
        let tag = self.read_tag()?;
        match tag {
            Tag::Object => self.read_object(),
            Tag::Array => self.read_array(),
            Tag::String => self.read_string_payload().map(Value::String),
            Tag::Uint64 => {
                let bytes = self.read_fixed::<8>("uint64")?;
                Ok(Value::UnsignedInteger(u64::from_ne_bytes(bytes)))
            }
            Tag::Float => {
                let bytes = self.read_fixed::<4>("float")?;
                Ok(Value::Float(f32::from_ne_bytes(bytes)))
            }
            Tag::Bool => self.read_bool(),
            Tag::Null => Ok(Value::Null),
            Tag::Uint8 | Tag::Int8 | Tag::Uint16 | Tag::Int16 | Tag::Uint32 | Tag::Int32
            | Tag::Int64 => self.read_signed(tag).map(Value::Integer),
        }
    }

    fn read_object(&mut self) -> Result<Value, DecodeError> {
        self.enter()?;
        let count = self.read_size()?;
        let mut map = Map::with_capacity(self.capacity_hint(count));

        for _ in 0..count {
            let offset = self.pos;
            let byte = self.read_byte("object key tag")?;
            match Tag::from_byte(byte) {
                Some(Tag::String) => {}
                Some(_) => return Err(DecodeError::InvalidKeyTag { tag: byte, offset }),
                None => return Err(DecodeError::UnknownTag { tag: byte, offset }),
            }
            let key = self.read_string_payload()?;
            let value = self.read_value()?;
            map.insert(key, value);
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn read_array(&mut self) -> Result<Value, DecodeError> {
        self.enter()?;
        let count = self.read_size()?;
        let mut items = Vec::with_capacity(self.capacity_hint(count));

        for _ in 0..count {
            items.push(self.read_value()?);
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Length record then raw UTF-8; the string tag is already consumed
    fn read_string_payload(&mut self) -> Result<String, DecodeError> {
        let len = self.read_size()?;
        let offset = self.pos;
        let bytes = self.read_bytes(len, "string")?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Reads a size record.
    ///
    /// Only Uint8/Int8/Uint16/Int16/Int32 may carry a size.
    fn read_size(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let tag = self.read_tag()?;
        if !tag.is_size_tag() {
            return Err(DecodeError::InvalidSizeTag {
                tag: tag.as_byte(),
                offset,
            });
        }
        let size = self.read_signed(tag)?;
        usize::try_from(size).map_err(|_| DecodeError::NegativeSize { size, offset })
    }

    /// Fixed-width integer payload, widened to i64
    fn read_signed(&mut self, tag: Tag) -> Result<i64, DecodeError> {
        let value = match tag {
            Tag::Uint8 => u8::from_ne_bytes(self.read_fixed("uint8")?) as i64,
            Tag::Int8 => i8::from_ne_bytes(self.read_fixed("int8")?) as i64,
            Tag::Uint16 => u16::from_ne_bytes(self.read_fixed("uint16")?) as i64,
            Tag::Int16 => i16::from_ne_bytes(self.read_fixed("int16")?) as i64,
            Tag::Uint32 => u32::from_ne_bytes(self.read_fixed("uint32")?) as i64,
            Tag::Int32 => i32::from_ne_bytes(self.read_fixed("int32")?) as i64,
            Tag::Int64 => i64::from_ne_bytes(self.read_fixed("int64")?),
            _ => unreachable!("read_signed called with non-integer tag {tag}"),
        };
        Ok(value)
    }

    fn read_bool(&mut self) -> Result<Value, DecodeError> {
        let offset = self.pos;
        let byte = self.read_byte("bool")?;
        match byte {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            _ if self.options.strict => Err(DecodeError::InvalidBool {
                value: byte,
                offset,
            }),
            _ => Ok(Value::Bool(false)),
        }
    }

    fn read_tag(&mut self) -> Result<Tag, DecodeError> {
        let offset = self.pos;
        let byte = self.read_byte("tag")?;
        Tag::from_byte(byte).ok_or(DecodeError::UnknownTag { tag: byte, offset })
    }

    /// Declared counts are untrusted: every element takes at least one
    /// byte, and no level reserves more than a fixed number of slots.
    fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.remaining_len()).min(MAX_PREALLOCATED_ITEMS)
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                max: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    // Cursor primitives

    fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let [byte] = self.read_fixed::<1>(context)?;
        Ok(byte)
    }

    #[inline]
    fn read_fixed<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, context)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    #[inline]
    fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::TruncatedInput {
                context,
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}
