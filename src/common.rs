//! Tag scheme shared between encoder and decoder

/// One-byte record tag identifying a record's variant and payload layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Object = 0,
    Array = 1,
    String = 2,
    Uint8 = 3,
    Int8 = 4,
    Uint16 = 5,
    Int16 = 6,
    Uint32 = 7,
    Int32 = 8,
    Uint64 = 9,
    Int64 = 10,
    Float = 11,
    Bool = 12,
    Null = 13,
}

impl Tag {
    /// Returns the wire byte for this tag
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Maps a wire byte back to a tag, `None` for bytes outside the 14 defined tags
    pub fn from_byte(byte: u8) -> Option<Tag> {
        let tag = match byte {
            0 => Tag::Object,
            1 => Tag::Array,
            2 => Tag::String,
            3 => Tag::Uint8,
            4 => Tag::Int8,
            5 => Tag::Uint16,
            6 => Tag::Int16,
            7 => Tag::Uint32,
            8 => Tag::Int32,
            9 => Tag::Uint64,
            10 => Tag::Int64,
            11 => Tag::Float,
            12 => Tag::Bool,
            13 => Tag::Null,
            _ => return None,
        };
        Some(tag)
    }

    /// Whether this tag may introduce a size record (object/array count, string length)
    pub(crate) fn is_size_tag(self) -> bool {
        matches!(
            self,
            Tag::Uint8 | Tag::Int8 | Tag::Uint16 | Tag::Int16 | Tag::Int32
        )
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_bytes_are_stable() {
        assert_eq!(Tag::Object.as_byte(), 0);
        assert_eq!(Tag::Uint8.as_byte(), 3);
        assert_eq!(Tag::Int8.as_byte(), 4);
        assert_eq!(Tag::Uint64.as_byte(), 9);
        assert_eq!(Tag::Int64.as_byte(), 10);
        assert_eq!(Tag::Null.as_byte(), 13);
    }

    #[test]
    fn test_every_defined_byte_maps_back() {
        for byte in 0u8..=13 {
            let tag = Tag::from_byte(byte).unwrap();
            assert_eq!(tag.as_byte(), byte);
        }
    }

    #[test]
    fn test_undefined_bytes_rejected() {
        assert_eq!(Tag::from_byte(14), None);
        assert_eq!(Tag::from_byte(0x7f), None);
        assert_eq!(Tag::from_byte(u8::MAX), None);
    }

    #[test]
    fn test_size_tags() {
        let size_tags: Vec<Tag> = (0u8..=13)
            .filter_map(Tag::from_byte)
            .filter(|t| t.is_size_tag())
            .collect();
        assert_eq!(
            size_tags,
            vec![Tag::Uint8, Tag::Int8, Tag::Uint16, Tag::Int16, Tag::Int32]
        );
    }
}
