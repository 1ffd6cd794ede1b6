use serde::{Deserialize, Serialize};

/// PNG: 0x89 'P' 'N' 'G' 0x0D 0x0A 0x1A 0x0A
pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// GIF89a
pub const GIF_MAGIC: [u8; 6] = *b"GIF89a";

/// PDF 1.4 header line
pub const PDF_MAGIC: [u8; 9] = *b"%PDF-1.4\n";

/// Zero filler following the magic bytes in a signature zone
pub const DEFAULT_SIGNATURE_FILLER: usize = 1024;

/// File-type signatures a corpus can open with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    Png,
    Gif,
    Pdf,
}

impl Signature {
    pub const ALL: [Signature; 3] = [Signature::Png, Signature::Gif, Signature::Pdf];

    /// Magic preamble bytes
    pub fn magic(self) -> &'static [u8] {
        match self {
            Self::Png => &PNG_MAGIC,
            Self::Gif => &GIF_MAGIC,
            Self::Pdf => &PDF_MAGIC,
        }
    }

    /// Short type name reported by detectors
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Pdf => "PDF",
        }
    }

    /// Byte-exact prefix check
    pub fn matches(self, data: &[u8]) -> bool {
        data.starts_with(self.magic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic_is_eight_bytes() {
        assert_eq!(Signature::Png.magic().len(), 8);
        assert_eq!(Signature::Png.magic(), b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_matches_requires_full_prefix() {
        assert!(Signature::Png.matches(b"\x89PNG\r\n\x1a\n\x00\x00"));
        assert!(!Signature::Png.matches(b"\x89PNG\r\n"));
        assert!(!Signature::Gif.matches(b"GIF87a"));
        assert!(Signature::Pdf.matches(b"%PDF-1.4\nrest"));
    }
}
