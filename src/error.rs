use std::error::Error;
use std::fmt;

/// Rejections that can happen while loading a cartridge image, before the
/// CPU is ever started. Mirrors the distinction `nespy`'s loader draws
/// between `InvalidROM` and `UnsupportedMapper`: these are user-facing,
/// recoverable conditions, never a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    /// The image didn't start with the 4-byte "NES\x1A" magic.
    InvalidMagic,
    /// The mapper number in the header isn't NROM (mapper 0).
    UnsupportedMapper(u8),
    /// The header promised more PRG-ROM than the file actually contains.
    TruncatedPrg { expected: usize, actual: usize },
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CartridgeError::InvalidMagic => {
                write!(f, "not an iNES image: missing \"NES\\x1A\" magic")
            }
            CartridgeError::UnsupportedMapper(mapper) => {
                write!(f, "unsupported mapper {}, only NROM (0) is implemented", mapper)
            }
            CartridgeError::TruncatedPrg { expected, actual } => write!(
                f,
                "PRG-ROM truncated: header promised {} bytes, file has {}",
                expected, actual
            ),
        }
    }
}

impl Error for CartridgeError {}
