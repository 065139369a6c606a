//! PNM magic-number detection.
//!
//! Only [`PnmMagic::P5`] is decoded. The other variants are recognized so
//! that rejections can say what the file actually was.

/// The two-byte magic numbers of the PNM family.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmMagic {
    /// PBM, ASCII.
    P1,
    /// PGM, ASCII.
    P2,
    /// PPM, ASCII.
    P3,
    /// PBM, binary.
    P4,
    /// PGM, binary. The only variant this crate reads and writes.
    P5,
    /// PPM, binary.
    P6,
    /// PAM.
    P7,
}

impl PnmMagic {
    /// The magic token this crate accepts.
    pub const SUPPORTED: &'static str = "P5";

    /// Detect the variant from the start of a file. Returns `None` if unrecognized.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < 2 || data[0] != b'P' {
            return None;
        }
        match data[1] {
            b'1' => Some(Self::P1),
            b'2' => Some(Self::P2),
            b'3' => Some(Self::P3),
            b'4' => Some(Self::P4),
            b'5' => Some(Self::P5),
            b'6' => Some(Self::P6),
            b'7' => Some(Self::P7),
            _ => None,
        }
    }

    /// Match a whole whitespace-delimited token, e.g. `b"P5"`.
    ///
    /// Unlike [`detect`](Self::detect), trailing bytes make the token unrecognized.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        if token.len() != 2 {
            return None;
        }
        Self::detect(token)
    }

    /// Whether the decoder accepts this variant.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::P5)
    }

    /// Whether the raster is stored as ASCII decimals.
    pub fn is_ascii(self) -> bool {
        matches!(self, Self::P1 | Self::P2 | Self::P3)
    }

    /// The magic token, e.g. `"P5"`.
    pub fn token(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
            Self::P5 => "P5",
            Self::P6 => "P6",
            Self::P7 => "P7",
        }
    }

    /// Whether `ext` is a file extension used for binary graymaps (case-insensitive).
    pub fn is_pgm_extension(ext: &str) -> bool {
        ext.eq_ignore_ascii_case("pgm") || ext.eq_ignore_ascii_case("pnm")
    }
}

impl core::fmt::Display for PnmMagic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::P1 => "PBM ASCII",
            Self::P2 => "PGM ASCII",
            Self::P3 => "PPM ASCII",
            Self::P4 => "PBM binary",
            Self::P5 => "PGM binary",
            Self::P6 => "PPM binary",
            Self::P7 => "PAM",
        })
    }
}
