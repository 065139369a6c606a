//! P5 header parsing and writing.
//!
//! Two readers are provided:
//!
//! - [`HeaderStyle::Legacy`]: a permissive fixed-line layout. After the `P5`
//!   token it skips the rest of that line and one more line unconditionally,
//!   reads width and height, then skips the maxval field. Line skips are capped at [`SKIP_LIMIT`] bytes where the
//!   layout says so. Nothing skipped is validated.
//! - [`HeaderStyle::Netpbm`]: the Netpbm grammar, with `#` comments between
//!   tokens, a validated maxval and exactly one whitespace byte before the
//!   raster.

use std::io::{self, Write};

use log::{debug, warn};

use crate::buffer::Dimensions;
use crate::error::{FormatError, PgmError};
use crate::format::PnmMagic;

/// Upper bound on bytes consumed by a capped line skip.
pub const SKIP_LIMIT: usize = 256;

/// Longest magic token echoed back in an error message.
const MAX_ECHOED_TOKEN: usize = 16;

/// Which header grammar the decoder applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeaderStyle {
    /// Magic line, one freeform skip line, dimensions, maxval skip.
    #[default]
    Legacy,
    /// Standard Netpbm P5 header.
    Netpbm,
}

impl core::fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::Netpbm => "netpbm",
        })
    }
}

/// A parsed P5 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Image size.
    pub dimensions: Dimensions,
    /// Maximum sample value. `None` for the legacy reader, which skips it.
    pub maxval: Option<u32>,
    /// Grammar the header was read with.
    pub style: HeaderStyle,
    raster_offset: usize,
}

impl Header {
    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8], style: HeaderStyle) -> Result<Self, PgmError> {
        let mut cur = Cursor::new(data);
        let header = match style {
            HeaderStyle::Legacy => parse_legacy(&mut cur)?,
            HeaderStyle::Netpbm => parse_netpbm(&mut cur)?,
        };
        debug!(
            "{style} header: {} maxval={:?} raster at byte {}",
            header.dimensions, header.maxval, header.raster_offset
        );
        Ok(header)
    }

    /// Byte offset of the first raster byte.
    pub fn header_len(&self) -> usize {
        self.raster_offset
    }
}

fn parse_legacy(cur: &mut Cursor<'_>) -> Result<Header, PgmError> {
    check_magic(cur.token())?;

    if !cur.skip_capped_line(SKIP_LIMIT) {
        warn!("magic line longer than {SKIP_LIMIT} bytes, continuing after the cap");
    }
    cur.skip_line();

    let width = cur
        .integer()
        .ok_or_else(|| FormatError::InvalidDimensions("missing or unparsable width".into()))?;
    let height = cur
        .integer()
        .ok_or_else(|| FormatError::InvalidDimensions("missing or unparsable height".into()))?;
    let dimensions = Dimensions::from_signed(width, height)?;

    // maxval either shares the dimensions line or sits on its own line.
    if cur.rest_of_line_is_blank() {
        cur.skip_capped_line(SKIP_LIMIT);
    }
    if !cur.skip_capped_line(SKIP_LIMIT) {
        warn!("maxval line longer than {SKIP_LIMIT} bytes, continuing after the cap");
    }

    Ok(Header {
        dimensions,
        maxval: None,
        style: HeaderStyle::Legacy,
        raster_offset: cur.pos,
    })
}

fn parse_netpbm(cur: &mut Cursor<'_>) -> Result<Header, PgmError> {
    let magic = cur.take(2);
    if magic.len() < 2 {
        return Err(FormatError::TruncatedHeader("missing magic number").into());
    }
    // "P5" must be followed by whitespace or a comment, not more token bytes.
    let joined = cur.peek().is_some_and(|b| !is_space(b) && b != b'#');
    if joined || magic != PnmMagic::SUPPORTED.as_bytes() {
        cur.pos -= 2;
        check_magic(cur.token())?;
    }

    let width = cur.netpbm_field("width")?;
    let height = cur.netpbm_field("height")?;
    let dimensions = Dimensions::from_signed(width as i64, height as i64)?;
    let maxval = cur.netpbm_field("maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(FormatError::UnsupportedMaxval(maxval).into());
    }
    match cur.peek() {
        Some(b) if is_space(b) => cur.pos += 1,
        Some(_) => {
            return Err(FormatError::InvalidDimensions(
                "maxval must be followed by a single whitespace byte".into(),
            )
            .into());
        }
        None => {}
    }

    Ok(Header {
        dimensions,
        maxval: Some(maxval),
        style: HeaderStyle::Netpbm,
        raster_offset: cur.pos,
    })
}

fn check_magic(token: &[u8]) -> Result<(), FormatError> {
    if token.is_empty() {
        return Err(FormatError::TruncatedHeader("missing magic number"));
    }
    if token == PnmMagic::SUPPORTED.as_bytes() {
        return Ok(());
    }
    let shown = &token[..token.len().min(MAX_ECHOED_TOKEN)];
    Err(FormatError::UnsupportedMagic {
        found: String::from_utf8_lossy(shown).into_owned(),
        variant: PnmMagic::from_token(token),
    })
}

/// Write the three-line header `P5`, `{width} {height}`, `255`.
///
/// A comment, when given, goes on its own `# ` line right after the magic.
pub(crate) fn write_header<W: Write>(
    out: &mut W,
    dims: Dimensions,
    comment: Option<&str>,
) -> io::Result<()> {
    out.write_all(b"P5\n")?;
    if let Some(comment) = comment {
        writeln!(out, "# {comment}")?;
    }
    writeln!(out, "{} {}", dims.width(), dims.height())?;
    out.write_all(b"255\n")
}

/// `isspace` in the C locale, which includes vertical tab.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Byte cursor with the skip and token primitives both grammars share.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let end = (self.pos + n).min(self.data.len());
        let out = &self.data[self.pos..end];
        self.pos = end;
        out
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Skip whitespace, then return the following run of non-whitespace bytes.
    fn token(&mut self) -> &'a [u8] {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|b| !is_space(b)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Consume through the next `\n`, at most `limit` bytes.
    ///
    /// Returns `false` if the cap was hit before a newline. Running out of
    /// data counts as reaching the end of the line.
    fn skip_capped_line(&mut self, limit: usize) -> bool {
        let window = &self.data[self.pos..];
        let window = &window[..window.len().min(limit)];
        match window.iter().position(|&b| b == b'\n') {
            Some(i) => {
                self.pos += i + 1;
                true
            }
            None => {
                self.pos += window.len();
                window.len() < limit
            }
        }
    }

    /// Consume through the next `\n` with no cap.
    fn skip_line(&mut self) {
        self.skip_capped_line(usize::MAX);
    }

    /// Whether only spaces/tabs/CR remain before the next `\n`.
    fn rest_of_line_is_blank(&self) -> bool {
        self.data[self.pos..]
            .iter()
            .take_while(|&&b| b != b'\n')
            .all(|&b| matches!(b, b' ' | b'\t' | b'\r'))
    }

    /// Stream-style signed integer: skip whitespace, optional sign, digits.
    ///
    /// Stops at the first non-digit. `None` if no digits or on overflow.
    fn integer(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let digits_start = self.pos;
        let mut value: i64 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
            self.pos += 1;
        }
        if self.pos == digits_start {
            self.pos = start;
            return None;
        }
        Some(if negative { -value } else { value })
    }

    /// Skip whitespace and `#` comments between Netpbm header tokens.
    fn skip_netpbm_separators(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'#') {
                self.skip_line();
            } else {
                return;
            }
        }
    }

    /// Unsigned decimal header field, Netpbm rules.
    fn netpbm_field(&mut self, name: &'static str) -> Result<u32, PgmError> {
        self.skip_netpbm_separators();
        if self.peek().is_none() {
            return Err(FormatError::TruncatedHeader(name).into());
        }
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| FormatError::InvalidDimensions(format!("{name} overflows")))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(FormatError::InvalidDimensions(format!("{name} is not a number")).into());
        }
        Ok(value)
    }
}
