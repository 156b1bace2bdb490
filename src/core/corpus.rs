/// Corpus character streams consumed by the trainer.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::Chars;

/// A sequential source of corpus characters.
///
/// The trainer only ever asks whether more characters remain and pulls the
/// next one; where the characters come from is up to the implementor.
pub trait CharSource {
    /// Whether at least one more character can be read.
    fn has_more(&mut self) -> io::Result<bool>;

    /// Read the next character, or `None` once the source is exhausted.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// In-memory corpus backed by a string slice.
pub struct StrSource<'a> {
    chars: std::iter::Peekable<Chars<'a>>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn has_more(&mut self) -> io::Result<bool> {
        Ok(self.chars.peek().is_some())
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Streaming corpus that decodes UTF-8 from any buffered reader.
///
/// Characters are decoded one at a time so arbitrarily large corpora never
/// have to be held in memory. Malformed UTF-8 surfaces as an
/// [`io::ErrorKind::InvalidData`] error.
pub struct ReaderSource<R> {
    reader: R,
    peeked: Option<char>,
}

impl ReaderSource<BufReader<File>> {
    /// Open a corpus file for streaming.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()?.first() {
            Some(&b) => b,
            None => return Ok(None),
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }

    fn decode_next(&mut self) -> io::Result<Option<char>> {
        let lead = match self.next_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let width = utf8_width(lead).ok_or_else(|| invalid_utf8(lead))?;
        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated UTF-8 sequence")
            })?;
        }

        let decoded = std::str::from_utf8(&buf[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(decoded.chars().next())
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn has_more(&mut self) -> io::Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.decode_next()?;
        }
        Ok(self.peeked.is_some())
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(c) => Ok(Some(c)),
            None => self.decode_next(),
        }
    }
}

/// Encoded length of a UTF-8 sequence from its leading byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(lead: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 leading byte 0x{:02X}", lead),
    )
}
