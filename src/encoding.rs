use clap::ValueEnum;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Text encodings the output file can be written in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[default]
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "latin-1")]
    Latin1,
    #[value(name = "ascii")]
    Ascii,
}

/// A character that has no representation in the chosen encoding.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("'{encoding}' codec can't encode character {character:?} in position {position}")]
pub struct EncodeError {
    pub encoding: Encoding,
    pub character: char,
    /// Index in characters, not bytes.
    pub position: usize,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
            Encoding::Ascii => "ascii",
        }
    }

    /// Highest code point the encoding can represent in a single byte.
    fn single_byte_limit(self) -> Option<u32> {
        match self {
            Encoding::Utf8 => None,
            Encoding::Latin1 => Some(0xFF),
            Encoding::Ascii => Some(0x7F),
        }
    }

    /// Encodes `text`, failing on the first character the encoding lacks.
    /// UTF-8 borrows the input as is.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, EncodeError> {
        let limit = match self.single_byte_limit() {
            None => return Ok(Cow::Borrowed(text.as_bytes())),
            Some(l) => l,
        };
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }
        let mut out = Vec::with_capacity(text.len());
        for (position, character) in text.chars().enumerate() {
            let code = u32::from(character);
            if code > limit {
                return Err(EncodeError {
                    encoding: self,
                    character,
                    position,
                });
            }
            out.push(code as u8);
        }
        Ok(Cow::Owned(out))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
