use crate::error::{QuadTreeError, Result};
use std::fmt;
use std::sync::Arc;

const DIGITS: [char; 4] = ['0', '1', '2', '3'];

/// Rewrites quadkey digits into another alphabet.
///
/// Codes from different encodings (spatial views, time windows) can be
/// shifted into disjoint vocabularies so a downstream tokenizer never
/// confuses them.
#[derive(Clone, Default)]
pub enum CharShift {
    #[default]
    Identity,
    /// Shift every digit by a fixed number of code points.
    Offset(u32),
    Custom(Arc<dyn Fn(char) -> char + Send + Sync>),
}

impl CharShift {
    /// Shift `'0'..='3'` by `offset` code points.
    ///
    /// ```rust
    /// use quadtok::encoder::CharShift;
    ///
    /// let shift = CharShift::offset(49)?; // '0' -> 'a'
    /// assert_eq!(shift.apply("0312"), "adbc");
    /// # Ok::<(), quadtok::QuadTreeError>(())
    /// ```
    pub fn offset(offset: u32) -> Result<Self> {
        for digit in DIGITS {
            if (digit as u32).checked_add(offset).and_then(char::from_u32).is_none() {
                return Err(QuadTreeError::InvalidConfiguration(format!(
                    "shifting {:?} by {} does not yield a valid character",
                    digit, offset
                )));
            }
        }
        Ok(CharShift::Offset(offset))
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(char) -> char + Send + Sync + 'static,
    {
        CharShift::Custom(Arc::new(f))
    }

    pub fn shift_char(&self, c: char) -> char {
        match self {
            CharShift::Identity => c,
            CharShift::Offset(offset) => (c as u32)
                .checked_add(*offset)
                .and_then(char::from_u32)
                .unwrap_or(c),
            CharShift::Custom(f) => f(c),
        }
    }

    pub fn apply(&self, code: &str) -> String {
        match self {
            CharShift::Identity => code.to_string(),
            _ => code.chars().map(|c| self.shift_char(c)).collect(),
        }
    }
}

impl fmt::Debug for CharShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharShift::Identity => f.write_str("Identity"),
            CharShift::Offset(offset) => f.debug_tuple("Offset").field(offset).finish(),
            CharShift::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
