//! Quadkey addressing of quadtree nodes.
//!
//! A [`QuadKey`] names a node by its level of detail and its integer grid
//! position at that level. Its string form has one digit per level, most
//! significant level first: bit `i` of `x` contributes 1 and bit `i` of `y`
//! contributes 2 to the digit for level `lod - i`.
//!
//! ```rust
//! use quadtok::QuadKey;
//!
//! let key = QuadKey::new(2, 2, 1)?;
//! assert_eq!(key.encode(), "12");
//! assert_eq!(QuadKey::decode("12")?, key);
//! # Ok::<(), quadtok::QuadTreeError>(())
//! ```

use crate::error::{QuadTreeError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Position of a child relative to its parent.
///
/// Declaration order is the order in which quadrants are split and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    BottomLeft,
    TopLeft,
    BottomRight,
    TopRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::TopLeft,
        Quadrant::BottomRight,
        Quadrant::TopRight,
    ];

    /// Grid offset `(dx, dy)` of this quadrant inside its parent cell.
    pub const fn offset(self) -> (u64, u64) {
        match self {
            Quadrant::BottomLeft => (0, 0),
            Quadrant::TopLeft => (0, 1),
            Quadrant::BottomRight => (1, 0),
            Quadrant::TopRight => (1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadKey {
    lod: u32,
    x: u64,
    y: u64,
}

impl QuadKey {
    /// Deepest level a key can address.
    pub const MAX_LOD: u32 = 63;

    /// The key of the root node; encodes to the empty string.
    pub const fn root() -> Self {
        Self { lod: 0, x: 0, y: 0 }
    }

    /// Create a key, checking that `x` and `y` fit in `lod` bits.
    pub fn new(lod: u32, x: u64, y: u64) -> Result<Self> {
        if lod > Self::MAX_LOD || x >> lod != 0 || y >> lod != 0 {
            return Err(QuadTreeError::InvalidKey { lod, x, y });
        }
        Ok(Self { lod, x, y })
    }

    pub fn lod(&self) -> u32 {
        self.lod
    }

    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn y(&self) -> u64 {
        self.y
    }

    pub fn is_root(&self) -> bool {
        self.lod == 0
    }

    /// Key of the given child one level deeper.
    ///
    /// Equals `floor(origin / size)` of the child quadrant's rectangle when
    /// the root region is split as in [`quadtok_types::rect::Rect::quadrants`].
    pub fn child(&self, quadrant: Quadrant) -> Result<Self> {
        let (dx, dy) = quadrant.offset();
        Self::new(self.lod + 1, (self.x << 1) | dx, (self.y << 1) | dy)
    }

    /// Key of the enclosing node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            lod: self.lod - 1,
            x: self.x >> 1,
            y: self.y >> 1,
        })
    }

    pub fn encode(&self) -> String {
        (0..self.lod)
            .rev()
            .map(|bit| {
                let digit = ((self.x >> bit) & 1) | (((self.y >> bit) & 1) << 1);
                char::from(b'0' + digit as u8)
            })
            .collect()
    }

    /// Inverse of [`QuadKey::encode`].
    ///
    /// Fails with [`QuadTreeError::InvalidEncoding`] on any character other
    /// than `'0'`, `'1'`, `'2'` or `'3'`.
    pub fn decode(code: &str) -> Result<Self> {
        let lod = code.chars().count();
        if lod > Self::MAX_LOD as usize {
            return Err(QuadTreeError::InvalidKey {
                lod: u32::try_from(lod).unwrap_or(u32::MAX),
                x: 0,
                y: 0,
            });
        }

        let mut x = 0u64;
        let mut y = 0u64;
        for (position, ch) in code.chars().enumerate() {
            let bit = lod - 1 - position;
            let (x_bit, y_bit) = match ch {
                '0' => (0, 0),
                '1' => (1, 0),
                '2' => (0, 1),
                '3' => (1, 1),
                found => {
                    return Err(QuadTreeError::InvalidEncoding {
                        code: code.to_string(),
                        position,
                        found,
                    });
                }
            };
            x |= x_bit << bit;
            y |= y_bit << bit;
        }

        Ok(Self {
            lod: lod as u32,
            x,
            y,
        })
    }
}

impl Default for QuadKey {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for QuadKey {
    type Err = QuadTreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for QuadKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for QuadKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::decode(&code).map_err(serde::de::Error::custom)
    }
}
