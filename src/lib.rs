//! Quadtree partitioning and quadkey encoding of spatial and temporal data.
//!
//! ## Features
//! - **Quadkeys**: lossless `(lod, x, y)` <-> digit-string encoding
//! - **Quadtree**: threshold- and depth-bounded subdivision of a square region
//! - **Leaf index**: leaf code -> points, for every non-empty leaf
//! - **Encoders**: rotated spatial views and time-window projections turned
//!   into per-entity tokens, optionally shifted into disjoint vocabularies
//!
//! ```rust
//! use quadtok::{Point, QuadKey, QuadTree, TreeConfig};
//!
//! let mut tree = QuadTree::new(TreeConfig::new(1, 1.0))?;
//! tree.add_point(Point::new(0.1, 0.1, 0usize))?;
//! tree.add_point(Point::new(0.9, 0.9, 1usize))?;
//! tree.subdivide()?;
//!
//! let mut codes: Vec<&str> = tree.index().keys().map(String::as_str).collect();
//! codes.sort();
//! assert_eq!(codes, vec!["0", "3"]);
//! assert_eq!(QuadKey::decode("3")?, QuadKey::new(1, 1, 1)?);
//! # Ok::<(), quadtok::QuadTreeError>(())
//! ```

pub mod builder;
pub mod config;
pub mod encoder;
pub mod error;
pub mod quadkey;
pub mod tree;

pub use builder::QuadTreeBuilder;
pub use config::TreeConfig;
pub use error::{QuadTreeError, Result};
pub use quadkey::{QuadKey, Quadrant};
pub use tree::{Node, NodeId, QuadTree};

pub use quadtok_types::point::Point;
pub use quadtok_types::rect::Rect;
pub use quadtok_types::stats::TreeStats;

pub use encoder::{CharShift, Encoding, Normalization, SpatialEncoder, TemporalEncoder, TimeScale};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{QuadTreeBuilder, QuadTreeError, Result, TreeConfig};

    pub use crate::{Node, NodeId, Point, QuadKey, QuadTree, Rect};

    pub use crate::{CharShift, Encoding, SpatialEncoder, TemporalEncoder};
}
