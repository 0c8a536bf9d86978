//! # quadtok-types
//!
//! Core types shared by the quadtok quadtree:
//!
//! - **Points**: `Point<T>`, a 2-D coordinate carrying an opaque payload
//! - **Rectangles**: `Rect`, an axis-aligned box stored as origin + extents
//! - **Statistics**: `TreeStats`, a snapshot of a subdivided tree's shape
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use quadtok_types::point::Point;
//! use quadtok_types::rect::Rect;
//!
//! let region = Rect::square(1.0);
//! let visit = Point::new(0.25, 0.75, 7usize);
//! assert!(region.contains(&visit));
//! ```

pub mod point;
pub mod rect;
pub mod stats;
