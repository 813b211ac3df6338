//! Character mapping.

pub mod cmap;

pub use cmap::{CMap, CMapEntry, SharedCMap, parse_cmap};
