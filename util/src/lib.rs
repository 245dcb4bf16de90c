//! Unopinionated standalone utilities.

pub mod geom;
pub use geom::{
    bresenham_line, plot_circle, plot_empty_rect, plot_filled_rect,
    plot_line, DIR_4, DIR_8,
};

mod grid;
pub use grid::Grid;

mod interned_string;
pub use interned_string::{InString, Interner};

mod path;
pub use path::{dijkstra_map, flood_fill};

pub mod text;
pub use text::StrExt;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;
