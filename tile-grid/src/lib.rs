//! A library for map tile grid calculations
//!
//! Derives the tiles covering a geographic extent, given in degrees, for the
//! Web Mercator grid and the geographic WGS84 grid.
//!
//! ## Web Mercator
//!
//! ```rust
//! use tile_grid::{Extent, Grid, Tile};
//!
//! let grid = Grid::web_mercator();
//! let extent = Extent {
//!     minx: 116.37,
//!     miny: 39.90,
//!     maxx: 116.43,
//!     maxy: 39.93,
//! };
//! let tiles = grid.tiles(&extent, 10).unwrap();
//! assert_eq!(tiles, vec![Tile::new(843, 387, 10), Tile::new(843, 388, 10)]);
//! ```
//!
//! ## WGS84 grid
//!
//! The geographic grid has twice as many columns as rows. Extents crossing
//! the antimeridian are split into an eastern and a western tile range.
//!
//! ```rust
//! use tile_grid::{Extent, Grid};
//!
//! let grid = Grid::wgs84();
//! let crossing = Extent {
//!     minx: 170.0,
//!     miny: -10.0,
//!     maxx: -170.0,
//!     maxy: 10.0,
//! };
//! let limits = grid.tile_limits(&crossing, 2).unwrap();
//! assert_eq!(limits.len(), 2);
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use tile_grid::{ExtentInt, GridIterator};
//!
//! let limits = vec![ExtentInt { minx: 0, miny: 0, maxx: 1, maxy: 1 }];
//! for tile in GridIterator::new(1, limits) {
//!     println!("Tile {}", tile);
//! }
//! ```

mod grid;
mod grid_iterator;
#[cfg(test)]
mod grid_test;

pub use grid::{
    extent_wgs84_to_merc, limits_count, normalize_lon, Extent, ExtentInt, Grid, GridError,
    IndexPolicy, Projection, Tile, EARTH_RADIUS, MERCATOR_LAT_LIMIT,
};
pub use grid_iterator::GridIterator;
