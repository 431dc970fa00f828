//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Tile grids

use crate::grid_iterator::GridIterator;
use serde_derive::{Deserialize, Serialize};
use std::f64::consts;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Radius of the sphere used by spherical Mercator (WGS84 semi-major axis)
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit of the Web Mercator square, also applied to the WGS84 grid
pub const MERCATOR_LAT_LIMIT: f64 = 85.0511;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    /// Extent collapsed to a single point
    pub fn from_point(x: f64, y: f64) -> Extent {
        Extent {
            minx: x,
            miny: y,
            maxx: x,
            maxy: y,
        }
    }
    /// Grow extent to contain point
    pub fn include(&mut self, x: f64, y: f64) {
        self.minx = self.minx.min(x);
        self.miny = self.miny.min(y);
        self.maxx = self.maxx.max(x);
        self.maxy = self.maxy.max(y);
    }
    /// Smallest extent containing both extents
    pub fn expand(&self, other: &Extent) -> Extent {
        Extent {
            minx: self.minx.min(other.minx),
            miny: self.miny.min(other.miny),
            maxx: self.maxx.max(other.maxx),
            maxy: self.maxy.max(other.maxy),
        }
    }
    pub fn is_finite(&self) -> bool {
        self.minx.is_finite()
            && self.miny.is_finite()
            && self.maxx.is_finite()
            && self.maxy.is_finite()
    }
}

/// Min and max grid cell numbers (inclusive)
#[derive(PartialEq, Clone, Debug)]
pub struct ExtentInt {
    pub minx: i64,
    pub miny: i64,
    pub maxx: i64,
    pub maxy: i64,
}

impl ExtentInt {
    pub fn width(&self) -> u64 {
        if self.maxx < self.minx {
            0
        } else {
            self.maxx.abs_diff(self.minx).saturating_add(1)
        }
    }
    pub fn height(&self) -> u64 {
        if self.maxy < self.miny {
            0
        } else {
            self.maxy.abs_diff(self.miny).saturating_add(1)
        }
    }
    /// Number of tiles in range
    pub fn count(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }
}

/// Tile address in a grid level
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
    pub z: u8,
}

impl Tile {
    pub fn new(x: i64, y: i64, z: u8) -> Tile {
        Tile { x, y, z }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for Tile {
    type Err = String;

    /// Parse `z/x/y`
    fn from_str(s: &str) -> Result<Tile, String> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid tile '{}' - expected z/x/y", s));
        }
        let z = parts[0]
            .parse::<u8>()
            .map_err(|e| format!("Invalid zoom level '{}' - {}", parts[0], e))?;
        let x = parts[1]
            .parse::<i64>()
            .map_err(|e| format!("Invalid tile column '{}' - {}", parts[1], e))?;
        let y = parts[2]
            .parse::<i64>()
            .map_err(|e| format!("Invalid tile row '{}' - {}", parts[2], e))?;
        Ok(Tile { x, y, z })
    }
}

/// Tiling scheme
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Projection {
    /// Spherical Mercator, 2^z x 2^z tiles, row 0 at the north
    WebMercator,
    /// Geographic lon/lat grid, 2*2^z x 2^z tiles
    Wgs84,
}

impl Default for Projection {
    fn default() -> Projection {
        Projection::WebMercator
    }
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Projection, String> {
        match &s.to_lowercase() as &str {
            "web_mercator" | "webmercator" | "mercator" | "3857" => Ok(Projection::WebMercator),
            "wgs84" | "4326" => Ok(Projection::Wgs84),
            _ => Err(format!("Unknown projection '{}'", s)),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::WebMercator => write!(f, "web_mercator"),
            Projection::Wgs84 => write!(f, "wgs84"),
        }
    }
}

/// Handling of tile indices outside of the grid level
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum IndexPolicy {
    /// Keep computed indices
    PassThrough,
    /// Clamp column and row ranges to the grid level
    Clamp,
    /// Wrap columns around the antimeridian, clamp rows
    Wrap,
}

impl Default for IndexPolicy {
    fn default() -> IndexPolicy {
        IndexPolicy::PassThrough
    }
}

impl FromStr for IndexPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<IndexPolicy, String> {
        match &s.to_lowercase() as &str {
            "passthrough" | "pass_through" | "none" => Ok(IndexPolicy::PassThrough),
            "clamp" => Ok(IndexPolicy::Clamp),
            "wrap" => Ok(IndexPolicy::Wrap),
            _ => Err(format!("Unexpected index policy '{}'", s)),
        }
    }
}

#[derive(Error, PartialEq, Clone, Debug)]
pub enum GridError {
    #[error("extent {extent:?} has no finite Web Mercator projection at zoom level {zoom}")]
    NonFiniteProjection { extent: Extent, zoom: u8 },
    #[error("zoom level {zoom} exceeds the maximal {projection} zoom level {max_zoom}")]
    ZoomOutOfRange {
        projection: Projection,
        zoom: u8,
        max_zoom: u8,
    },
}

/// Tile grid
#[derive(Clone, Debug)]
pub struct Grid {
    pub projection: Projection,
    /// Sphere radius for Mercator projection, in meters.
    pub earth_radius: f64,
    /// Latitudes of the WGS84 grid are clamped to [-lat_limit, lat_limit].
    /// The Mercator branch does not clamp.
    pub lat_limit: f64,
    pub policy: IndexPolicy,
}

impl Grid {
    /// WGS84 grid
    pub fn wgs84() -> Grid {
        Grid::new(Projection::Wgs84)
    }

    /// Web Mercator grid (Google maps compatible)
    pub fn web_mercator() -> Grid {
        Grid::new(Projection::WebMercator)
    }

    pub fn new(projection: Projection) -> Grid {
        Grid {
            projection,
            earth_radius: EARTH_RADIUS,
            lat_limit: MERCATOR_LAT_LIMIT,
            policy: IndexPolicy::default(),
        }
    }
    pub fn with_policy(mut self, policy: IndexPolicy) -> Grid {
        self.policy = policy;
        self
    }
    pub fn with_lat_limit(mut self, lat_limit: f64) -> Grid {
        self.lat_limit = lat_limit;
        self
    }
    /// Highest zoom level with tile indices representable as `i64`
    pub fn max_zoom(&self) -> u8 {
        match self.projection {
            Projection::WebMercator => 62,
            Projection::Wgs84 => 61,
        }
    }
    /// Tiles per axis of a Web Mercator level
    fn side(zoom: u8) -> i64 {
        if zoom >= 63 {
            i64::MAX
        } else {
            1 << zoom
        }
    }
    /// (columns, rows) of grid level
    pub fn level_limit(&self, zoom: u8) -> (i64, i64) {
        let side = Grid::side(zoom);
        match self.projection {
            Projection::WebMercator => (side, side),
            Projection::Wgs84 => (side.saturating_mul(2), side),
        }
    }
    /// Extent of a tile in degrees
    pub fn tile_extent(&self, tile: &Tile) -> Extent {
        let n = (tile.z as f64).exp2();
        // Tile edges as floats, the next index may not fit into i64
        let (x, y) = (tile.x as f64, tile.y as f64);
        match self.projection {
            Projection::WebMercator => {
                let lon = |x: f64| x / n * 360.0 - 180.0;
                let lat = |y: f64| (consts::PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
                Extent {
                    minx: lon(x),
                    miny: lat(y + 1.0),
                    maxx: lon(x + 1.0),
                    maxy: lat(y),
                }
            }
            Projection::Wgs84 => {
                let res = 180.0 / n;
                Extent {
                    minx: -180.0 + x * res,
                    miny: 90.0 - (y + 1.0) * res,
                    maxx: -180.0 + (x + 1.0) * res,
                    maxy: 90.0 - y * res,
                }
            }
        }
    }
    /// Returns the Spherical Mercator (x, y) in meters
    pub fn lonlat_to_merc(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.earth_radius * lon.to_radians();
        let y = self.earth_radius * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
        (x, y)
    }
    /// Projected extent in meters
    pub fn merc_extent(&self, extent: &Extent) -> Extent {
        let (minx, miny) = self.lonlat_to_merc(extent.minx, extent.miny);
        let (maxx, maxy) = self.lonlat_to_merc(extent.maxx, extent.maxy);
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
    /// Tile index limits covering extent (in degrees).
    /// The WGS84 grid returns two ranges for extents crossing the antimeridian.
    pub fn tile_limits(&self, extent: &Extent, zoom: u8) -> Result<Vec<ExtentInt>, GridError> {
        if zoom > self.max_zoom() {
            return Err(GridError::ZoomOutOfRange {
                projection: self.projection,
                zoom,
                max_zoom: self.max_zoom(),
            });
        }
        let limits = match self.projection {
            Projection::WebMercator => vec![self.merc_limits(extent, zoom)?],
            Projection::Wgs84 => {
                let miny = clamp_lat(extent.miny, self.lat_limit);
                let maxy = clamp_lat(extent.maxy, self.lat_limit);
                let minx = normalize_lon(extent.minx);
                let maxx = normalize_lon(extent.maxx);
                self.wgs84_limits(minx, miny, maxx, maxy, zoom)
            }
        };
        if self.policy == IndexPolicy::PassThrough {
            return Ok(limits);
        }
        let (level_maxx, level_maxy) = self.level_limit(zoom);
        Ok(limits
            .into_iter()
            .map(|limit| {
                let (minx, maxx) = if self.policy == IndexPolicy::Clamp {
                    (
                        limit.minx.max(0).min(level_maxx - 1),
                        limit.maxx.max(0).min(level_maxx - 1),
                    )
                } else {
                    (limit.minx, limit.maxx)
                };
                ExtentInt {
                    minx,
                    maxx,
                    miny: limit.miny.max(0).min(level_maxy - 1),
                    maxy: limit.maxy.max(0).min(level_maxy - 1),
                }
            })
            .collect())
    }
    /// Number of tiles covering extent
    pub fn tile_count(&self, extent: &Extent, zoom: u8) -> Result<u64, GridError> {
        Ok(limits_count(&self.tile_limits(extent, zoom)?))
    }
    /// Tiles covering extent
    pub fn tiles(&self, extent: &Extent, zoom: u8) -> Result<Vec<Tile>, GridError> {
        let limits = self.tile_limits(extent, zoom)?;
        Ok(self.limits_tiles(zoom, limits))
    }
    /// Tiles of limits returned by `tile_limits`
    pub fn limits_tiles(&self, zoom: u8, limits: Vec<ExtentInt>) -> Vec<Tile> {
        let griditer = GridIterator::new(zoom, limits);
        if self.policy == IndexPolicy::Wrap {
            let (level_maxx, _) = self.level_limit(zoom);
            griditer
                .map(|tile| Tile::new(tile.x.rem_euclid(level_maxx), tile.y, tile.z))
                .collect()
        } else {
            griditer.collect()
        }
    }
    fn merc_limits(&self, extent: &Extent, zoom: u8) -> Result<ExtentInt, GridError> {
        let (minx, miny) = self.lonlat_to_merc(extent.minx, extent.miny);
        let (maxx, maxy) = self.lonlat_to_merc(extent.maxx, extent.maxy);
        if ![minx, miny, maxx, maxy].iter().all(|v| v.is_finite()) {
            return Err(GridError::NonFiniteProjection {
                extent: extent.clone(),
                zoom,
            });
        }
        let world_size = 2.0 * consts::PI * self.earth_radius;
        let n = (zoom as f64).exp2();
        let xtile = |x: f64| ((x / world_size + 0.5) * n).floor() as i64;
        // Tile rows grow southwards, Mercator y grows northwards
        let ytile = |y: f64| ((0.5 - y / world_size) * n).floor() as i64;
        Ok(ExtentInt {
            minx: xtile(minx),
            miny: ytile(miny.max(maxy)),
            maxx: xtile(maxx),
            maxy: ytile(miny.min(maxy)),
        })
    }
    /// Expects normalized longitudes and clamped latitudes
    fn wgs84_limits(&self, minx: f64, miny: f64, maxx: f64, maxy: f64, zoom: u8) -> Vec<ExtentInt> {
        if minx > maxx {
            let mut limits = self.wgs84_limits(minx, miny, 180.0, maxy, zoom);
            limits.extend(self.wgs84_limits(-180.0, miny, maxx, maxy, zoom));
            return limits;
        }
        let n = (zoom as f64).exp2();
        // Column index in the half-width grid, doubled below
        let xtile = |lon: f64| (((lon + 180.0) / 360.0) * n).floor() as i64;
        let ytile = |lat: f64| (((90.0 - lat) / 180.0) * n).floor() as i64;
        vec![ExtentInt {
            minx: 2 * xtile(minx),
            miny: ytile(maxy),
            maxx: 2 * xtile(maxx),
            maxy: ytile(miny),
        }]
    }
}

/// Number of tiles in all ranges
pub fn limits_count(limits: &[ExtentInt]) -> u64 {
    limits
        .iter()
        .fold(0u64, |sum, limit| sum.saturating_add(limit.count()))
}

/// Longitude in [-180, 180)
pub fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

fn clamp_lat(lat: f64, limit: f64) -> f64 {
    lat.max(-limit).min(limit)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    Grid::web_mercator().merc_extent(extent)
}
