//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::bbox::{bounding_box, merge_boxes};
use crate::core::config::ApplicationCfg;
use crate::core::geom::extract_vertices;
use crate::core::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tile_grid::{limits_count, Extent, Grid, Projection, Tile};

/// Requested zoom levels. The result shape follows the request shape.
#[derive(Deserialize, PartialEq, Clone, Debug)]
#[serde(untagged)]
pub enum ZoomLevels {
    Single(u8),
    List(Vec<u8>),
}

impl ZoomLevels {
    pub fn levels(&self) -> Vec<u8> {
        match self {
            ZoomLevels::Single(zoom) => vec![*zoom],
            ZoomLevels::List(zooms) => zooms.clone(),
        }
    }
}

impl From<u8> for ZoomLevels {
    fn from(zoom: u8) -> ZoomLevels {
        ZoomLevels::Single(zoom)
    }
}

impl From<Vec<u8>> for ZoomLevels {
    fn from(zooms: Vec<u8>) -> ZoomLevels {
        ZoomLevels::List(zooms)
    }
}

impl FromStr for ZoomLevels {
    type Err = String;

    /// `16` is a single level, `15,16` and `16,` are lists
    fn from_str(s: &str) -> std::result::Result<ZoomLevels, String> {
        let parse = |v: &str| {
            v.trim()
                .parse::<u8>()
                .map_err(|e| format!("Invalid zoom level '{}' - {}", v.trim(), e))
        };
        if s.contains(',') {
            s.split(',')
                .filter(|v| !v.trim().is_empty())
                .map(parse)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(ZoomLevels::List)
        } else {
            parse(s).map(ZoomLevels::Single)
        }
    }
}

/// Covering tiles, either as plain list or per zoom level
#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(untagged)]
pub enum CoverResult {
    Tiles(Vec<Tile>),
    ByZoom(BTreeMap<u8, Vec<Tile>>),
}

impl CoverResult {
    /// All tiles, ordered by zoom level for lists
    pub fn tiles(&self) -> Box<dyn Iterator<Item = &Tile> + '_> {
        match self {
            CoverResult::Tiles(tiles) => Box::new(tiles.iter()),
            CoverResult::ByZoom(by_zoom) => Box::new(by_zoom.values().flatten()),
        }
    }
    pub fn len(&self) -> usize {
        match self {
            CoverResult::Tiles(tiles) => tiles.len(),
            CoverResult::ByZoom(by_zoom) => by_zoom.values().map(Vec::len).sum(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tile cover service
#[derive(Clone, Debug)]
pub struct TileCover {
    pub grid: Grid,
    /// Fail for zoom levels with more tiles
    pub max_tiles: Option<u64>,
    /// Zoom levels from configuration
    pub zoom: Option<ZoomLevels>,
}

impl TileCover {
    pub fn new(grid: Grid) -> TileCover {
        TileCover {
            grid,
            max_tiles: None,
            zoom: None,
        }
    }
    pub fn with_max_tiles(mut self, max_tiles: u64) -> TileCover {
        self.max_tiles = Some(max_tiles);
        self
    }
    /// Bounding box of all polygon vertices
    pub fn extent(&self, geojson: &Value) -> Result<Extent> {
        let vertices = extract_vertices(geojson)?;
        debug!("{} polygon vertices", vertices.len());
        bounding_box(&vertices)
    }
    /// Tiles covering the bounding box of a GeoJSON polygon input
    pub fn cover(&self, geojson: &Value, zooms: &ZoomLevels) -> Result<CoverResult> {
        let extent = self.extent(geojson)?;
        self.cover_extent(&extent, zooms)
    }
    /// Tiles covering the common bounding box of several inputs
    pub fn cover_all(&self, inputs: &[Value], zooms: &ZoomLevels) -> Result<CoverResult> {
        let extents = inputs
            .iter()
            .map(|geojson| self.extent(geojson))
            .collect::<Result<Vec<_>>>()?;
        let extent = merge_boxes(&extents)?;
        self.cover_extent(&extent, zooms)
    }
    pub fn cover_extent(&self, extent: &Extent, zooms: &ZoomLevels) -> Result<CoverResult> {
        debug!("input extent: {:?}", extent);
        // All levels are checked against max_tiles before any tile is emitted
        let mut level_limits = Vec::new();
        for zoom in zooms.levels() {
            let limits = self.grid.tile_limits(extent, zoom)?;
            debug!("level {}: {:?}", zoom, limits);
            if let Some(limit) = self.max_tiles {
                let count = limits_count(&limits);
                if count > limit {
                    return Err(Error::TooManyTiles { zoom, count, limit });
                }
            }
            level_limits.push((zoom, limits));
        }
        let mut by_zoom = BTreeMap::new();
        for (zoom, limits) in level_limits {
            let tiles = self.grid.limits_tiles(zoom, limits);
            info!("Zoom level {}: {} tiles", zoom, tiles.len());
            by_zoom.insert(zoom, tiles);
        }
        match zooms {
            ZoomLevels::Single(zoom) => Ok(CoverResult::Tiles(
                by_zoom.remove(zoom).unwrap_or_default(),
            )),
            ZoomLevels::List(_) => Ok(CoverResult::ByZoom(by_zoom)),
        }
    }
}

/// Tiles covering the bounding box of a GeoJSON polygon input
pub fn tile_cover(
    geojson: &Value,
    zooms: &ZoomLevels,
    projection: Projection,
) -> Result<CoverResult> {
    TileCover::new(Grid::new(projection)).cover(geojson, zooms)
}

impl<'a> Config<'a, ApplicationCfg> for TileCover {
    fn from_config(config: &ApplicationCfg) -> std::result::Result<Self, String> {
        let grid = Grid::from_config(&config.grid)?;
        Ok(TileCover {
            grid,
            max_tiles: config.cover.max_tiles,
            zoom: config.cover.zoom.clone(),
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[cover]
# Zoom levels: a single level returns a tile list, an array a list per level
#zoom = [14, 15, 16]
# Maximal number of tiles per zoom level
#max_tiles = 100000
"#;
        let mut config = String::new();
        config.push_str(&Grid::gen_config());
        config.push_str(toml);
        config
    }
    fn gen_runtime_config(&self) -> String {
        let mut config = String::new();
        config.push_str(&self.grid.gen_runtime_config());
        config.push_str("\n[cover]\n");
        match self.zoom {
            Some(ZoomLevels::Single(zoom)) => config.push_str(&format!("zoom = {}\n", zoom)),
            Some(ZoomLevels::List(ref zooms)) => config.push_str(&format!("zoom = {:?}\n", zooms)),
            None => {}
        }
        if let Some(max_tiles) = self.max_tiles {
            config.push_str(&format!("max_tiles = {}\n", max_tiles));
        }
        config
    }
}
