//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use thiserror::Error;
use tile_grid::GridError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported geometry type '{0}' - expected Polygon or MultiPolygon")]
    UnsupportedGeometry(String),
    #[error("input contains no usable polygon vertices")]
    DegenerateInput,
    #[error("invalid GeoJSON - {0}")]
    InvalidGeoJson(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("zoom level {zoom} needs {count} tiles (limit {limit})")]
    TooManyTiles { zoom: u8, count: u64, limit: u64 },
    #[error("configuration error - {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
