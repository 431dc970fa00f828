//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::Vertex;
use crate::error::{Error, Result};
use tile_grid::Extent;

/// Extent of all vertices
pub fn bounding_box(vertices: &[Vertex]) -> Result<Extent> {
    let mut iter = vertices.iter();
    let first = iter.next().ok_or(Error::DegenerateInput)?;
    let extent = iter.fold(Extent::from_point(first.lng, first.lat), |mut extent, v| {
        extent.include(v.lng, v.lat);
        extent
    });
    if !extent.is_finite() {
        return Err(Error::DegenerateInput);
    }
    Ok(extent)
}

/// Merge extents of partial vertex sets
pub fn merge_boxes<'a, I>(extents: I) -> Result<Extent>
where
    I: IntoIterator<Item = &'a Extent>,
{
    let mut iter = extents.into_iter();
    let first = iter.next().ok_or(Error::DegenerateInput)?.clone();
    Ok(iter.fold(first, |extent, other| extent.expand(other)))
}
