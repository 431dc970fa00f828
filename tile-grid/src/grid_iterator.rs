//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::{ExtentInt, Tile};

/// Iterator over the cells of tile ranges of one grid level.
/// Ranges are visited in order, columns outer, rows inner.
pub struct GridIterator {
    z: u8,
    x: i64,
    y: i64,
    range: usize,
    limits: Vec<ExtentInt>,
    finished: bool,
}

impl GridIterator {
    pub fn new(zoom: u8, limits: Vec<ExtentInt>) -> GridIterator {
        let mut griditer = GridIterator {
            z: zoom,
            x: 0,
            y: 0,
            range: 0,
            limits,
            finished: false,
        };
        griditer.seek(0);
        griditer
    }

    /// Move to the first cell of the next non-empty range
    fn seek(&mut self, start: usize) {
        let next = self
            .limits
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, limit)| limit.count() > 0);
        match next {
            Some((range, limit)) => {
                self.range = range;
                self.x = limit.minx;
                self.y = limit.miny;
            }
            None => self.finished = true,
        }
    }
}

impl Iterator for GridIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = Tile::new(self.x, self.y, self.z);
        let limit = &self.limits[self.range];
        if self.y < limit.maxy {
            self.y += 1;
        } else if self.x < limit.maxx {
            self.x += 1;
            self.y = limit.miny;
        } else {
            self.seek(self.range + 1);
        }
        Some(current)
    }
}

#[test]
fn test_range_iter() {
    let griditer = GridIterator::new(
        2,
        vec![ExtentInt {
            minx: 1,
            miny: 0,
            maxx: 2,
            maxy: 1,
        }],
    );
    let cells = griditer.collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            Tile::new(1, 0, 2),
            Tile::new(1, 1, 2),
            Tile::new(2, 0, 2),
            Tile::new(2, 1, 2),
        ]
    );

    let griditer = GridIterator::new(
        0,
        vec![ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 0,
            maxy: 0,
        }],
    );
    let cells = griditer.collect::<Vec<_>>();
    assert_eq!(cells, vec![Tile::new(0, 0, 0)]);
}

#[test]
fn test_multiple_ranges() {
    let griditer = GridIterator::new(
        1,
        vec![
            ExtentInt {
                minx: 3,
                miny: 0,
                maxx: 4,
                maxy: 0,
            },
            ExtentInt {
                minx: 0,
                miny: 0,
                maxx: 0,
                maxy: 1,
            },
        ],
    );
    let cells = griditer.collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            Tile::new(3, 0, 1),
            Tile::new(4, 0, 1),
            Tile::new(0, 0, 1),
            Tile::new(0, 1, 1),
        ]
    );
}

#[test]
fn test_bad_params() {
    // missing tile_limits
    let griditer = GridIterator::new(10, Vec::new());
    let cells = griditer.collect::<Vec<_>>();
    assert!(cells.is_empty());

    // inverted ranges are skipped
    let griditer = GridIterator::new(
        3,
        vec![
            ExtentInt {
                minx: 5,
                miny: 0,
                maxx: 4,
                maxy: 0,
            },
            ExtentInt {
                minx: 0,
                miny: 2,
                maxx: 0,
                maxy: 1,
            },
            ExtentInt {
                minx: 7,
                miny: 7,
                maxx: 7,
                maxy: 7,
            },
        ],
    );
    let cells = griditer.collect::<Vec<_>>();
    assert_eq!(cells, vec![Tile::new(7, 7, 3)]);
}
