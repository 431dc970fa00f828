//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{
    extent_wgs84_to_merc, limits_count, normalize_lon, Extent, ExtentInt, Grid, GridError,
    IndexPolicy, Projection, Tile,
};

fn beijing() -> Extent {
    Extent {
        minx: 116.37,
        miny: 39.90,
        maxx: 116.43,
        maxy: 39.93,
    }
}

#[test]
fn test_merc_limits() {
    let grid = Grid::web_mercator();

    assert_eq!(
        grid.tile_limits(&beijing(), 0).unwrap(),
        vec![ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 0,
            maxy: 0,
        }]
    );
    assert_eq!(
        grid.tile_limits(&beijing(), 10).unwrap(),
        vec![ExtentInt {
            minx: 843,
            miny: 387,
            maxx: 843,
            maxy: 388,
        }]
    );
    assert_eq!(
        grid.tile_limits(&beijing(), 16).unwrap(),
        vec![ExtentInt {
            minx: 53952,
            miny: 24827,
            maxx: 53963,
            maxy: 24834,
        }]
    );

    let paris = Extent {
        minx: 2.2,
        miny: 48.8,
        maxx: 2.5,
        maxy: 48.9,
    };
    assert_eq!(
        grid.tile_limits(&paris, 10).unwrap(),
        vec![ExtentInt {
            minx: 518,
            miny: 352,
            maxx: 519,
            maxy: 352,
        }]
    );
}

#[test]
fn test_merc_tiles_golden() {
    let grid = Grid::web_mercator();
    let tiles = grid.tiles(&beijing(), 16).unwrap();
    let expected: Vec<Tile> = (53952..=53963)
        .flat_map(|x| (24827..=24834).map(move |y| Tile::new(x, y, 16)))
        .collect();
    assert_eq!(tiles.len(), 96);
    assert_eq!(tiles, expected);
    assert_eq!(tiles[0].to_string(), "16/53952/24827");
    assert_eq!(tiles[95].to_string(), "16/53963/24834");
}

#[test]
fn test_merc_non_finite() {
    let grid = Grid::web_mercator();
    // the south pole projects to -infinity
    let polar = Extent {
        minx: 0.0,
        miny: -90.0,
        maxx: 10.0,
        maxy: -80.0,
    };
    match grid.tile_limits(&polar, 3) {
        Err(GridError::NonFiniteProjection { zoom, .. }) => assert_eq!(zoom, 3),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_wgs84_limits() {
    let grid = Grid::wgs84();

    assert_eq!(
        grid.tile_limits(&beijing(), 1).unwrap(),
        vec![ExtentInt {
            minx: 2,
            miny: 0,
            maxx: 2,
            maxy: 0,
        }]
    );
    assert_eq!(
        grid.tile_limits(&beijing(), 10).unwrap(),
        vec![ExtentInt {
            minx: 1686,
            miny: 284,
            maxx: 1686,
            maxy: 285,
        }]
    );
    // doubled column endpoints, all columns in between are emitted
    assert_eq!(
        grid.tile_limits(&beijing(), 16).unwrap(),
        vec![ExtentInt {
            minx: 107904,
            miny: 18229,
            maxx: 107926,
            maxy: 18240,
        }]
    );
    assert_eq!(grid.tile_count(&beijing(), 16).unwrap(), 23 * 12);
}

#[test]
fn test_wgs84_differs_from_merc() {
    let merc = Grid::web_mercator().tiles(&beijing(), 10).unwrap();
    let wgs84 = Grid::wgs84().tiles(&beijing(), 10).unwrap();
    assert_eq!(
        merc,
        vec![Tile::new(843, 387, 10), Tile::new(843, 388, 10)]
    );
    assert_eq!(
        wgs84,
        vec![Tile::new(1686, 284, 10), Tile::new(1686, 285, 10)]
    );
}

#[test]
fn test_wgs84_lat_clamp() {
    let grid = Grid::wgs84();
    let world = Extent {
        minx: -180.0,
        miny: -90.0,
        maxx: 179.9,
        maxy: 90.0,
    };
    assert_eq!(
        grid.tile_limits(&world, 1).unwrap(),
        vec![ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 2,
            maxy: 1,
        }]
    );

    // a tight limit pulls the poles into the middle rows
    let grid = Grid::wgs84().with_lat_limit(10.0);
    assert_eq!(
        grid.tile_limits(&world, 3).unwrap(),
        vec![ExtentInt {
            minx: 0,
            miny: 3,
            maxx: 14,
            maxy: 4,
        }]
    );
}

#[test]
fn test_antimeridian() {
    let grid = Grid::wgs84();
    let crossing = Extent {
        minx: 170.0,
        miny: -10.0,
        maxx: -170.0,
        maxy: 10.0,
    };
    assert_eq!(
        grid.tile_limits(&crossing, 2).unwrap(),
        vec![
            ExtentInt {
                minx: 6,
                miny: 1,
                maxx: 8,
                maxy: 2,
            },
            ExtentInt {
                minx: 0,
                miny: 1,
                maxx: 0,
                maxy: 2,
            },
        ]
    );
    let tiles = grid.tiles(&crossing, 2).unwrap();
    assert_eq!(
        tiles,
        vec![
            Tile::new(6, 1, 2),
            Tile::new(6, 2, 2),
            Tile::new(7, 1, 2),
            Tile::new(7, 2, 2),
            Tile::new(8, 1, 2),
            Tile::new(8, 2, 2),
            Tile::new(0, 1, 2),
            Tile::new(0, 2, 2),
        ]
    );

    // same result with unnormalized longitudes
    let shifted = Extent {
        minx: 170.0,
        miny: -10.0,
        maxx: 190.0,
        maxy: 10.0,
    };
    assert_eq!(grid.tiles(&shifted, 2).unwrap(), tiles);
}

#[test]
fn test_index_policies() {
    let crossing = Extent {
        minx: 170.0,
        miny: -10.0,
        maxx: -170.0,
        maxy: 10.0,
    };
    let wrapped = Grid::wgs84()
        .with_policy(IndexPolicy::Wrap)
        .tiles(&crossing, 2)
        .unwrap();
    // column 8 is outside of the 8 column level and wraps to 0
    assert_eq!(wrapped[4], Tile::new(0, 1, 2));
    assert!(wrapped.iter().all(|t| t.x >= 0 && t.x < 8));

    let clamped = Grid::wgs84()
        .with_policy(IndexPolicy::Clamp)
        .tile_limits(&crossing, 2)
        .unwrap();
    assert_eq!(
        clamped[0],
        ExtentInt {
            minx: 6,
            miny: 1,
            maxx: 7,
            maxy: 2,
        }
    );

    let outside = Extent {
        minx: -200.0,
        miny: -10.0,
        maxx: -190.0,
        maxy: 10.0,
    };
    let grid = Grid::web_mercator();
    assert_eq!(
        grid.tile_limits(&outside, 1).unwrap()[0],
        ExtentInt {
            minx: -1,
            miny: 0,
            maxx: -1,
            maxy: 1,
        }
    );
    let grid = Grid::web_mercator().with_policy(IndexPolicy::Clamp);
    assert_eq!(
        grid.tiles(&outside, 1).unwrap(),
        vec![Tile::new(0, 0, 1), Tile::new(0, 1, 1)]
    );
    let grid = Grid::web_mercator().with_policy(IndexPolicy::Wrap);
    assert_eq!(
        grid.tiles(&outside, 1).unwrap(),
        vec![Tile::new(1, 0, 1), Tile::new(1, 1, 1)]
    );
}

#[test]
fn test_single_point() {
    let point = Extent::from_point(116.4, 39.9);
    assert_eq!(
        Grid::web_mercator().tiles(&point, 16).unwrap(),
        vec![Tile::new(53957, 24834, 16)]
    );
    assert_eq!(
        Grid::wgs84().tiles(&point, 16).unwrap(),
        vec![Tile::new(107914, 18240, 16)]
    );
}

#[test]
fn test_max_zoom() {
    let point = Extent::from_point(0.0, 0.0);
    assert_eq!(
        Grid::web_mercator().tiles(&point, 62).unwrap(),
        vec![Tile::new(1 << 61, 1 << 61, 62)]
    );
    assert_eq!(
        Grid::wgs84().tiles(&point, 61).unwrap(),
        vec![Tile::new(1 << 61, 1 << 60, 61)]
    );
    assert_eq!(Grid::web_mercator().level_limit(62), (1 << 62, 1 << 62));

    let point = Extent::from_point(10.0, 10.0);
    for grid in vec![Grid::web_mercator(), Grid::wgs84()] {
        for zoom in vec![grid.max_zoom() + 1, 64, 255] {
            assert_eq!(
                grid.tiles(&point, zoom),
                Err(GridError::ZoomOutOfRange {
                    projection: grid.projection,
                    zoom,
                    max_zoom: grid.max_zoom(),
                })
            );
            assert!(grid.tile_count(&point, zoom).is_err());
        }
    }
}

#[test]
fn test_limits_tiles() {
    for grid in vec![
        Grid::web_mercator(),
        Grid::wgs84().with_policy(IndexPolicy::Wrap),
    ] {
        let limits = grid.tile_limits(&beijing(), 14).unwrap();
        assert_eq!(limits_count(&limits), grid.tile_count(&beijing(), 14).unwrap());
        assert_eq!(
            grid.limits_tiles(14, limits),
            grid.tiles(&beijing(), 14).unwrap()
        );
    }
    assert_eq!(limits_count(&[]), 0);
}

#[test]
fn test_zoom_monotonic() {
    for grid in vec![Grid::web_mercator(), Grid::wgs84()] {
        let mut count = 0;
        for zoom in 0..18 {
            let n = grid.tile_count(&beijing(), zoom).unwrap();
            assert!(n >= count, "{:?} zoom {}: {} < {}", grid.projection, zoom, n, count);
            count = n;
        }
    }
}

#[test]
fn test_level_limit() {
    assert_eq!(Grid::web_mercator().level_limit(0), (1, 1));
    assert_eq!(Grid::web_mercator().level_limit(10), (1024, 1024));
    assert_eq!(Grid::wgs84().level_limit(0), (2, 1));
    assert_eq!(Grid::wgs84().level_limit(10), (2048, 1024));
    assert_eq!(Grid::web_mercator().level_limit(70), (i64::MAX, i64::MAX));
}

#[test]
fn test_tile_extent() {
    let grid = Grid::web_mercator();
    let extent = grid.tile_extent(&Tile::new(0, 0, 0));
    assert_eq!(extent.minx, -180.0);
    assert_eq!(extent.maxx, 180.0);
    assert!((extent.maxy - 85.0511).abs() < 1e-4);
    assert!((extent.miny + 85.0511).abs() < 1e-4);

    let extent = grid.tile_extent(&Tile::new(1, 1, 1));
    assert_eq!(extent.minx, 0.0);
    assert_eq!(extent.maxx, 180.0);
    assert!(extent.maxy.abs() < 1e-9);

    let grid = Grid::wgs84();
    assert_eq!(
        grid.tile_extent(&Tile::new(0, 0, 0)),
        Extent {
            minx: -180.0,
            miny: -90.0,
            maxx: 0.0,
            maxy: 90.0,
        }
    );
    assert_eq!(
        grid.tile_extent(&Tile::new(3, 1, 1)),
        Extent {
            minx: 90.0,
            miny: -90.0,
            maxx: 180.0,
            maxy: 0.0,
        }
    );
}

#[test]
fn test_tile_extent_last_index() {
    let tile = "0/9223372036854775807/9223372036854775807"
        .parse::<Tile>()
        .unwrap();
    for grid in vec![Grid::web_mercator(), Grid::wgs84()] {
        let extent = grid.tile_extent(&tile);
        assert!(extent.minx <= extent.maxx);
        assert!(extent.miny <= extent.maxy);
    }
    let extent = Grid::web_mercator().tile_extent(&tile);
    assert!((extent.maxy + 90.0).abs() < 1e-9);
}

#[test]
fn test_merc_projection() {
    let grid = Grid::web_mercator();
    let (x, y) = grid.lonlat_to_merc(180.0, 0.0);
    assert_eq!(x, 20037508.342789244);
    assert!(y.abs() < 1e-9);

    let extent = extent_wgs84_to_merc(&Extent {
        minx: -180.0,
        miny: -85.0511,
        maxx: 180.0,
        maxy: 85.0511,
    });
    assert_eq!(extent.minx, -20037508.342789244);
    assert!((extent.maxy - 20037508.34).abs() < 100.0);

    let mut sphere = Grid::web_mercator();
    sphere.earth_radius = 6371000.0;
    let extent = sphere.merc_extent(&Extent::from_point(180.0, 0.0));
    assert!((extent.maxx - std::f64::consts::PI * 6371000.0).abs() < 1e-6);
}

#[test]
fn test_normalize_lon() {
    assert_eq!(normalize_lon(0.0), 0.0);
    assert_eq!(normalize_lon(190.0), -170.0);
    assert_eq!(normalize_lon(-190.0), 170.0);
    assert_eq!(normalize_lon(180.0), -180.0);
    assert_eq!(normalize_lon(-180.0), -180.0);
    assert_eq!(normalize_lon(540.0), -180.0);
}

#[test]
fn test_parse() {
    assert_eq!("16/53952/24827".parse::<Tile>(), Ok(Tile::new(53952, 24827, 16)));
    assert!("16/53952".parse::<Tile>().is_err());
    assert!("x/1/2".parse::<Tile>().is_err());
    assert_eq!("wgs84".parse::<Projection>(), Ok(Projection::Wgs84));
    assert_eq!("Web_Mercator".parse::<Projection>(), Ok(Projection::WebMercator));
    assert!("utm".parse::<Projection>().is_err());
    assert_eq!(Projection::default(), Projection::WebMercator);
    assert_eq!("clamp".parse::<IndexPolicy>(), Ok(IndexPolicy::Clamp));
    assert_eq!(IndexPolicy::default(), IndexPolicy::PassThrough);
}

#[test]
fn test_extent_ops() {
    let mut extent = Extent::from_point(1.0, 2.0);
    extent.include(-1.0, 5.0);
    assert_eq!(
        extent,
        Extent {
            minx: -1.0,
            miny: 2.0,
            maxx: 1.0,
            maxy: 5.0,
        }
    );
    let other = Extent::from_point(3.0, 0.0);
    assert_eq!(
        extent.expand(&other),
        Extent {
            minx: -1.0,
            miny: 0.0,
            maxx: 3.0,
            maxy: 5.0,
        }
    );
    assert!(extent.is_finite());
    assert!(!Extent::from_point(f64::INFINITY, 0.0).is_finite());

    let range = ExtentInt {
        minx: 0,
        miny: 0,
        maxx: 2,
        maxy: 1,
    };
    assert_eq!(range.count(), 6);
}
