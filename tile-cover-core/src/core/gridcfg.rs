//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::GridCfg;
use crate::core::Config;
use tile_grid::{Grid, IndexPolicy, Projection};

impl<'a> Config<'a, GridCfg> for Grid {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, String> {
        let projection = match grid_cfg.predefined.as_str() {
            "wgs84" => Projection::Wgs84,
            "web_mercator" => Projection::WebMercator,
            gridname => return Err(format!("Unknown grid '{}'", gridname)),
        };
        let mut grid = Grid::new(projection);
        if let Some(lat_limit) = grid_cfg.lat_limit {
            if !(lat_limit > 0.0 && lat_limit <= 90.0) {
                return Err(format!(
                    "Invalid lat_limit {} - expected value in (0, 90]",
                    lat_limit
                ));
            }
            grid = grid.with_lat_limit(lat_limit);
        }
        if let Some(earth_radius) = grid_cfg.earth_radius {
            if !(earth_radius > 0.0 && earth_radius.is_finite()) {
                return Err(format!("Invalid earth_radius {}", earth_radius));
            }
            grid.earth_radius = earth_radius;
        }
        if let Some(ref policy) = grid_cfg.index_policy {
            grid = grid.with_policy(policy.parse::<IndexPolicy>()?);
        }
        Ok(grid)
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
# Predefined grids: web_mercator, wgs84
predefined = "web_mercator"
# Latitude limit of the wgs84 grid
#lat_limit = 85.0511
# Sphere radius for projected web_mercator coordinates in meters
#earth_radius = 6378137.0
# Tile indices outside of the grid: passthrough, clamp or wrap
#index_policy = "passthrough"
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        let policy = match self.policy {
            IndexPolicy::PassThrough => "passthrough",
            IndexPolicy::Clamp => "clamp",
            IndexPolicy::Wrap => "wrap",
        };
        format!(
            r#"
[grid]
predefined = "{}"
lat_limit = {:?}
earth_radius = {:?}
index_policy = "{}"
"#,
            self.projection, self.lat_limit, self.earth_radius, policy
        )
    }
}
