//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use serde_json::Value;
use std::env;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;
use tile_cover_core::core::config::DEFAULT_CONFIG;
use tile_cover_core::core::{parse_config, read_config, ApplicationCfg, Config};
use tile_cover_core::{TileCover, ZoomLevels};
use tile_grid::{IndexPolicy, Projection, Tile};

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG").ok();
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_ref()) {
        (None, Some(rust_log)) => rust_log.as_str(),
        (loglevel, _) => loglevel.unwrap_or("info"),
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn exit_with_error<E: Display>(msg: &str, err: E) -> ! {
    eprintln!("{} - {}", msg, err);
    process::exit(1)
}

fn service_from_args(args: &ArgMatches<'_>) -> TileCover {
    let config: ApplicationCfg = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath)
            .unwrap_or_else(|err| exit_with_error("Error reading configuration", err))
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "")
            .unwrap_or_else(|err| exit_with_error("Error reading configuration", err))
    };
    let mut service = TileCover::from_config(&config)
        .unwrap_or_else(|err| exit_with_error("Error reading configuration", err));
    if let Some(projection) = args.value_of("projection") {
        service.grid.projection = projection
            .parse::<Projection>()
            .unwrap_or_else(|err| exit_with_error("Invalid argument 'projection'", err));
    }
    if let Some(policy) = args.value_of("policy") {
        service.grid.policy = policy
            .parse::<IndexPolicy>()
            .unwrap_or_else(|err| exit_with_error("Invalid argument 'policy'", err));
    }
    if let Some(max_tiles) = args.value_of("max-tiles") {
        service.max_tiles = Some(
            max_tiles
                .parse::<u64>()
                .unwrap_or_else(|err| exit_with_error("Error parsing 'max-tiles'", err)),
        );
    }
    debug!("Runtime configuration:\n{}", service.gen_runtime_config());
    service
}

fn read_geojson(path: Option<&str>) -> Result<Value, String> {
    let mut text = String::new();
    match path {
        Some(path) => {
            info!("Reading GeoJSON from '{}'", path);
            File::open(path)
                .and_then(|mut file| file.read_to_string(&mut text))
                .map_err(|e| format!("{}: {}", path, e))?
        }
        None => io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("stdin: {}", e))?,
    };
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON - {}", e))
}

fn cover(args: &ArgMatches<'_>) {
    let service = service_from_args(args);
    let zooms = match args.value_of("zoom") {
        Some(zoom) => zoom
            .parse::<ZoomLevels>()
            .unwrap_or_else(|err| exit_with_error("Invalid argument 'zoom'", err)),
        None => service
            .zoom
            .clone()
            .unwrap_or_else(|| exit_with_error("Missing zoom levels", "use --zoom or [cover] zoom")),
    };
    let inputs = match args.values_of("geojson") {
        Some(paths) => paths
            .map(|path| read_geojson(Some(path)))
            .collect::<Result<Vec<_>, _>>(),
        None => read_geojson(None).map(|geojson| vec![geojson]),
    }
    .unwrap_or_else(|err| exit_with_error("Error reading GeoJSON", err));

    let result = service
        .cover_all(&inputs, &zooms)
        .unwrap_or_else(|err| exit_with_error("Tile cover failed", err));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match args.value_of("format").unwrap_or("json") {
        "tiles" => result
            .tiles()
            .try_for_each(|tile| writeln!(out, "{}", tile)),
        _ => serde_json::to_writer(&mut out, &result)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(out)),
    };
    if let Err(err) = written {
        exit_with_error("Error writing output", err);
    }
}

fn extent(args: &ArgMatches<'_>) {
    let tile = value_t!(args, "tile", Tile)
        .unwrap_or_else(|err| exit_with_error("Invalid argument 'tile'", err));
    let grid = service_from_args(args).grid;
    let extent = grid.tile_extent(&tile);
    println!(
        "{},{},{},{}",
        extent.minx, extent.miny, extent.maxx, extent.maxy
    );
    if grid.projection == Projection::WebMercator {
        let merc = grid.merc_extent(&extent);
        println!("{},{},{},{}", merc.minx, merc.miny, merc.maxx, merc.maxy);
    }
}

fn main() {
    dotenv().ok();
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("tile_cover")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Map tiles covering GeoJSON polygons")
        .subcommand(SubCommand::with_name("cover")
                        .args_from_usage("--geojson=[FILE]... 'GeoJSON input files (Default: stdin)'
                                              --zoom=[LEVELS] 'Zoom level or comma separated list of zoom levels'
                                              --projection=[web_mercator|wgs84] 'Tile grid (Default: web_mercator)'
                                              --policy=[passthrough|clamp|wrap] 'Tile indices outside of the grid'
                                              --max-tiles=[NUM] 'Maximal number of tiles per zoom level'
                                              --format=[json|tiles] 'Output format (Default: json)'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Calculate tiles covering the bounding box of polygons"))
        .subcommand(SubCommand::with_name("extent")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--tile=<z/x/y> 'Tile address'
                                              --projection=[web_mercator|wgs84] 'Tile grid (Default: web_mercator)'
                                              -c, --config=[FILE] 'Load grid from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Print geographic extent of a tile"))
        .subcommand(SubCommand::with_name("genconfig")
                        .about("Generate configuration template"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("cover", Some(sub_m)) => {
                init_logger(sub_m);
                cover(sub_m);
            }
            ("extent", Some(sub_m)) => {
                init_logger(sub_m);
                extent(sub_m);
            }
            ("genconfig", Some(_)) => {
                println!("{}", TileCover::gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
