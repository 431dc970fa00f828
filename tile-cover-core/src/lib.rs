//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod core;
mod error;
pub mod service;

pub use crate::error::{Error, Result};
pub use crate::service::cover::{tile_cover, CoverResult, TileCover, ZoomLevels};
