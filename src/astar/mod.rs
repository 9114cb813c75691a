// SPDX-License-Identifier: MIT

mod error;
mod frontier;
mod planner;

pub use error::RouteError;
pub use planner::{Route, RoutePlanner};
