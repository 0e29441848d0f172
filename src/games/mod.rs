//! Game implementations.
//!
//! Each game is pure data over the engine: a configuration, a schedule, an
//! operator table and goal rules.

pub mod city_without_walls;
pub mod coverage_clash;

pub use city_without_walls::CityWithoutWalls;
pub use coverage_clash::CoverageClash;
