#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::device::Tle9201sg;
pub use crate::error::{Error, Result};
pub use crate::params::Direction;
