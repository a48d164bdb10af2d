//! ascii-mosaic library crate.
//!
//! Renders color images as mosaics of colored characters. The conversion
//! engine lives in [`ascii`]; [`raster`] defines the buffer roles it works
//! on, while [`config`] and [`cli`] make up the command-line front end.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod raster;
