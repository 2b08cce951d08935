//! Library side of the `cdf-inspect` binary.

pub mod checksum;
pub mod commands;
pub mod logging;
pub mod render;
