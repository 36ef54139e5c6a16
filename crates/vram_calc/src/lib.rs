//! VRAM Calc - command-line front end for `vram_core`

pub mod catalog;
pub mod cli;
pub mod config;
pub mod estimate;
pub mod i18n;
pub mod init;
pub mod plan;
pub mod render;
