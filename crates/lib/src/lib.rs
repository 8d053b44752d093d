//! bouncer-lib: deploy pipeline for the bouncer redirect function
//!
//! This crate provides the stages the `bouncer` CLI strings together:
//! - `config`: layered JSON deploy settings, merged and validated
//! - `runner`: the seam through which external tools are invoked
//! - `build`: stages the handler and packages it into an archive
//! - `deploy`: hands the archive to the infrastructure tool
//! - `pipeline`: runs the three in order

pub mod build;
pub mod config;
pub mod consts;
pub mod deploy;
pub mod pipeline;
pub mod runner;
mod util;
