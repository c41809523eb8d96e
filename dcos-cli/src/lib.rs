//! # DC/OS CLI Library
//!
//! Command definitions and handlers for the `dcos` command-line tool.

pub mod cli;
