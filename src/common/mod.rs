//! # Common Components
//!
//! Collaborators shared by the library API and the command-line tool.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`io`]: Reading payload files and PNG carriers

pub mod config;
pub mod io;
