//! Device actions: one function per CLI interaction, generic over [`Driver`].
//!
//! Each action renders its command template, checks the output against the
//! template's error map and parses the result.
//!
//! [`Driver`]: crate::driver::Driver

pub mod autoload;
pub mod mapping;
pub mod system;
