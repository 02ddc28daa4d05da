//! Command templates, error maps and firmware dialects.

mod dialect;
pub mod errors;
pub mod template;

pub use dialect::{Dialect, Operation};
pub use errors::{ErrorMap, ErrorRule, ErrorSet};
pub use template::CommandTemplate;
