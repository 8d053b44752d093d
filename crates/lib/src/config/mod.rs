//! Deploy configuration.
//!
//! Settings come from one or more JSON files (see [`CONFIG_FILES`](crate::consts::CONFIG_FILES)).
//! Files are merged shallowly in order, so a later file replaces whole top-level values of an
//! earlier one, and the merged document is then validated into a [`Config`].

mod load;
mod types;

pub use load::{default_sources, load_config, merge_documents};
pub use types::{Config, ConfigError, REQUIRED_FIELDS, is_truthy};
