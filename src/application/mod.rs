//! Application layer: building frame trees from definition files
//!
//! This layer feeds domain operations from TOML documents on disk.

pub mod definition;
pub mod error;
pub mod error_ext;

pub use definition::{load_definition, Axis, AxisRotation, FrameDefinition, FrameSpec};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{IoResultExt, TomlResultExt};
