//! Domain layer: the frame tree and its transform math
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod format;
pub mod transform;
pub mod transformer;

pub use arena::{FrameArena, FrameNode};
pub use error::{FrameError, FrameResult};
pub use format::PrintOptions;
pub use transform::{rot_x, rot_y, rot_z, trans, Point, Transform};
pub use transformer::{Transformer, TreeNodeConvert, DEFAULT_ROOT};
