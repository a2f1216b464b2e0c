//! Tree of named coordinate frames connected by rigid homogeneous transforms.
//!
//! ```
//! use frametree::domain::{trans, Point, Transformer};
//!
//! let mut tf = Transformer::new("base");
//! tf.register("base", "arm", trans(1.0, 0.0, 0.0)).unwrap();
//! tf.register("arm", "hand", trans(0.0, 1.0, 0.0)).unwrap();
//!
//! let p = tf.transform_point("hand", "base", &Point::zeros()).unwrap();
//! assert!((p - Point::new(1.0, 1.0, 0.0)).norm() < 1e-12);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
