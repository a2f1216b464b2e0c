//! Frame definition files: a TOML description of a frame tree.
//!
//! ```toml
//! root = "base"
//!
//! [[frame]]
//! parent = "base"
//! name = "arm"
//! translation = [1.0, 0.0, 0.0]
//! rotation = [{ axis = "z", angle = 1.5708 }]
//!
//! [[frame]]
//! parent = "arm"
//! name = "tool"
//! matrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0.2], [0, 0, 0, 1]]
//! ```
//!
//! Frames are registered in file order, so a parent has to appear before
//! its children.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, TomlResultExt};
use crate::domain::transform::from_rows;
use crate::domain::{rot_x, rot_y, rot_z, trans, Transform, Transformer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation about one coordinate axis, angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisRotation {
    pub axis: Axis,
    pub angle: f64,
}

impl AxisRotation {
    pub fn matrix(&self) -> Transform {
        match self.axis {
            Axis::X => rot_x(self.angle),
            Axis::Y => rot_y(self.angle),
            Axis::Z => rot_z(self.angle),
        }
    }
}

/// One `[[frame]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameSpec {
    pub parent: String,
    pub name: String,
    /// Offset of this frame's origin in the parent frame
    #[serde(default)]
    pub translation: Option<[f64; 3]>,
    /// Rotations applied after the translation, in order
    #[serde(default)]
    pub rotation: Vec<AxisRotation>,
    /// Literal row-major homogeneous matrix; excludes `translation` and `rotation`
    #[serde(default)]
    pub matrix: Option<[[f64; 4]; 4]>,
}

impl FrameSpec {
    /// Transform mapping points in this frame into its parent.
    pub fn transform(&self) -> Result<Transform, String> {
        if self.name.is_empty() {
            return Err("frame name must not be empty".to_string());
        }
        if let Some(rows) = &self.matrix {
            if self.translation.is_some() || !self.rotation.is_empty() {
                return Err(format!(
                    "frame {}: matrix cannot be combined with translation or rotation",
                    self.name
                ));
            }
            return Ok(from_rows(rows));
        }

        let [x, y, z] = self.translation.unwrap_or_default();
        Ok(self
            .rotation
            .iter()
            .fold(trans(x, y, z), |acc, r| acc * r.matrix()))
    }
}

/// Parsed content of a definition file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameDefinition {
    /// Root frame name; the configured default is used when absent
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default, rename = "frame")]
    pub frames: Vec<FrameSpec>,
    #[serde(skip)]
    pub source: PathBuf,
}

impl FrameDefinition {
    /// Parse definition text; `source` is only used in error messages.
    pub fn parse(content: &str, source: &Path) -> ApplicationResult<Self> {
        let mut definition: Self = toml::from_str(content).with_definition_context(source)?;
        definition.source = source.to_path_buf();
        Ok(definition)
    }

    #[instrument(level = "debug")]
    pub fn from_file(path: &Path) -> ApplicationResult<Self> {
        let content = fs::read_to_string(path).with_path_context("read frame definition", path)?;
        Self::parse(&content, path)
    }

    /// Register every frame, in file order, into a fresh tree.
    #[instrument(level = "debug", skip(self), fields(source = %self.source.display()))]
    pub fn build(&self, default_root: &str) -> ApplicationResult<Transformer> {
        let root = self.root.as_deref().unwrap_or(default_root);
        let mut transformer = Transformer::new(root);

        for spec in &self.frames {
            let transform = spec.transform().map_err(|message| ApplicationError::Definition {
                path: self.source.clone(),
                message,
            })?;
            transformer.register(&spec.parent, &spec.name, transform)?;
            debug!("frame {} <- {}", spec.name, spec.parent);
        }

        info!(
            "loaded {} frames below {} from {}",
            self.frames.len(),
            root,
            self.source.display()
        );
        Ok(transformer)
    }
}

/// Read a definition file and build its frame tree.
pub fn load_definition(path: &Path, default_root: &str) -> ApplicationResult<Transformer> {
    FrameDefinition::from_file(path)?.build(default_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FrameError, Point};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn parse(content: &str) -> ApplicationResult<FrameDefinition> {
        FrameDefinition::parse(content, Path::new("inline.toml"))
    }

    #[test]
    fn given_translation_and_rotation_when_building_then_rotation_applied_after_translation() {
        let spec = FrameSpec {
            parent: "base".into(),
            name: "arm".into(),
            translation: Some([1.0, 2.0, 3.0]),
            rotation: vec![AxisRotation {
                axis: Axis::Z,
                angle: FRAC_PI_2,
            }],
            matrix: None,
        };
        let expected = trans(1.0, 2.0, 3.0) * rot_z(FRAC_PI_2);
        assert_relative_eq!(spec.transform().unwrap(), expected);
    }

    #[test]
    fn given_matrix_with_translation_when_building_then_rejected() {
        let spec = FrameSpec {
            parent: "base".into(),
            name: "arm".into(),
            translation: Some([1.0, 0.0, 0.0]),
            rotation: vec![],
            matrix: Some([[1.0, 0.0, 0.0, 0.0]; 4]),
        };
        let message = spec.transform().unwrap_err();
        assert!(message.contains("matrix"), "{message}");
    }

    #[test]
    fn given_minimal_document_when_parsing_then_defaults_apply() {
        let definition = parse("").unwrap();
        assert_eq!(definition.root, None);
        assert!(definition.frames.is_empty());

        let tf = definition.build("world").unwrap();
        assert_eq!(tf.root_name(), "world");
    }

    #[test]
    fn given_chain_document_when_building_then_matches_register_calls() {
        let definition = parse(
            r#"
root = "base"

[[frame]]
parent = "base"
name = "arm"
translation = [1, 0, 0]

[[frame]]
parent = "arm"
name = "hand"
matrix = [[1, 0, 0, 0], [0, 1, 0, 1], [0, 0, 1, 0], [0, 0, 0, 1]]
"#,
        )
        .unwrap();
        let tf = definition.build("ignored").unwrap();
        let p = tf.transform_point("hand", "base", &Point::zeros()).unwrap();
        assert_relative_eq!(p, Point::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn given_forward_reference_when_building_then_unknown_frame() {
        let definition = parse(
            r#"
[[frame]]
parent = "arm"
name = "hand"

[[frame]]
parent = "base"
name = "arm"
"#,
        )
        .unwrap();
        let err = definition.build("base").unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Frame(FrameError::UnknownFrame(ref name)) if name == "arm"
        ));
    }

    #[test]
    fn given_unknown_key_when_parsing_then_definition_error() {
        let err = parse("[[frame]]\nparent = \"base\"\nname = \"a\"\nscale = 2\n").unwrap_err();
        assert!(matches!(err, ApplicationError::Definition { .. }), "{err}");
    }

    #[test]
    fn given_unknown_axis_when_parsing_then_definition_error() {
        let err = parse(
            "[[frame]]\nparent = \"base\"\nname = \"a\"\nrotation = [{ axis = \"w\", angle = 1.0 }]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Definition { .. }), "{err}");
    }
}
