//! Tests for loading frame trees from TOML definition files

use std::f64::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use tempfile::TempDir;

use frametree::application::{load_definition, ApplicationError, FrameDefinition};
use frametree::domain::{rot_z, trans, FrameError, Point, PrintOptions, Transformer};

fn create_definition(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write definition file");
    path
}

const ROBOT: &str = r#"
root = "base"

[[frame]]
parent = "base"
name = "arm"
translation = [1.0, 0.0, 0.0]
rotation = [{ axis = "z", angle = 1.5707963267948966 }]

[[frame]]
parent = "arm"
name = "hand"
translation = [0.0, 1.0, 0.0]

[[frame]]
parent = "base"
name = "camera"
matrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 2], [0, 0, 0, 1]]
"#;

#[test]
fn given_definition_file_when_loading_then_equals_manual_registration() {
    let temp = TempDir::new().unwrap();
    let path = create_definition(&temp, "robot.toml", ROBOT);

    let loaded = load_definition(&path, "unused").unwrap();

    let mut manual = Transformer::new("base");
    manual
        .register("base", "arm", trans(1.0, 0.0, 0.0) * rot_z(FRAC_PI_2))
        .unwrap();
    manual.register("arm", "hand", trans(0.0, 1.0, 0.0)).unwrap();
    manual.register("base", "camera", trans(0.0, 0.0, 2.0)).unwrap();

    assert_eq!(
        loaded.render_tree(&PrintOptions::default()),
        manual.render_tree(&PrintOptions::default())
    );
    let p = Point::new(0.5, 0.5, 0.5);
    assert_relative_eq!(
        loaded.transform_point("hand", "camera", &p).unwrap(),
        manual.transform_point("hand", "camera", &p).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn given_rotated_arm_when_transforming_hand_origin_then_offset_is_rotated() {
    let temp = TempDir::new().unwrap();
    let path = create_definition(&temp, "robot.toml", ROBOT);
    let tf = load_definition(&path, "base").unwrap();

    // hand sits one unit along arm's y; the quarter turn maps that onto -x,
    // cancelling the arm's offset
    let p = tf.transform_point("hand", "base", &Point::zeros()).unwrap();
    assert_relative_eq!(p, Point::new(0.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn given_no_root_entry_when_loading_then_default_root_used() {
    let temp = TempDir::new().unwrap();
    let path = create_definition(
        &temp,
        "frames.toml",
        "[[frame]]\nparent = \"world\"\nname = \"a\"\n",
    );

    let tf = load_definition(&path, "world").unwrap();

    assert_eq!(tf.root_name(), "world");
    assert_eq!(tf.chain_to_root("a").unwrap(), vec!["a", "world"]);
}

#[test]
fn given_duplicate_frame_when_loading_then_duplicate_name() {
    let temp = TempDir::new().unwrap();
    let path = create_definition(
        &temp,
        "dup.toml",
        "[[frame]]\nparent = \"base\"\nname = \"a\"\n\n[[frame]]\nparent = \"base\"\nname = \"a\"\n",
    );

    let err = load_definition(&path, "base").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Frame(FrameError::DuplicateName(ref name)) if name == "a"
    ));
}

#[test]
fn given_missing_file_when_loading_then_operation_failed_with_path() {
    let err = load_definition(Path::new("/nonexistent/frames.toml"), "base").unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("/nonexistent/frames.toml"), "{err}");
}

#[test]
fn given_malformed_toml_when_loading_then_definition_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = create_definition(&temp, "broken.toml", "[[frame]\nparent = ");

    let err = load_definition(&path, "base").unwrap_err();

    match err {
        ApplicationError::Definition { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected definition error, got {other:?}"),
    }
}

#[test]
fn given_matrix_and_rotation_when_building_then_definition_error() {
    let definition = FrameDefinition::parse(
        r#"
[[frame]]
parent = "base"
name = "a"
rotation = [{ axis = "x", angle = 0.1 }]
matrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
"#,
        Path::new("mixed.toml"),
    )
    .unwrap();

    let err = definition.build("base").unwrap_err();

    assert!(matches!(err, ApplicationError::Definition { .. }), "{err}");
    assert!(err.to_string().contains("mixed.toml"), "{err}");
}
