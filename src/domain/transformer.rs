//! Frame tree manager: registration, lookup, point transforms and dumps.

use std::collections::HashMap;
use std::io::{self, Write};

use generational_arena::Index;
use termtree::Tree;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{FrameArena, FrameNode};
use crate::domain::error::{FrameError, FrameResult};
use crate::domain::format::PrintOptions;
use crate::domain::transform::{from_homogeneous, to_homogeneous, Point, Transform};

/// Name of the root frame when none is given.
pub const DEFAULT_ROOT: &str = "base";

/// Manages a tree of coordinate frames.
///
/// Every frame except the root stores the transform that maps its points
/// into its parent's frame. Points are moved between arbitrary frames by
/// going up to the root from both ends, so the tree is never descended.
#[derive(Debug)]
pub struct Transformer {
    tree: FrameArena,
    registry: HashMap<String, Index>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl Transformer {
    pub fn new(root_name: &str) -> Self {
        let tree = FrameArena::new(root_name);
        let registry = HashMap::from([(root_name.to_string(), tree.root())]);
        Self { tree, registry }
    }

    pub fn root_name(&self) -> &str {
        self.node(self.tree.root()).name()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Add `child` below the existing frame `parent`.
    ///
    /// `transform` maps points given in `child` into `parent`. The tree is
    /// left untouched when either name check fails.
    ///
    /// # Errors
    ///
    /// * `DuplicateName` if `child` is already registered.
    /// * `UnknownFrame` if `parent` is not registered.
    #[instrument(level = "debug", skip(self, transform))]
    pub fn register(&mut self, parent: &str, child: &str, transform: Transform) -> FrameResult<()> {
        if self.registry.contains_key(child) {
            return Err(FrameError::DuplicateName(child.to_string()));
        }
        let parent_idx = self.index_of(parent)?;
        let child_idx = self.tree.insert_node(child, transform, parent_idx);
        self.registry.insert(child.to_string(), child_idx);
        debug!("registered {} under {}", child, parent);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> FrameResult<&FrameNode> {
        self.index_of(name).map(|idx| self.node(idx))
    }

    pub fn parent_of(&self, name: &str) -> FrameResult<Option<&str>> {
        let node = self.lookup(name)?;
        Ok(node.parent().map(|idx| self.node(idx).name()))
    }

    /// All registered frame names, sorted.
    pub fn frame_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names from `name` up to and including the root.
    pub fn chain_to_root(&self, name: &str) -> FrameResult<Vec<String>> {
        let idx = self.index_of(name)?;
        Ok(self
            .tree
            .ancestors(idx)
            .map(|(_, node)| node.name().to_string())
            .collect())
    }

    /// Composed transform mapping points in `name` into the root frame.
    ///
    /// Each ancestor met on the way up is multiplied on the left, so the
    /// frame nearest the root is applied last.
    #[instrument(level = "trace", skip(self))]
    pub fn transform_to_root(&self, name: &str) -> FrameResult<Transform> {
        let idx = self.index_of(name)?;
        Ok(self.compose_to_root(idx))
    }

    /// Composed transform mapping points in `src` into `dest`.
    #[instrument(level = "debug", skip(self))]
    pub fn transform_between(&self, src: &str, dest: &str) -> FrameResult<Transform> {
        let src_to_root = self.transform_to_root(src)?;
        let root_to_dest = self.root_to(dest)?;
        Ok(root_to_dest * src_to_root)
    }

    /// Express `point`, given in `src` coordinates, in `dest` coordinates.
    ///
    /// # Errors
    ///
    /// * `UnknownFrame` if either frame is not registered.
    /// * `SingularTransform` if the chain from `dest` to the root cannot be
    ///   inverted.
    #[instrument(level = "debug", skip(self))]
    pub fn transform_point(&self, src: &str, dest: &str, point: &Point) -> FrameResult<Point> {
        let point_h = to_homogeneous(point);

        let src_to_root = self.transform_to_root(src)?;
        let in_root = src_to_root * point_h;

        let root_to_dest = self.root_to(dest)?;
        let in_dest = root_to_dest * in_root;

        trace!("root frame point: {:?}", in_root);
        Ok(from_homogeneous(&in_dest))
    }

    /// Write the tree to `out`: the root name on its own line, then each
    /// descendant, children in name order, indented by depth and followed by
    /// the 16 coefficients of its transform in row-major order.
    #[instrument(level = "debug", skip(self, out))]
    pub fn print_tree<W: Write>(&self, out: &mut W, options: &PrintOptions) -> io::Result<()> {
        for (depth, _, node) in self.tree.iter() {
            if node.is_root() {
                writeln!(out, "{}", node.name())?;
            } else {
                writeln!(
                    out,
                    "{}{} {}",
                    options.indent(depth),
                    node.name(),
                    options.coefficients(node.transform())
                )?;
            }
        }
        Ok(())
    }

    /// Same output as `print_tree`, collected into a string.
    pub fn render_tree(&self, options: &PrintOptions) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.print_tree(&mut buf, options);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Number of levels; a tree with only the root has depth 1.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Frames without children, sorted.
    pub fn leaf_frames(&self) -> Vec<String> {
        let mut leaves = self.tree.leaf_nodes();
        leaves.sort();
        leaves
    }

    fn index_of(&self, name: &str) -> FrameResult<Index> {
        self.registry
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::UnknownFrame(name.to_string()))
    }

    fn node(&self, idx: Index) -> &FrameNode {
        // Registry and arena are only ever extended together, and nothing is removed
        &self.tree[idx]
    }

    fn compose_to_root(&self, idx: Index) -> Transform {
        self.tree
            .ancestors(idx)
            .filter(|(_, node)| !node.is_root())
            .fold(Transform::identity(), |acc, (_, node)| node.transform() * acc)
    }

    fn root_to(&self, dest: &str) -> FrameResult<Transform> {
        self.transform_to_root(dest)?
            .try_inverse()
            .ok_or_else(|| FrameError::SingularTransform(dest.to_string()))
    }
}

/// Names-only view of the frame tree for terminal display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Transformer {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &FrameArena, node: &FrameNode) -> Tree<String> {
            let leaves = node
                .children()
                .values()
                .filter_map(|&child| arena.get_node(child))
                .map(|child| build_tree(arena, child));
            Tree::new(node.name().to_string()).with_leaves(leaves)
        }

        build_tree(&self.tree, self.node(self.tree.root()))
    }
}
