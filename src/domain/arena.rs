use std::collections::BTreeMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::transform::Transform;

/// Tree node in the arena-based frame hierarchy.
#[derive(Debug, Clone)]
pub struct FrameNode {
    name: String,
    /// Maps points from this frame into the parent frame; identity for the root
    transform: Transform,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Child indices keyed by name, so iteration is lexicographic
    children: BTreeMap<String, Index>,
}

impl FrameNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &BTreeMap<String, Index> {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for FrameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based storage for one frame tree.
///
/// Parent links are arena indices, so the tree owns every node exactly once
/// and upward walks never borrow through a back-pointer.
#[derive(Debug)]
pub struct FrameArena {
    arena: Arena<FrameNode>,
    root: Index,
}

impl FrameArena {
    pub fn new(root_name: &str) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(FrameNode {
            name: root_name.to_string(),
            transform: Transform::identity(),
            parent: None,
            children: BTreeMap::new(),
        });
        Self { arena, root }
    }

    /// Insert a node below `parent`. The caller guarantees `parent` is live
    /// and `name` is not yet used anywhere in the tree.
    #[instrument(level = "trace", skip(self, transform))]
    pub fn insert_node(&mut self, name: &str, transform: Transform, parent: Index) -> Index {
        let node_idx = self.arena.insert(FrameNode {
            name: name.to_string(),
            transform,
            parent: Some(parent),
            children: BTreeMap::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.insert(name.to_string(), node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&FrameNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Depth-first walk from the root, children in name order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Walk from `idx` upward, yielding the node itself first and the root last.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(idx),
        }
    }

    /// Number of levels; a tree holding only the root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _, _)| depth + 1).max().unwrap_or(0)
    }

    /// Names of all nodes without children, in traversal order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, _, node)| node.children.is_empty())
            .map(|(_, _, node)| node.name.clone())
            .collect()
    }
}

impl std::ops::Index<Index> for FrameArena {
    type Output = FrameNode;

    fn index(&self, idx: Index) -> &FrameNode {
        &self.arena[idx]
    }
}

pub struct TreeIterator<'a> {
    arena: &'a FrameArena,
    stack: Vec<(usize, Index)>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a FrameArena) -> Self {
        Self {
            arena,
            stack: vec![(0, arena.root)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    /// (depth, index, node)
    type Item = (usize, Index, &'a FrameNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, current_idx)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for lexicographic traversal
                for &child in node.children.values().rev() {
                    self.stack.push((depth + 1, child));
                }
                return Some((depth, current_idx, node));
            }
        }
        None
    }
}

pub struct Ancestors<'a> {
    arena: &'a FrameArena,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a FrameNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.arena.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}
