//! Rooted hierarchy of frames and the path queries over it
//!
//! Keeps the set of frames a world knows about together with their
//! single-parent relationships. Nodes live in a flat arena; each stores the
//! index of its parent and its children in insertion order, so traversals are
//! deterministic.
//!
//! # Example
//!
//! ```rust
//! use kinetree::{frame, Frame, FrameTree};
//!
//! frame!(struct N);
//! frame!(struct A);
//! frame!(struct B);
//!
//! let mut tree = FrameTree::new(N::id());
//! tree.insert(&N::id(), A::id()).unwrap();
//! tree.insert(&A::id(), B::id()).unwrap();
//!
//! assert_eq!(tree.path_to(&B::id()), vec![N::id(), A::id(), B::id()]);
//! assert!(tree.insert(&N::id(), B::id()).is_err());
//! ```

use crate::error::{KinematicsError, KinematicsResult};
use crate::frame::FrameId;
use std::collections::HashMap;

/// A node in the frame tree
#[derive(Debug, Clone)]
struct FrameNode {
    id: FrameId,
    /// Arena index of the parent (None for root)
    parent: Option<usize>,
    /// Arena indices of the children, in insertion order
    children: Vec<usize>,
}

/// Rooted tree of frames
///
/// Every frame appears at most once. The root is always present, so a tree is
/// never empty.
#[derive(Debug, Clone)]
pub struct FrameTree {
    nodes: Vec<FrameNode>,
    /// Arena index of every frame
    index: HashMap<FrameId, usize>,
}

impl FrameTree {
    /// Create a tree holding only its root frame
    pub fn new(root: FrameId) -> Self {
        let mut index = HashMap::new();
        index.insert(root.clone(), 0);

        Self {
            nodes: vec![FrameNode {
                id: root,
                parent: None,
                children: Vec::new(),
            }],
            index,
        }
    }

    /// Build a tree from `(from, to)` edges
    ///
    /// The first edge's source becomes the root. Edges are applied in order,
    /// so every source must already have been introduced by an earlier edge.
    ///
    /// # Errors
    /// * [`KinematicsError::EmptyTree`] if `edges` is empty
    /// * [`KinematicsError::ParentNotFound`] / [`KinematicsError::ChildAlreadyPresent`]
    ///   for the first edge that cannot be attached
    pub fn from_edges<I>(edges: I) -> KinematicsResult<Self>
    where
        I: IntoIterator<Item = (FrameId, FrameId)>,
    {
        let mut edges = edges.into_iter().peekable();
        let root = match edges.peek() {
            Some((from, _)) => from.clone(),
            None => return Err(KinematicsError::EmptyTree),
        };

        let mut tree = Self::new(root);
        for (from, to) in edges {
            tree.insert(&from, to)?;
        }
        Ok(tree)
    }

    /// Root frame
    pub fn root(&self) -> &FrameId {
        &self.nodes[0].id
    }

    /// Number of frames, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree holds at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if a frame exists
    pub fn contains(&self, frame: &FrameId) -> bool {
        self.index.contains_key(frame)
    }

    /// Arena index of a frame
    pub fn index_of(&self, frame: &FrameId) -> Option<usize> {
        self.index.get(frame).copied()
    }

    /// Frame stored at an arena index
    pub fn frame_at(&self, index: usize) -> Option<&FrameId> {
        self.nodes.get(index).map(|node| &node.id)
    }

    /// Parent of a frame (None for the root and for unknown frames)
    pub fn parent(&self, frame: &FrameId) -> Option<&FrameId> {
        let node = &self.nodes[self.index_of(frame)?];
        node.parent.map(|p| &self.nodes[p].id)
    }

    /// Children of a frame, in insertion order
    pub fn children(&self, frame: &FrameId) -> Vec<&FrameId> {
        self.index_of(frame)
            .map(|i| self.children_at(i).map(|c| &self.nodes[c].id).collect())
            .unwrap_or_default()
    }

    pub(crate) fn children_at(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[index].children.iter().copied()
    }

    /// Attach `to` as a new child of `from`
    ///
    /// # Returns
    /// Arena index of the new frame
    ///
    /// # Errors
    /// The tree is left unchanged and
    /// * [`KinematicsError::ParentNotFound`] is returned if `from` is absent
    /// * [`KinematicsError::ChildAlreadyPresent`] is returned if `to` is already in the tree
    pub fn insert(&mut self, from: &FrameId, to: FrameId) -> KinematicsResult<usize> {
        let parent = self
            .index_of(from)
            .ok_or_else(|| KinematicsError::ParentNotFound(from.to_string()))?;

        if self.contains(&to) {
            return Err(KinematicsError::ChildAlreadyPresent(to.to_string()));
        }

        let child = self.nodes.len();
        self.index.insert(to.clone(), child);
        self.nodes.push(FrameNode {
            id: to,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(child);

        Ok(child)
    }

    /// Frames from the root down to `frame`, both included
    ///
    /// Empty if `frame` is not in the tree.
    pub fn path_to(&self, frame: &FrameId) -> Vec<FrameId> {
        self.index_of(frame)
            .map(|i| self.path_indices(i).into_iter().map(|n| self.nodes[n].id.clone()).collect())
            .unwrap_or_default()
    }

    /// Arena indices from the root down to `index`
    pub(crate) fn path_indices(&self, index: usize) -> Vec<usize> {
        let mut path = vec![index];
        let mut current = index;

        while let Some(parent) = self.nodes[current].parent {
            path.push(parent);
            current = parent;
        }

        path.reverse();
        path
    }

    /// Chain of frames from `source` to `target` through their common ancestor
    ///
    /// # Errors
    /// [`KinematicsError::FrameNotInWorld`] if either frame is absent
    pub fn path_between(&self, source: &FrameId, target: &FrameId) -> KinematicsResult<Vec<FrameId>> {
        let lookup = |frame: &FrameId| {
            self.index_of(frame)
                .ok_or_else(|| KinematicsError::FrameNotInWorld(frame.to_string()))
        };
        let source_path = self.path_indices(lookup(source)?);
        let target_path = self.path_indices(lookup(target)?);

        // Length of the shared prefix; both paths start at the root
        let shared = source_path
            .iter()
            .zip(target_path.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let up = source_path[shared - 1..].iter().rev();
        let down = target_path[shared..].iter();

        Ok(up.chain(down).map(|&n| self.nodes[n].id.clone()).collect())
    }

    /// All frames in pre-order (parents before children, siblings in insertion order)
    pub fn frames(&self) -> Vec<&FrameId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];

        while let Some(n) = stack.pop() {
            out.push(&self.nodes[n].id);
            stack.extend(self.nodes[n].children.iter().rev());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &'static str) -> FrameId {
        FrameId::named::<f64>(name)
    }

    fn sample_tree() -> FrameTree {
        // N
        // ├─ A
        // │  ├─ C
        // │  └─ D
        // └─ B
        FrameTree::from_edges([
            (id("N"), id("A")),
            (id("N"), id("B")),
            (id("A"), id("C")),
            (id("A"), id("D")),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_tree_has_root() {
        let tree = FrameTree::new(id("world"));
        assert_eq!(tree.root(), &id("world"));
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(tree.contains(&id("world")));
        assert_eq!(tree.parent(&id("world")), None);
    }

    #[test]
    fn test_from_edges() {
        let tree = sample_tree();
        assert_eq!(tree.root(), &id("N"));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.parent(&id("C")), Some(&id("A")));
        assert_eq!(tree.children(&id("A")), vec![&id("C"), &id("D")]);
        assert!(tree.children(&id("unknown")).is_empty());
    }

    #[test]
    fn test_from_edges_empty() {
        let result = FrameTree::from_edges(Vec::<(FrameId, FrameId)>::new());
        assert!(matches!(result, Err(KinematicsError::EmptyTree)));
    }

    #[test]
    fn test_from_edges_rejects_orphan_edge() {
        let result = FrameTree::from_edges([(id("N"), id("A")), (id("X"), id("B"))]);
        assert!(matches!(result, Err(KinematicsError::ParentNotFound(name)) if name == "X"));
    }

    #[test]
    fn test_from_edges_rejects_duplicate() {
        let result = FrameTree::from_edges([(id("N"), id("A")), (id("A"), id("N"))]);
        assert!(matches!(result, Err(KinematicsError::ChildAlreadyPresent(name)) if name == "N"));
    }

    #[test]
    fn test_insert_leaves_tree_unchanged_on_error() {
        let mut tree = sample_tree();
        let before = tree.frames().into_iter().cloned().collect::<Vec<_>>();

        assert!(tree.insert(&id("missing"), id("E")).is_err());
        assert!(tree.insert(&id("B"), id("C")).is_err());

        let after = tree.frames().into_iter().cloned().collect::<Vec<_>>();
        assert_eq!(before, after);
        assert_eq!(tree.len(), 5);
        assert!(!tree.contains(&id("E")));
        assert_eq!(tree.parent(&id("C")), Some(&id("A")));
    }

    #[test]
    fn test_insert_returns_index() {
        let mut tree = FrameTree::new(id("N"));
        let a = tree.insert(&id("N"), id("A")).unwrap();
        assert_eq!(tree.index_of(&id("A")), Some(a));
        assert_eq!(tree.frame_at(a), Some(&id("A")));
    }

    #[test]
    fn test_path_to() {
        let tree = sample_tree();
        assert_eq!(tree.path_to(&id("N")), vec![id("N")]);
        assert_eq!(tree.path_to(&id("D")), vec![id("N"), id("A"), id("D")]);
        assert!(tree.path_to(&id("Z")).is_empty());
    }

    #[test]
    fn test_path_between() {
        let tree = sample_tree();
        assert_eq!(
            tree.path_between(&id("C"), &id("B")).unwrap(),
            vec![id("C"), id("A"), id("N"), id("B")]
        );
        assert_eq!(
            tree.path_between(&id("C"), &id("D")).unwrap(),
            vec![id("C"), id("A"), id("D")]
        );
        assert_eq!(tree.path_between(&id("N"), &id("C")).unwrap(), vec![id("N"), id("A"), id("C")]);
        assert_eq!(tree.path_between(&id("A"), &id("A")).unwrap(), vec![id("A")]);
        assert!(matches!(
            tree.path_between(&id("A"), &id("Z")),
            Err(KinematicsError::FrameNotInWorld(_))
        ));
    }

    #[test]
    fn test_frames_pre_order() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.frames().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["N", "A", "C", "D", "B"]);
    }

    #[test]
    fn test_scalar_type_is_part_of_identity() {
        let mut tree = FrameTree::new(id("N"));
        tree.insert(&id("N"), FrameId::named::<f32>("N")).unwrap();
        assert_eq!(tree.len(), 2);
    }
}
