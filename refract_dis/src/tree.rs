//! Nested-code enumeration.
//!
//! Code objects nest through their constant pools; viewers want the whole
//! family at once. The tree is an index-addressed arena: a code object
//! reachable through two pools gets two nodes, so node identity is the
//! path that found it, never pointer identity.

use std::sync::Arc;

use refract_core::CodeObject;
use smallvec::SmallVec;

/// Most constant pools hold only a handful of nested definitions.
const INLINE_CHILDREN: usize = 4;

/// Stable handle to a node in a [`CodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One code object and its direct nested definitions.
#[derive(Debug, Clone)]
pub struct CodeNode {
    /// The code object at this node.
    pub code: Arc<CodeObject>,
    /// Children in constant-pool order.
    pub children: SmallVec<[NodeId; INLINE_CHILDREN]>,
}

/// Ownership tree over a root code object and everything nested below it.
#[derive(Debug, Clone)]
pub struct CodeTree {
    nodes: Vec<CodeNode>,
}

impl CodeTree {
    /// Builds the tree from `root` with an explicit worklist. Code objects
    /// are immutable, so the nesting relation cannot cycle and the walk
    /// always terminates.
    #[must_use]
    pub fn build(root: Arc<CodeObject>) -> Self {
        let mut nodes = vec![CodeNode {
            code: root,
            children: SmallVec::new(),
        }];
        let mut pending = vec![NodeId(0)];
        while let Some(id) = pending.pop() {
            let code = Arc::clone(&nodes[id.index()].code);
            for nested in code.nested_codes() {
                let child = NodeId(nodes.len() as u32);
                nodes.push(CodeNode {
                    code: Arc::clone(nested),
                    children: SmallVec::new(),
                });
                nodes[id.index()].children.push(child);
                pending.push(child);
            }
        }
        CodeTree { nodes }
    }

    /// The root's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node lookup.
    ///
    /// # Panics
    ///
    /// Panics when `id` comes from a different tree and is out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &CodeNode {
        &self.nodes[id.index()]
    }

    /// Number of code objects in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built tree always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal, children in constant-pool order, each node
    /// paired with its depth (root = 0).
    pub fn depth_first(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        DepthFirst {
            tree: self,
            stack: vec![(self.root(), 0)],
        }
    }
}

struct DepthFirst<'a> {
    tree: &'a CodeTree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for DepthFirst<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<(NodeId, usize)> {
        let (id, depth) = self.stack.pop()?;
        for &child in self.tree.node(id).children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((id, depth))
    }
}

// =============================================================================
// Tests
// =============================================================================
