//! Component tree
//!
//! Components live in an arena owned by [`ComponentTree`]. Each node keeps
//! its parent's id and the ids of the children it owns, so lookups such as
//! "the enclosing project" walk upward through ids instead of holding
//! back-pointers.

use std::any::Any;
use std::fmt;

use crate::error::{Error, Result};
use crate::synth::SynthContext;

/// Identifier of a node in a [`ComponentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upcast helper so typed lookups can downcast boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A node's behaviour during the lifecycle phases.
///
/// Both hooks default to doing nothing, so purely structural components
/// only need an empty `impl`.
pub trait Component: AsAny {
    /// Write this component's artifacts. Called once per synthesis, in
    /// pre-order, after all declaration is complete.
    fn synthesize(&self, _ctx: &SynthContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Run after every component synthesized successfully.
    fn post_synthesize(&self, _ctx: &SynthContext<'_>) -> Result<()> {
        Ok(())
    }
}

struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    component: Box<dyn Component>,
}

/// Arena-backed tree of components
pub struct ComponentTree {
    nodes: Vec<Node>,
}

impl ComponentTree {
    /// Create a tree with a single root component.
    pub fn new<C: Component>(name: impl Into<String>, root: C) -> Self {
        Self {
            nodes: vec![Node {
                name: name.into(),
                parent: None,
                children: Vec::new(),
                component: Box::new(root),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach a component as the last child of `scope`.
    ///
    /// Sibling names must be unique.
    ///
    /// # Panics
    ///
    /// Panics if `scope` does not belong to this tree.
    pub fn add<C: Component>(
        &mut self,
        scope: NodeId,
        name: impl Into<String>,
        component: C,
    ) -> Result<NodeId> {
        let name = name.into();
        if self.child(scope, &name).is_some() {
            return Err(Error::DuplicateComponent {
                scope: self.path(scope),
                name,
            });
        }

        let id = NodeId(self.nodes.len());
        tracing::debug!(scope = %self.path(scope), %name, "adding component");
        self.nodes.push(Node {
            name,
            parent: Some(scope),
            children: Vec::new(),
            component: Box::new(component),
        });
        self.node_mut(scope).children.push(id);
        Ok(id)
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The child of `scope` called `name`, if any.
    pub fn child(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.children(scope)
            .iter()
            .copied()
            .find(|&child| self.node(child).name == name)
    }

    /// Names from the root down to `id`, joined with `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self.ancestors(id).map(|a| self.name(a)).collect();
        names.reverse();
        names.join("/")
    }

    /// The component at `id`, if it is a `C`.
    pub fn get<C: Component>(&self, id: NodeId) -> Option<&C> {
        self.nodes
            .get(id.0)
            .and_then(|node| (*node.component).as_any().downcast_ref::<C>())
    }

    pub fn component(&self, id: NodeId) -> &dyn Component {
        self.node(id).component.as_ref()
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Nearest node at or above `id` whose component is a `C`.
    pub fn find_ancestor<C: Component>(&self, id: NodeId) -> Option<(NodeId, &C)> {
        self.ancestors(id)
            .find_map(|a| self.get::<C>(a).map(|component| (a, component)))
    }

    /// `id` and everything below it, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.descendants(self.root()).into_iter().map(|id| self.path(id)))
            .finish()
    }
}

/// Iterator returned by [`ComponentTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a ComponentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
