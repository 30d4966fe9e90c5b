/*!
`Nodes`, a reference-counted interner over [`Node`](crate::node::Node) values.

Interning gives the reader and the in-memory model a single canonical allocation per distinct
node: two calls that intern value-equal nodes receive `NodeRef`s that point at the same
`Rc<Node>`, so callers that need to know "is this the same term" can compare references rather
than re-deriving full node equality. Entries are refcounted; once the last `NodeRef` for a node is
released via [`Nodes::deref`], the entry is evicted.
*/

use crate::node::Node;
use loomrdf_iri::UriView;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::error::Result;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A handle to an interned [`Node`]. Cloning a `NodeRef` is cheap (an `Rc` clone); it does not by
/// itself affect the interner's refcount, which is managed explicitly through [`Nodes::intern`]
/// and [`Nodes::deref`].
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(Rc<Node>);

impl NodeRef {
    pub fn node(&self) -> &Node {
        &self.0
    }
}

impl std::ops::Deref for NodeRef {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.string())
    }
}

struct Entry {
    node: Rc<Node>,
    ref_count: usize,
}

///
/// An interning table over `Node` values.
///
#[derive(Default)]
pub struct Nodes {
    entries: RefCell<HashMap<Node, Entry>>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Nodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `node`, incrementing its refcount. If a value-equal node is already present, the
    /// existing allocation is reused and returned.
    pub fn intern(&self, node: Node) -> NodeRef {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.get_mut(&node) {
            entry.ref_count += 1;
            return NodeRef(entry.node.clone());
        }
        let rc = Rc::new(node.clone());
        entries.insert(node, Entry { node: rc.clone(), ref_count: 1 });
        NodeRef(rc)
    }

    /// Interns `Node::token(node_type, value)`. Exists as a fast, infallible path for callers
    /// that have already validated `value`; it must hash and compare identically to a node built
    /// and interned any other way, so that repeated calls collapse onto one entry.
    pub fn token<S>(&self, node_type: crate::node::NodeType, value: S) -> NodeRef
    where
        S: Into<String>,
    {
        self.intern(Node::token(node_type, value))
    }

    pub fn literal<S>(&self, value: S) -> NodeRef
    where
        S: Into<String>,
    {
        self.intern(Node::literal(value))
    }

    pub fn literal_with_datatype<S1, S2>(&self, value: S1, datatype_iri: S2) -> Result<NodeRef>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Ok(self.intern(Node::literal_with_datatype(value, datatype_iri)?))
    }

    pub fn literal_with_language<S1, S2>(&self, value: S1, language: S2) -> Result<NodeRef>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Ok(self.intern(Node::literal_with_language(value, language)?))
    }

    pub fn uri<S>(&self, value: S) -> Result<NodeRef>
    where
        S: Into<String>,
    {
        Ok(self.intern(Node::uri_from_string(value)?))
    }

    pub fn parsed_uri(&self, view: &UriView) -> NodeRef {
        self.intern(Node::uri_from_parsed(view))
    }

    pub fn file_uri(&self, path: &str, hostname: Option<&str>) -> Result<NodeRef> {
        Ok(self.intern(Node::file_uri(path, hostname)?))
    }

    pub fn blank<S>(&self, id: S) -> Result<NodeRef>
    where
        S: Into<String>,
    {
        Ok(self.intern(Node::blank(id)?))
    }

    pub fn generate_blank(&self) -> NodeRef {
        self.intern(Node::generate_blank())
    }

    /// Decrements `node_ref`'s refcount, evicting the entry once it reaches zero.
    pub fn deref(&self, node_ref: &NodeRef) {
        let mut entries = self.entries.borrow_mut();
        let node = node_ref.node();
        let should_remove = match entries.get_mut(node) {
            Some(entry) => {
                entry.ref_count = entry.ref_count.saturating_sub(1);
                entry.ref_count == 0
            }
            None => false,
        };
        if should_remove {
            entries.remove(node);
        }
    }

    /// Looks up `node` without inserting it or changing any refcount.
    pub fn get(&self, node: &Node) -> Option<NodeRef> {
        self.entries.borrow().get(node).map(|entry| NodeRef(entry.node.clone()))
    }

    /// The number of distinct nodes currently interned.
    pub fn size(&self) -> usize {
        self.entries.borrow().len()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn interning_the_same_value_returns_the_same_allocation() {
        let nodes = Nodes::new();
        let a = nodes.token(NodeType::Literal, "x");
        let b = nodes.token(NodeType::Literal, "x");
        assert!(Rc::ptr_eq(&a.0, &b.0));
        assert_eq!(nodes.size(), 1);
    }

    #[test]
    fn deref_evicts_at_zero_refcount() {
        let nodes = Nodes::new();
        let a = nodes.token(NodeType::Literal, "x");
        nodes.deref(&a);
        assert_eq!(nodes.size(), 0);
    }

    #[test]
    fn deref_keeps_entry_while_other_refs_remain() {
        let nodes = Nodes::new();
        let a = nodes.token(NodeType::Literal, "x");
        let _b = nodes.token(NodeType::Literal, "x");
        nodes.deref(&a);
        assert_eq!(nodes.size(), 1);
    }

    #[test]
    fn get_does_not_change_refcount_or_insert() {
        let nodes = Nodes::new();
        let probe = Node::token(NodeType::Literal, "absent");
        assert!(nodes.get(&probe).is_none());
        assert_eq!(nodes.size(), 0);
    }
}
