/*!
`Statement`: a transient triple or quad passed between the reader, the event sink, and the writer.
A `Statement` is not interned or stored in any index here; it simply bundles node references with
the abbreviation hints a pretty-printing writer uses and the source location a reader attaches.
*/

use crate::caret::Caret;
use crate::interner::NodeRef;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Hints describing how a statement's terms may be abbreviated when written back out (for
/// example, whether the subject repeats the previous statement's subject and so can be omitted in
/// favor of a `;` continuation).
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StatementFlags(u8);

impl StatementFlags {
    pub const NONE: Self = Self(0);
    pub const REPEATS_SUBJECT: Self = Self(0b001);
    pub const REPEATS_PREDICATE: Self = Self(0b010);
    pub const IS_COLLECTION_MEMBER: Self = Self(0b100);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for StatementFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

///
/// A single triple, or a quad when `graph` is set.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    subject: NodeRef,
    predicate: NodeRef,
    object: NodeRef,
    graph: Option<NodeRef>,
    flags: StatementFlags,
    caret: Option<Caret>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Statement {
    pub fn new(subject: NodeRef, predicate: NodeRef, object: NodeRef) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: None,
            flags: StatementFlags::NONE,
            caret: None,
        }
    }

    pub fn with_graph(mut self, graph: NodeRef) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_flags(mut self, flags: StatementFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_caret(mut self, caret: Caret) -> Self {
        self.caret = Some(caret);
        self
    }

    pub fn subject(&self) -> &NodeRef {
        &self.subject
    }

    pub fn predicate(&self) -> &NodeRef {
        &self.predicate
    }

    pub fn object(&self) -> &NodeRef {
        &self.object
    }

    pub fn graph(&self) -> Option<&NodeRef> {
        self.graph.as_ref()
    }

    pub fn flags(&self) -> StatementFlags {
        self.flags
    }

    pub fn caret(&self) -> Option<&Caret> {
        self.caret.as_ref()
    }

    pub fn is_quad(&self) -> bool {
        self.graph.is_some()
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Nodes;

    #[test]
    fn triple_has_no_graph_and_quad_does() {
        let nodes = Nodes::new();
        let s = nodes.uri("http://example.com/s").unwrap();
        let p = nodes.uri("http://example.com/p").unwrap();
        let o = nodes.literal("o");
        let g = nodes.uri("http://example.com/g").unwrap();

        let triple = Statement::new(s.clone(), p.clone(), o.clone());
        assert!(!triple.is_quad());

        let quad = Statement::new(s, p, o).with_graph(g);
        assert!(quad.is_quad());
    }

    #[test]
    fn flags_combine_with_bitor() {
        let combined = StatementFlags::REPEATS_SUBJECT | StatementFlags::REPEATS_PREDICATE;
        assert!(combined.contains(StatementFlags::REPEATS_SUBJECT));
        assert!(combined.contains(StatementFlags::REPEATS_PREDICATE));
        assert!(!combined.contains(StatementFlags::IS_COLLECTION_MEMBER));
    }
}
