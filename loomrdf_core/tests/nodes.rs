use loomrdf_core::{Node, NodeType};

#[test]
fn literal_nodes_without_meta_carry_neither_datatype_nor_language() {
    let node = Node::literal("hello");
    assert_eq!(node.node_type(), NodeType::Literal);
    assert_eq!(node.string(), "hello");
    assert_eq!(node.datatype(), None);
    assert_eq!(node.language(), None);
}

#[test]
fn numeric_constructors_attach_the_expected_xsd_datatype() {
    let n = Node::integer(-7);
    assert_eq!(n.string(), "-7");
    assert_eq!(n.datatype(), Some(loomrdf_core::node::XSD_INT));

    let b = Node::boolean(true);
    assert_eq!(b.string(), "true");
    assert_eq!(b.datatype(), Some(loomrdf_core::node::XSD_BOOLEAN));
}

#[test]
fn blank_nodes_reject_identifiers_starting_with_a_digit() {
    assert!(Node::blank("0bad").is_err());
    assert!(Node::blank("ok_1").is_ok());
}

#[cfg(feature = "binary_types")]
#[test]
fn hex_and_base64_constructors_round_trip_through_their_lexical_forms() {
    let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
    let hex = Node::hex(&bytes);
    assert_eq!(hex.string(), "DEADBEEF");

    let b64 = Node::base64(&bytes);
    assert_eq!(b64.datatype(), Some(loomrdf_core::node::XSD_BASE64_BINARY));
}
