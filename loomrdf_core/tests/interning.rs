use loomrdf_core::{NodeType, Nodes, Statement};

#[test]
fn same_token_value_yields_the_same_interned_reference() {
    let nodes = Nodes::new();
    let a = nodes.token(NodeType::Uri, "http://example.com/a");
    let b = nodes.token(NodeType::Uri, "http://example.com/a");
    assert_eq!(a, b);
    assert_eq!(nodes.size(), 1);
}

#[test]
fn statements_hold_references_into_the_same_interner() {
    let nodes = Nodes::new();
    let s = nodes.uri("http://example.com/s").unwrap();
    let p = nodes.uri("http://example.com/p").unwrap();
    let o = nodes.literal_with_language("bonjour", "fr").unwrap();

    let statement = Statement::new(s, p, o);
    assert_eq!(statement.object().language(), Some("fr"));
    assert!(!statement.is_quad());
}
