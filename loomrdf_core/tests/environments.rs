use loomrdf_core::Env;

#[test]
fn expand_prefers_a_bound_curie_prefix_over_a_relative_resolve() {
    let mut env = Env::new();
    env.set_base_uri("http://example.com/docs/").unwrap();
    env.set_prefix("ex", "http://example.com/ns#").unwrap();

    assert_eq!(env.expand("ex:Widget").unwrap().to_string(), "http://example.com/ns#Widget");
    assert_eq!(env.expand("page.html").unwrap().to_string(), "http://example.com/docs/page.html");
}

#[test]
fn qualify_round_trips_an_expanded_curie() {
    let mut env = Env::new();
    env.set_base_uri("http://example.com/").unwrap();
    env.set_prefix("ex", "http://example.com/ns#").unwrap();

    let expanded = env.expand("ex:Widget").unwrap();
    assert_eq!(env.qualify(&expanded).unwrap(), "ex:Widget");
}

#[test]
fn setting_an_existing_prefix_name_replaces_its_namespace() {
    let mut env = Env::new();
    env.set_base_uri("http://example.com/").unwrap();
    env.set_prefix("ex", "http://example.com/one#").unwrap();
    env.set_prefix("ex", "http://example.com/two#").unwrap();

    assert_eq!(env.prefix("ex").unwrap().to_string(), "http://example.com/two#");
    assert_eq!(env.prefixes().count(), 1);
}
