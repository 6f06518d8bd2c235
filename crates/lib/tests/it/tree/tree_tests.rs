//! Tree lookup, equality, visitors, and the textual dump.

use arbor::tree::{Node, Property, Tree};
use arbor::wire::WireValue;

fn sample_tree() -> Tree {
    // root
    // ├── general
    // │   ├── volume = 80
    // │   └── theme = "dark"
    // └── enabled = true
    let mut general = Tree::new("general");
    general.put(Property::new("volume", 80i32));
    general.put(Property::new("theme", "dark"));
    let mut root = Tree::new("root");
    root.put(general);
    root.put(Property::new("enabled", true));
    root
}

// ===== BASIC OPERATIONS =====

#[test]
fn test_put_and_get_property() {
    let mut root = Tree::new("root");
    root.put(Property::new("x", 5i32));

    let node = root.get(["x"]).expect("x should resolve");
    assert!(node.is_property());
    let property = root.get_property(["x"]).expect("x should be a property");
    assert_eq!(property.get_as::<i32>(), Some(5));
    assert_eq!(root.get_as::<i32>(["x"]), Some(5));
}

#[test]
fn test_put_replaces_same_id() {
    let mut root = Tree::new("root");
    root.put(Property::new("x", 1i32));
    root.put(Property::new("x", 2i32));

    assert_eq!(root.len(), 1);
    assert_eq!(root.get_as::<i32>(["x"]), Some(2));
}

#[test]
fn test_nested_path_lookup() {
    let root = sample_tree();

    assert_eq!(root.get_as::<i32>(["general", "volume"]), Some(80));
    assert_eq!(root.get_as::<&str>(["general", "theme"]), Some("dark"));
    assert!(root.get_child(["general"]).is_some());
    assert!(root.get(["general", "missing"]).is_none());
    assert!(root.get(["missing", "volume"]).is_none());
}

#[test]
fn test_overshooting_a_property_returns_the_property() {
    let root = sample_tree();

    // Extra path segments past a property are silently ignored
    let node = root.get(["enabled", "way", "too", "deep"]).expect("walk ends at the property");
    assert_eq!(node.id(), "enabled");
    assert!(node.is_property());
}

#[test]
fn test_kind_narrowing_misses_are_not_errors() {
    let root = sample_tree();

    // "general" is a tree, not a property; "enabled" is the reverse
    assert!(root.get_property(["general"]).is_none());
    assert!(root.get_child(["enabled"]).is_none());
    // Both still resolve as plain nodes
    assert!(root.get(["general"]).is_some());
    assert!(root.get(["enabled"]).is_some());
}

#[test]
fn test_empty_path_resolves_to_none() {
    let root = sample_tree();
    assert!(root.get(std::iter::empty::<&str>()).is_none());
}

#[test]
fn test_with_children_copies_nodes_in() {
    let tree = Tree::with_children(
        "root",
        [
            Node::Property(Property::new("a", 1i32)),
            Node::Property(Property::new("b", 2i32)),
        ],
    );
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get_as::<i32>(["b"]), Some(2));
}

// ===== VISITORS =====

#[test]
fn test_on_all_visits_direct_children_only() {
    let root = sample_tree();

    let mut seen = Vec::new();
    root.on_all(|id, _| seen.push(id.to_string()));
    seen.sort();
    assert_eq!(seen, ["enabled", "general"]);
}

#[test]
fn test_on_all_properties_skips_subtrees() {
    let root = sample_tree();

    let mut seen = Vec::new();
    root.on_all_properties(|id, p| {
        seen.push((id.to_string(), p.value().clone()));
    });
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "enabled");
    assert_eq!(seen[0].1, WireValue::Bool(true));
}

// ===== EQUALITY =====

#[test]
fn test_shallow_equality_checks_id_and_child_count_only() {
    let mut a = Tree::new("t");
    a.put(Property::new("x", 1i32));
    let mut b = Tree::new("t");
    b.put(Property::new("y", 99i32));

    // Same id, same child count: shallow-equal despite different contents
    assert_eq!(a, b);
    assert!(!a.deep_equals(&b));
}

#[test]
fn test_deep_equality_is_reflexive() {
    let root = sample_tree();
    assert!(root.deep_equals(&root));
    assert!(root.deep_equals(&root.clone()));
}

#[test]
fn test_deep_equality_rejects_value_differences() {
    let a = sample_tree();
    let mut b = sample_tree();
    b.get_mut(["general", "volume"])
        .and_then(Node::as_property_mut)
        .expect("volume exists")
        .set_value(81i32);

    assert!(!a.deep_equals(&b));
}

#[test]
fn test_deep_equality_rejects_kind_mismatch() {
    let a = sample_tree();
    let mut b = sample_tree();
    // Replace the "enabled" property with a tree of the same id
    b.put(Tree::new("enabled"));

    assert!(!a.deep_equals(&b));
}

// ===== METADATA =====

#[test]
fn test_metadata_is_excluded_from_equality() {
    let a = Property::new("x", 1i32);
    let b = Property::new("x", 1i32).describe("X", "an example");

    assert_eq!(a, b);
    assert!(a.deep_equals(&b));
    assert_eq!(b.meta("title"), Some(&WireValue::from("X")));
    assert_eq!(b.meta("description"), Some(&WireValue::from("an example")));
}

// ===== TEXTUAL DUMP =====

#[test]
fn test_display_dump_is_deterministic() {
    let root = sample_tree();
    let expected = "root:\n\tenabled: true\n\tgeneral:\n\t\ttheme: dark\n\t\tvolume: 80\n";
    assert_eq!(root.to_string(), expected);
    // Dumping twice yields the identical string
    assert_eq!(root.to_string(), root.to_string());
}

// ===== SERDE SEAM =====

#[test]
fn test_tree_round_trips_through_json() {
    let root = sample_tree();
    let json = root.to_json().unwrap();
    let back = Tree::from_json(&json).unwrap();
    assert!(root.deep_equals(&back));
}
