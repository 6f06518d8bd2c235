//! Merge policy tests: insertion, overwrite, metadata copying, and the
//! logged kind-clash fallbacks.

use arbor::tree::{Property, Tree};
use arbor::wire::WireValue;

fn group(id: &str, entries: &[(&str, i32)]) -> Tree {
    let mut tree = Tree::new(id);
    for (key, value) in entries {
        tree.put(Property::new(*key, *value));
    }
    tree
}

#[test]
fn test_merge_overwrites_and_inserts() {
    // A has g.a=1; B has g.a=2, g.b=3. Overwrite-merging B into A gives
    // A.g.a==2 and A.g.b==3.
    let mut a = Tree::new("root");
    a.put(group("g", &[("a", 1)]));
    let mut b = Tree::new("root");
    b.put(group("g", &[("a", 2), ("b", 3)]));

    a.merge(b, true, false);

    assert_eq!(a.get_as::<i32>(["g", "a"]), Some(2));
    assert_eq!(a.get_as::<i32>(["g", "b"]), Some(3));
}

#[test]
fn test_merge_without_overwrite_preserves_existing_values() {
    let mut a = Tree::new("root");
    a.put(group("g", &[("a", 1)]));
    let mut b = Tree::new("root");
    b.put(group("g", &[("a", 2), ("b", 3)]));

    a.merge(b, false, false);

    // Colliding value untouched, missing value still inserted
    assert_eq!(a.get_as::<i32>(["g", "a"]), Some(1));
    assert_eq!(a.get_as::<i32>(["g", "b"]), Some(3));
}

#[test]
fn test_merge_makes_self_a_structural_superset() {
    let mut a = Tree::new("root");
    a.put(group("g", &[("a", 1)]));
    a.put(Property::new("keep", 9));

    let mut b = Tree::new("root");
    b.put(group("g", &[("a", 2), ("b", 3)]));
    let mut nested = Tree::new("deep");
    nested.put(group("inner", &[("c", 4)]));
    b.put(nested);

    a.merge(b.clone(), true, false);

    // Every path reachable in B is reachable and content-equal in A
    assert_eq!(a.get_as::<i32>(["g", "a"]), b.get_as::<i32>(["g", "a"]));
    assert_eq!(a.get_as::<i32>(["g", "b"]), b.get_as::<i32>(["g", "b"]));
    assert_eq!(
        a.get_as::<i32>(["deep", "inner", "c"]),
        b.get_as::<i32>(["deep", "inner", "c"])
    );
    // Untouched local state survives
    assert_eq!(a.get_as::<i32>(["keep"]), Some(9));
}

#[test]
fn test_merge_property_over_tree_wins_with_warning() {
    let mut a = Tree::new("root");
    a.put(group("g", &[("a", 1)]));
    let mut b = Tree::new("root");
    b.put(Property::new("g", 42));

    // Logged as likely unintended, but the incoming property replaces the
    // tree rather than failing the merge.
    a.merge(b, false, false);

    assert!(a.get_child(["g"]).is_none());
    assert_eq!(a.get_as::<i32>(["g"]), Some(42));
}

#[test]
fn test_merge_tree_over_property_wins_with_warning() {
    let mut a = Tree::new("root");
    a.put(Property::new("g", 42));
    let mut b = Tree::new("root");
    b.put(group("g", &[("a", 1)]));

    a.merge(b, false, false);

    assert!(a.get_property(["g"]).is_none());
    assert_eq!(a.get_as::<i32>(["g", "a"]), Some(1));
}

#[test]
fn test_merge_copy_meta_keeps_values_but_folds_annotations() {
    let mut a = Tree::new("root");
    a.put(Property::new("x", 1));

    let mut b = Tree::new("root");
    b.put(Property::new("x", 2).describe("X", "incoming hint"));

    a.merge(b, false, true);

    // Value untouched, annotations folded in
    assert_eq!(a.get_as::<i32>(["x"]), Some(1));
    let property = a.get_property(["x"]).unwrap();
    assert_eq!(property.meta("title"), Some(&WireValue::from("X")));
}

#[test]
fn test_merge_copy_meta_recurses_into_subtrees() {
    let mut a = Tree::new("root");
    a.put(group("g", &[("a", 1)]));

    let mut b_group = group("g", &[("a", 2)]);
    b_group.set_meta("title", "Group");
    let mut b = Tree::new("root");
    b.put(b_group);

    a.merge(b, false, true);

    assert_eq!(a.get_as::<i32>(["g", "a"]), Some(1));
    let child = a.get_child(["g"]).unwrap();
    assert_eq!(child.meta("title"), Some(&WireValue::from("Group")));
}

#[test]
fn test_merge_overwrite_replaces_property_wholesale() {
    let mut a = Tree::new("root");
    a.put(Property::new("x", 1).describe("old", "old hint"));

    let mut b = Tree::new("root");
    b.put(Property::new("x", 2));

    a.merge(b, true, false);

    let property = a.get_property(["x"]).unwrap();
    assert_eq!(property.get_as::<i32>(), Some(2));
    // The incoming node replaced ours, annotations included
    assert!(property.meta("title").is_none());
}

#[test]
fn test_merge_into_empty_tree_clones_structure() {
    let mut a = Tree::new("root");
    let b = {
        let mut b = Tree::new("root");
        b.put(group("g", &[("a", 1), ("b", 2)]));
        b
    };

    a.merge(b.clone(), true, false);
    assert!(a.deep_equals(&b));
}
