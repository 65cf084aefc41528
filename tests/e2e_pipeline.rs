//! End-to-end tests for the search → filter → present pipeline.
//!
//! Each test builds a small graph through the public API and runs one or
//! more stages through the `Twitterverse` handle.

use pretty_assertions::assert_eq;
use twitterverse::{
    Error, FilterSpec, Format, Operation, Predicate, PresentSpec, Query, SearchSpec, SortKey,
    Twitterverse, User, MemoryStore,
};

// ============================================================================
// Helpers
// ============================================================================

/// a ← b, c, d; b ← c, d; c ← d.
fn four_users() -> Twitterverse<MemoryStore> {
    Twitterverse::from_users([
        User::new("a")
            .with_name("ABU")
            .with_location("Vancouver")
            .with_website("www.me.com"),
        User::new("b")
            .with_name("mee")
            .with_location("Toronto")
            .with_following(["a"]),
        User::new("c")
            .with_name("anahita")
            .with_location("Here")
            .with_following(["a", "b"]),
        User::new("d")
            .with_name("AMir")
            .with_location("Nowhere")
            .with_bio("Hello")
            .with_following(["a", "b", "c"]),
    ])
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// 1. Follower lookup
// ============================================================================

#[test]
fn test_followers_of_mutual_pair() {
    let graph = Twitterverse::from_users([
        User::new("a").with_following(["b"]),
        User::new("b").with_following(["a"]),
        User::new("c").with_following(["a", "b"]),
    ]);
    assert_eq!(graph.followers_of("a"), names(&["b", "c"]));
    assert!(graph.followers_of("c").is_empty());
}

// ============================================================================
// 2. Search
// ============================================================================

#[test]
fn test_search_followers_then_following() {
    let graph = four_users();
    let spec = SearchSpec::new("a")
        .then(Operation::Followers)
        .then(Operation::Following);
    assert_eq!(graph.search(&spec).unwrap(), names(&["a", "b", "c"]));
}

#[test]
fn test_search_without_operations() {
    let graph = four_users();
    assert_eq!(graph.search(&SearchSpec::new("b")).unwrap(), names(&["b"]));
}

#[test]
fn test_search_unknown_start() {
    let graph = four_users();
    let err = graph.search(&SearchSpec::new("e")).unwrap_err();
    assert!(matches!(err, Error::UnknownUser(ref u) if u == "e"));
    assert_eq!(err.to_string(), "Unknown user: e");
}

// ============================================================================
// 3. Filter
// ============================================================================

#[test]
fn test_filter_name_then_following() {
    let graph = four_users();
    let spec = FilterSpec::new()
        .with(Predicate::NameIncludes("A".into()))
        .with(Predicate::Following("b".into()));
    let out = graph.filter(&names(&["a", "b", "c", "d"]), &spec).unwrap();
    assert_eq!(out, names(&["c", "d"]));
}

#[test]
fn test_filter_order_does_not_change_result() {
    let graph = four_users();
    let forward = FilterSpec::new()
        .with(Predicate::LocationIncludes("o".into()))
        .with(Predicate::Follower("d".into()));
    let backward = FilterSpec::new()
        .with(Predicate::Follower("d".into()))
        .with(Predicate::LocationIncludes("o".into()));

    let candidates = names(&["d", "c", "b", "a"]);
    let left = graph.filter(&candidates, &forward).unwrap();
    let right = graph.filter(&candidates, &backward).unwrap();
    // Vancouver, Toronto; d follows a, b, c
    assert_eq!(left, names(&["a", "b"]));
    assert_eq!(left, right);
}

#[test]
fn test_filter_without_predicates() {
    let graph = four_users();
    let out = graph.filter(&names(&["c", "a"]), &FilterSpec::new()).unwrap();
    assert_eq!(out, names(&["a", "c"]));
}

// ============================================================================
// 4. Present
// ============================================================================

#[test]
fn test_present_short_orders() {
    let graph = four_users();
    let cases = [
        (SortKey::Username, "['a', 'b', 'c', 'd']"),
        (SortKey::Name, "['a', 'd', 'c', 'b']"),
        (SortKey::Popularity, "['a', 'b', 'c', 'd']"),
    ];
    for (key, expected) in cases {
        let mut results = names(&["d", "c", "b", "a"]);
        let report = graph.present(&mut results, &PresentSpec::new(key, Format::Short)).unwrap();
        assert_eq!(report, expected, "sort-by {key}");
    }
}

#[test]
fn test_present_short_literals() {
    let graph = four_users();
    let spec = PresentSpec::new(SortKey::Username, Format::Short);
    assert_eq!(graph.present(&mut [], &spec).unwrap(), "[]");
    assert_eq!(graph.present(&mut names(&["b", "a"]), &spec).unwrap(), "['a', 'b']");
}

#[test]
fn test_present_long_empty() {
    let graph = four_users();
    let spec = PresentSpec::new(SortKey::Popularity, Format::Long);
    assert_eq!(graph.present(&mut [], &spec).unwrap(), "----------\n----------\n");
}

// ============================================================================
// 5. Full queries
// ============================================================================

#[test]
fn test_execute_long_by_popularity() {
    let graph = four_users();
    let query = Query::new(
        SearchSpec::new("d").then(Operation::Following),
        FilterSpec::new().with(Predicate::Following("a".into())),
        PresentSpec::new(SortKey::Popularity, Format::Long),
    );
    let result = graph.execute(&query).unwrap();

    let expected = [
        "----------",
        "b",
        "name: mee",
        "location: Toronto",
        "website: ",
        "bio:",
        "",
        "following: ['a']",
        "----------",
        "c",
        "name: anahita",
        "location: Here",
        "website: ",
        "bio:",
        "",
        "following: ['a', 'b']",
        "----------",
        "",
    ]
    .join("\n");
    assert_eq!(result.report, expected);
    assert_eq!(result.usernames, names(&["b", "c"]));
    assert_eq!(result.stats.search_hits, 3);
    assert_eq!(result.stats.filter_hits, 2);
}

#[test]
fn test_execute_failure_leaves_store_usable() {
    let graph = four_users();
    let bad = Query::new(
        SearchSpec::new("ghost"),
        FilterSpec::new(),
        PresentSpec::new(SortKey::Username, Format::Short),
    );
    assert!(graph.execute(&bad).is_err());

    let good = Query::new(
        SearchSpec::new("a").then(Operation::Followers),
        FilterSpec::new(),
        PresentSpec::new(SortKey::Username, Format::Short),
    );
    assert_eq!(graph.execute(&good).unwrap().report, "['b', 'c', 'd']");
}

#[test]
fn test_shared_store_across_threads() {
    let graph = four_users();
    let spec = SearchSpec::new("a").then(Operation::Followers);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = graph.clone();
            let spec = spec.clone();
            std::thread::spawn(move || graph.search(&spec).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), names(&["b", "c", "d"]));
    }
}
