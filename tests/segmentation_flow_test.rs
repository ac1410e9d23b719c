use clustree::{
    ALWAYS_SHOW_ALL_CLUSTERS, BitsetViews, ClusterBrowser, ClusterEvent, MemoryPrefs,
    PreferenceStore, RawCluster, RawClusters, TOP, from_json,
};
use std::cell::RefCell;
use std::rc::Rc;

/// 25 top-level clusters; the first one has 12 children of its own, so the
/// tree segments on two levels with the default page size of 10.
fn two_level_fixture() -> RawClusters {
    let mut clusters = RawClusters::new();
    for i in 0..25 {
        let mut cluster = RawCluster::default();
        if i == 0 {
            for j in 0..12 {
                cluster
                    .children
                    .insert(format!("t00-{:02}", j), RawCluster::default());
            }
        }
        clusters.insert(format!("t{:02}", i), cluster);
    }
    clusters
}

#[test]
fn test_controls_armed_on_both_levels() {
    let browser = ClusterBrowser::new(&two_level_fixture(), 0);

    // Root child list: boundaries at 10 and 20. Nested list: one at 10.
    assert_eq!(browser.controls().len(), 3);

    let root_controls = browser
        .controls()
        .iter()
        .filter(|control| control.node == TOP)
        .count();
    assert_eq!(root_controls, 2);
}

#[test]
fn test_reveal_more_emits_and_reveals_one_page() {
    let mut browser = ClusterBrowser::new(&two_level_fixture(), 0);

    let events: Rc<RefCell<Vec<ClusterEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    browser.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let control = browser
        .controls()
        .iter()
        .find(|control| control.node == TOP)
        .expect("root control missing")
        .clone();
    browser.reveal_more(control.id);

    assert_eq!(
        events.borrow().as_slice(),
        &[ClusterEvent::More { node: TOP }]
    );
    assert_eq!(browser.controls().len(), 2);

    let visible = browser.tree().visible_children(TOP).len();
    assert_eq!(visible, 20, "second page of top-level clusters revealed");

    // Firing the consumed control again does nothing.
    events.borrow_mut().clear();
    browser.reveal_more(control.id);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_reveal_all_spans_every_level() {
    let mut browser = ClusterBrowser::new(&two_level_fixture(), 0);
    let nested_parent = browser.tree().node_id("t00").expect("t00 missing");

    assert!(browser.reveal_all());
    assert!(browser.controls().is_empty());
    assert_eq!(browser.tree().visible_children(TOP).len(), 25);
    assert_eq!(browser.tree().visible_children(nested_parent).len(), 12);

    // Idempotence: with no controls left this is a plain no-op.
    assert!(!browser.reveal_all());
    assert!(browser.controls().is_empty());
}

#[test]
fn test_remember_persists_the_boolean_once() {
    let mut browser = ClusterBrowser::new(&two_level_fixture(), 0);
    let mut prefs = MemoryPrefs::new();

    // Not offered before reveal-all.
    assert!(!browser.remember_choice(&mut prefs).expect("prefs failed"));
    assert!(!prefs.flag(ALWAYS_SHOW_ALL_CLUSTERS));

    browser.reveal_all();
    assert!(browser.remember_choice(&mut prefs).expect("prefs failed"));
    assert!(prefs.flag(ALWAYS_SHOW_ALL_CLUSTERS));

    // Consumed: a second activation cannot re-trigger the transition.
    assert!(!browser.remember_choice(&mut prefs).expect("prefs failed"));
}

#[test]
fn test_preference_skips_segmentation() {
    let browser = ClusterBrowser::with_segmentation(&two_level_fixture(), 0, 10, false);

    assert!(browser.controls().is_empty());
    assert_eq!(browser.tree().visible_children(TOP).len(), 25);
}

#[test]
fn test_segmentation_leaves_documents_alone() {
    let clusters = from_json(
        r#"{ "a": { "documentIds": [0, 1, 2] }, "b": { "documentIds": [3] } }"#,
    )
    .expect("fixture should parse");
    let mut browser = ClusterBrowser::new(&clusters, 4);
    let mut views = BitsetViews::new(4);

    // Paging only affects cluster rows; the document list is untouched until
    // a selection happens.
    browser.reveal_all();
    assert_eq!(views.visible_count(), 4);

    let a = browser.tree().node_id("a").expect("a missing");
    browser.select(a, &mut views);
    assert_eq!(views.visible_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
}
