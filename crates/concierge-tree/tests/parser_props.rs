use concierge_tree::{parse, parse_with_report, ParseAnomaly};
use proptest::prelude::*;

/// Rows with one label at a small column, sometimes blank, sometimes with trailing cells
fn row_strategy() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        8 => (0usize..4, "[A-D1-3]", proptest::collection::vec("[a-z]?", 0..3)).prop_map(
            |(level, label, tail)| {
                let mut row = vec![String::new(); level];
                row.push(label);
                row.extend(tail);
                row
            }
        ),
        1 => proptest::collection::vec(Just(" ".to_string()), 0..3),
    ]
}

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    proptest::collection::vec(row_strategy(), 0..40)
}

proptest! {
    #[test]
    fn prop_level_matches_parent(grid in grid_strategy()) {
        let tree = parse(&grid);
        for node in tree.nodes() {
            match node.parent.as_deref().and_then(|p| tree.get(p)) {
                Some(parent) => prop_assert_eq!(node.level, parent.level + 1),
                None if node.level == 0 => prop_assert!(node.parent.is_none()),
                None => {}
            }
        }
    }

    #[test]
    fn prop_id_extends_parent_id(grid in grid_strategy()) {
        let tree = parse(&grid);
        for node in tree.nodes() {
            let expected = match &node.parent {
                Some(parent) => format!("{parent}.{}", node.value),
                None if node.level == 0 => node.value.clone(),
                None => continue,
            };
            prop_assert_eq!(&node.id, &expected);
        }
    }

    #[test]
    fn prop_parse_is_deterministic(grid in grid_strategy()) {
        prop_assert_eq!(parse(&grid), parse(&grid));
    }

    #[test]
    fn prop_reachable_ids_exist(grid in grid_strategy()) {
        let tree = parse(&grid);
        let mut stack: Vec<String> = tree.roots().to_vec();
        while let Some(id) = stack.pop() {
            let node = tree.get(&id);
            prop_assert!(node.is_some());
            if let Some(node) = node {
                for child in &node.children {
                    prop_assert!(tree.get(child).unwrap().level > node.level);
                    stack.push(child.clone());
                }
            }
        }
    }

    #[test]
    fn prop_children_are_unique(grid in grid_strategy()) {
        let tree = parse(&grid);
        for node in tree.nodes() {
            let mut seen = node.children.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), node.children.len());
        }
    }

    #[test]
    fn prop_orphans_are_reported(grid in grid_strategy()) {
        let report = parse_with_report(&grid);
        let reported = report
            .anomalies
            .iter()
            .filter(|a| matches!(a, ParseAnomaly::Orphaned { .. }))
            .count();
        // every orphan node was reported at least once (duplicates may re-report)
        prop_assert!(reported >= report.tree.orphans().count());
    }
}

#[test]
fn test_grid_without_level_zero_only_row() {
    // The first non-empty cell decides the row, so "A" wins and "1"/"2" are dropped
    let grid = vec![
        vec!["A".to_string(), "1".to_string()],
        vec!["A".to_string(), "2".to_string()],
    ];
    let tree = parse(&grid);

    assert_eq!(tree.roots(), &["A"]);
    assert_eq!(tree.len(), 1);
    assert!(tree.get("A.1").is_none());
    assert!(tree.get("A.2").is_none());
    assert!(tree.get("A").unwrap().is_leaf());
}

#[test]
fn test_children_without_any_root_row_are_orphaned() {
    let grid = vec![
        vec![String::new(), "1".to_string()],
        vec![String::new(), "2".to_string()],
    ];
    let tree = parse(&grid);

    assert!(tree.roots().is_empty());
    assert_eq!(tree.len(), 2);
    assert!(tree.get(".1").is_some());
    assert!(tree.get(".2").is_some());
    assert_eq!(tree.orphans().count(), 2);
}
