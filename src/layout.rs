//! Batch position layout engine. Pure functions over node-id lists so the
//! arrangements can be tested without a DOM.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::constants::{
    CIRCLE_CENTER_X, CIRCLE_CENTER_Y, CIRCLE_OFFSET_X, CIRCLE_OFFSET_Y, CIRCLE_RADIUS,
    GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_MARGIN, LINE_SPACING, LINE_Y,
};
use crate::models::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    Grid,
    Line,
    Circle,
}

pub fn apply_layout(kind: LayoutKind, node_ids: &[String]) -> HashMap<String, Position> {
    match kind {
        LayoutKind::Grid => grid_layout(node_ids),
        LayoutKind::Line => line_layout(node_ids),
        LayoutKind::Circle => circle_layout(node_ids),
    }
}

/// Square-ish grid: `cols = ceil(sqrt(n))`, row-major fill.
pub fn grid_layout(node_ids: &[String]) -> HashMap<String, Position> {
    let n = node_ids.len();
    if n == 0 {
        return HashMap::new();
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    node_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let col = (idx % cols) as f64;
            let row = (idx / cols) as f64;
            (
                id.clone(),
                Position::new(
                    col * GRID_CELL_WIDTH + GRID_MARGIN,
                    row * GRID_CELL_HEIGHT + GRID_MARGIN,
                ),
            )
        })
        .collect()
}

/// Single horizontal row at a fixed y.
pub fn line_layout(node_ids: &[String]) -> HashMap<String, Position> {
    node_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            (
                id.clone(),
                Position::new(idx as f64 * LINE_SPACING + GRID_MARGIN, LINE_Y),
            )
        })
        .collect()
}

/// Nodes evenly spaced on a circle, starting at angle 0 and proceeding
/// clockwise in screen coordinates (y grows downward).
pub fn circle_layout(node_ids: &[String]) -> HashMap<String, Position> {
    let n = node_ids.len();
    node_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let angle = 2.0 * PI * idx as f64 / n as f64;
            (
                id.clone(),
                Position::new(
                    CIRCLE_CENTER_X + CIRCLE_RADIUS * angle.cos() + CIRCLE_OFFSET_X,
                    CIRCLE_CENTER_Y + CIRCLE_RADIUS * angle.sin() + CIRCLE_OFFSET_Y,
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn grid_four_nodes_is_two_by_two() {
        let out = grid_layout(&ids(&["a", "b", "c", "d"]));
        assert_eq!(out["a"], Position::new(20.0, 20.0));
        assert_eq!(out["b"], Position::new(140.0, 20.0));
        assert_eq!(out["c"], Position::new(20.0, 120.0));
        assert_eq!(out["d"], Position::new(140.0, 120.0));
    }

    #[test]
    fn grid_five_nodes_uses_three_columns() {
        let out = grid_layout(&ids(&["a", "b", "c", "d", "e"]));
        assert_eq!(out["c"], Position::new(260.0, 20.0));
        assert_eq!(out["d"], Position::new(20.0, 120.0));
        assert_eq!(out["e"], Position::new(140.0, 120.0));
    }

    #[test]
    fn line_spaces_nodes_horizontally() {
        let out = line_layout(&ids(&["a", "b", "c", "d"]));
        assert_eq!(out["a"], Position::new(20.0, 50.0));
        assert_eq!(out["b"], Position::new(160.0, 50.0));
        assert_eq!(out["c"], Position::new(300.0, 50.0));
        assert_eq!(out["d"], Position::new(440.0, 50.0));
    }

    #[test]
    fn circle_first_node_sits_at_angle_zero() {
        let out = circle_layout(&ids(&["a", "b", "c", "d"]));
        assert_eq!(out["a"], Position::new(200.0 + 120.0 - 40.0, 150.0 - 20.0));
        // Quarter turn: cos=0, sin=1 (y grows downward on screen)
        let b = out["b"];
        assert!((b.x - (200.0 - 40.0)).abs() < 1e-9);
        assert!((b.y - (150.0 + 120.0 - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(grid_layout(&[]).is_empty());
        assert!(line_layout(&[]).is_empty());
        assert!(circle_layout(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn layouts_are_deterministic_and_total(
            names in proptest::collection::hash_set("[a-z]{1,6}", 0..40)
        ) {
            let list: Vec<String> = names.into_iter().collect();
            for kind in [LayoutKind::Grid, LayoutKind::Line, LayoutKind::Circle] {
                let a = apply_layout(kind, &list);
                let b = apply_layout(kind, &list);
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.len(), list.len());
                for pos in a.values() {
                    prop_assert!(pos.is_finite());
                }
            }
        }

        #[test]
        fn grid_positions_are_distinct(
            names in proptest::collection::hash_set("[a-z]{1,6}", 1..40)
        ) {
            let list: Vec<String> = names.into_iter().collect();
            let out = grid_layout(&list);
            let mut seen: Vec<(u64, u64)> = out
                .values()
                .map(|p| (p.x.to_bits(), p.y.to_bits()))
                .collect();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), list.len());
        }
    }
}
