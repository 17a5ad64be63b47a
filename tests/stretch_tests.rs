//! Proportional column stretching tests
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::plain_config;
use gridview::{Caption, Grid, Insets, Rect, StretchLayout};
use proptest::prelude::*;

fn stretched(widths: &[i32], line: i32) -> StretchLayout {
    let config = plain_config(50, 20).with_line_size(line);
    let mut grid = Grid::with_dimensions(10, widths.len(), config);
    for (col, w) in widths.iter().enumerate() {
        grid.set_col_width(col, *w).unwrap();
    }
    StretchLayout::new(grid)
}

fn widths(layout: &StretchLayout) -> Vec<i32> {
    layout.grid().metrics().col_widths().to_vec()
}

fn total(layout: &StretchLayout) -> i32 {
    widths(layout).iter().sum()
}

// ============================================================================
// Distribution
// ============================================================================

#[test]
fn test_widths_scale_with_container() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();
    assert_eq!(widths(&layout), vec![100, 200, 100]);
    assert_eq!(layout.proportions(), &[0.25, 0.5, 0.25]);

    layout.set_size(200, 100).unwrap();
    assert_eq!(widths(&layout), vec![50, 100, 50]);
}

proptest! {
    // Widths fill the available width exactly at every container size
    #[test]
    fn widths_always_fill_available_width(
        initial in prop::collection::vec(0i32..200, 1..12),
        line in 0i32..5,
        inset in 0i32..10,
        sizes in prop::collection::vec(0i32..1500, 1..20),
    ) {
        let mut config = plain_config(50, 20).with_line_size(line);
        config.insets = Insets::uniform(inset);
        let mut grid = Grid::with_dimensions(4, initial.len(), config);
        for (col, &w) in initial.iter().enumerate() {
            grid.set_col_width(col, w).unwrap();
        }
        let mut layout = StretchLayout::new(grid);
        for width in sizes {
            layout.set_size(width, 100).unwrap();
            prop_assert_eq!(total(&layout), layout.available_width(), "at width {}", width);
            prop_assert!(widths(&layout).iter().all(|&w| w >= 0));
        }
    }
}

#[test]
fn test_available_width_excludes_insets_and_lines() {
    let mut config = plain_config(50, 20).with_line_size(2);
    config.insets = Insets::new(0, 10, 0, 6);
    let mut layout = StretchLayout::new(Grid::with_dimensions(1, 3, config));
    layout.set_size(300, 50).unwrap();
    // 300 - 16 of insets - 4 lines of 2
    assert_eq!(layout.available_width(), 276);
    assert_eq!(total(&layout), 276);
}

#[test]
fn test_stretched_grid_shows_every_column() {
    let mut layout = stretched(&[50; 8], 1);
    layout.set_size(333, 200).unwrap();
    let grid = layout.grid_mut();
    grid.validate();
    assert_eq!(grid.window().col_range(), Some(0..=7));
    assert_eq!(grid.scroll().sx(), 0);
}

#[test]
fn test_no_columns_is_a_noop() {
    let mut layout = StretchLayout::new(Grid::with_dimensions(3, 0, plain_config(50, 20)));
    layout.set_size(300, 100).unwrap();
    assert!(layout.proportions().is_empty());
}

#[test]
fn test_layout_forces_fixed_sizing() {
    let mut grid = Grid::with_dimensions(2, 2, plain_config(50, 20));
    grid.set_use_ps_metric(true);
    let mut layout = StretchLayout::new(grid);
    layout.set_size(300, 100).unwrap();
    assert_eq!(total(&layout), 300);
}

// ============================================================================
// Manual resizing
// ============================================================================

#[test]
fn test_resize_col_moves_difference_into_next() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();

    layout.resize_col(0, 150).unwrap();
    assert_eq!(widths(&layout), vec![150, 150, 100]);
    assert_eq!(total(&layout), 400);
}

#[test]
fn test_resize_col_clamps_at_next_minimum() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();
    let min = layout.grid().config().min_col_width;

    layout.resize_col(0, 1000).unwrap();
    assert_eq!(widths(&layout), vec![300 - min, min, 100]);

    layout.resize_col(1, 0).unwrap();
    assert_eq!(widths(&layout)[1], min);
    assert_eq!(total(&layout), 400);
}

#[test]
fn test_resize_col_never_shrinks_below_minimum() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();
    let min = layout.grid().config().min_col_width;
    layout.resize_col(0, -40).unwrap();
    assert_eq!(widths(&layout), vec![min, 300 - min, 100]);
}

#[test]
fn test_last_column_cannot_be_resized() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();
    layout.resize_col(2, 10).unwrap();
    layout.resize_col(9, 10).unwrap();
    assert_eq!(widths(&layout), vec![100, 200, 100]);
}

#[test]
fn test_manual_resize_becomes_new_proportions() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();
    layout.resize_col(0, 300).unwrap();
    assert_eq!(widths(&layout), vec![288, 12, 100]);

    // 288 : 12 : 100 scaled to 800
    layout.set_size(800, 100).unwrap();
    assert_eq!(widths(&layout), vec![576, 24, 200]);
}

#[test]
fn test_external_width_change_detected() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout.set_size(400, 100).unwrap();

    layout.grid_mut().set_col_width(1, 300).unwrap();
    layout.do_layout().unwrap();
    // 100 : 300 : 100 over 400
    assert_eq!(widths(&layout), vec![80, 240, 80]);
    assert_eq!(layout.proportions(), &[0.2, 0.6, 0.2]);
}

#[test]
fn test_own_writes_do_not_reset_proportions() {
    let mut layout = stretched(&[1, 2], 0);
    layout.set_size(3, 100).unwrap();
    layout.set_size(0, 100).unwrap();
    assert_eq!(widths(&layout), vec![0, 0]);
    layout.set_size(300, 100).unwrap();
    assert_eq!(widths(&layout), vec![100, 200]);
}

// ============================================================================
// Caption drag
// ============================================================================

#[test]
fn test_caption_drag_resizes_column() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout
        .grid_mut()
        .set_caption(Some(Caption::new(["A", "B", "C"])));
    layout.set_size(400, 100).unwrap();

    assert!(!layout.pointer_pressed(50, 5));
    assert!(layout.pointer_pressed(101, 5));
    assert!(layout.is_dragging());
    assert!(layout.pointer_dragged(131, 5).unwrap());
    assert_eq!(widths(&layout), vec![130, 170, 100]);
    assert!(layout.pointer_dragged(91, 5).unwrap());
    assert_eq!(widths(&layout), vec![90, 210, 100]);

    assert!(layout.pointer_released());
    assert!(!layout.is_dragging());
    assert!(!layout.pointer_dragged(300, 5).unwrap());
    assert_eq!(widths(&layout), vec![90, 210, 100]);
}

#[test]
fn test_press_below_caption_does_not_drag() {
    let mut layout = stretched(&[50, 100, 50], 0);
    layout
        .grid_mut()
        .set_caption(Some(Caption::new(["A", "B", "C"])));
    layout.set_size(400, 100).unwrap();
    assert!(!layout.pointer_pressed(100, 40));
    assert!(!layout.pointer_released());
}

#[test]
fn test_into_grid_keeps_stretched_widths() {
    let mut layout = stretched(&[10, 30], 0);
    layout.set_size(120, 50).unwrap();
    let grid = layout.into_grid();
    assert_eq!(grid.metrics().col_widths(), &[30, 90]);
    assert_eq!(grid.bounds(), Rect::new(0, 0, 120, 50));
}
