//! Editing protocol tests
//!
//! Session exclusivity, commit and cancel paths, cleanup on failing writes
//! and editor placement.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{plain_config, ModelHandle, SharedModel, ScriptedProvider};
use gridview::{
    CellValue, Grid, GridError, GridEvent, Insets, Key, KeyEvent, Matrix, MatrixModel,
    PointerEvent, Rect, TextEditorProvider,
};

fn editable(provider: ScriptedProvider) -> (Grid, ModelHandle) {
    let matrix = Matrix::from_rows(vec![
        vec!["a0".into(), "b0".into(), "c0".into()],
        vec!["a1".into(), "b1".into(), "c1".into()],
        vec!["a2".into(), "b2".into(), "c2".into()],
        vec!["a3".into(), "b3".into(), "c3".into()],
    ]);
    let (model, handle) = SharedModel::new(matrix);
    let mut g = Grid::from_model(model, plain_config(50, 20));
    g.set_bounds(Rect::new(0, 0, 150, 80));
    g.set_editor_provider(Some(Box::new(provider))).unwrap();
    (g, handle)
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[test]
fn test_start_and_commit_emit_events() {
    common::init_tracing();
    let (mut g, handle) = editable(ScriptedProvider::new("new"));
    assert!(g.start_editing(1, 2).unwrap());
    assert!(g.is_editing());
    assert!(!g.has_focus());

    g.stop_editing(true).unwrap();
    assert_eq!(handle.puts.get(), 1);
    assert_eq!(g.model().get(1, 2), Some(&CellValue::from("new")));
    assert_eq!(
        g.drain_events(),
        vec![
            GridEvent::EditingStarted { row: 1, col: 2 },
            GridEvent::EditingStopped {
                row: 1,
                col: 2,
                applied: true
            },
        ]
    );
}

#[test]
fn test_second_start_commits_first_session_exactly_once() {
    let provider = ScriptedProvider::new("x");
    let log = std::rc::Rc::clone(&provider.log);
    let (mut g, handle) = editable(provider);

    g.start_editing(0, 0).unwrap();
    g.start_editing(3, 1).unwrap();
    assert_eq!(handle.puts.get(), 1);
    assert_eq!(g.model().get(0, 0), Some(&CellValue::from("x")));
    assert_eq!(g.editing_cell(), Some((3, 1)));
    assert_eq!(log.borrow().editors_created, 2);

    g.stop_editing(true).unwrap();
    assert_eq!(handle.puts.get(), 2);
}

#[test]
fn test_stop_without_apply_leaves_model_untouched() {
    let mut provider = ScriptedProvider::new("changed");
    provider.popup = true;
    let (mut g, handle) = editable(provider);

    g.start_editing(2, 1).unwrap();
    g.stop_editing(false).unwrap();
    assert_eq!(g.model().get(2, 1), Some(&CellValue::from("b2")));
    assert_eq!(handle.puts.get(), 0);
    assert!(!g.is_editing());
    assert!(g.has_focus());
    assert!(g.drain_events().contains(&GridEvent::EditingStopped {
        row: 2,
        col: 1,
        applied: false
    }));
}

#[test]
fn test_failing_write_still_ends_session() {
    let (mut g, handle) = editable(ScriptedProvider::new("x"));
    g.start_editing(1, 1).unwrap();
    handle.fail.set(true);
    g.drain_events();
    g.take_damage();

    let err = g.stop_editing(true).unwrap_err();
    assert!(matches!(err, GridError::ReadOnly));
    assert!(!g.is_editing());
    assert!(g.editor().is_none());
    assert!(g.has_focus());
    assert!(!g.take_damage().is_empty());
    assert_eq!(
        g.drain_events(),
        vec![GridEvent::EditingStopped {
            row: 1,
            col: 1,
            applied: false
        }]
    );

    // The grid is usable afterwards
    handle.fail.set(false);
    assert!(g.start_editing(1, 1).unwrap());
}

#[test]
fn test_nested_editor_committed_before_value_is_fetched() {
    let mut provider = ScriptedProvider::new(7);
    provider.nested = true;
    let log = std::rc::Rc::clone(&provider.log);
    let (mut g, _handle) = editable(provider);

    g.start_editing(0, 1).unwrap();
    g.stop_editing(true).unwrap();
    assert_eq!(log.borrow().commits, 1);
    assert_eq!(log.borrow().commits_at_fetch, Some(1));
    assert_eq!(g.model().get(0, 1), Some(&CellValue::from(7)));
}

#[test]
fn test_cancelled_session_never_commits_nested_state() {
    let mut provider = ScriptedProvider::new(7);
    provider.nested = true;
    let log = std::rc::Rc::clone(&provider.log);
    let (mut g, _handle) = editable(provider);

    g.start_editing(0, 1).unwrap();
    g.stop_editing(false).unwrap();
    assert_eq!(log.borrow().commits, 0);
    assert_eq!(log.borrow().commits_at_fetch, None);
}

#[test]
fn test_start_without_provider_declines() {
    let mut g = Grid::with_dimensions(3, 3, plain_config(50, 20));
    assert!(!g.start_editing(0, 0).unwrap());
    assert!(!g.is_editing());
}

#[test]
fn test_start_rejects_cells_outside_model() {
    let (mut g, _handle) = editable(ScriptedProvider::new("x"));
    assert!(matches!(
        g.start_editing(0, 3),
        Err(GridError::IndexOutOfRange { .. })
    ));
    assert!(!g.is_editing());
}

// ============================================================================
// Triggers
// ============================================================================

#[test]
fn test_escape_cancels_and_enter_finishes() {
    let (mut g, handle) = editable(ScriptedProvider::new("typed"));
    g.start_editing(0, 0).unwrap();
    assert!(g.key_pressed(KeyEvent::new(Key::Escape)).unwrap());
    assert!(!g.is_editing());
    assert_eq!(handle.puts.get(), 0);

    g.start_editing(0, 0).unwrap();
    assert!(g.key_pressed(KeyEvent::new(Key::Enter)).unwrap());
    assert!(!g.is_editing());
    assert_eq!(g.model().get(0, 0), Some(&CellValue::from("typed")));
}

#[test]
fn test_double_click_starts_and_click_elsewhere_commits() {
    let (mut g, handle) = editable(ScriptedProvider::new("z"));
    g.pointer_clicked(PointerEvent::click(60, 30)).unwrap();
    assert!(!g.is_editing());
    assert_eq!(g.cursor().line(), Some(1));

    g.pointer_clicked(PointerEvent::double_click(60, 30)).unwrap();
    assert_eq!(g.editing_cell(), Some((1, 1)));

    // Clicking inside the edited cell keeps the session open
    g.pointer_clicked(PointerEvent::click(70, 35)).unwrap();
    assert!(g.is_editing());

    g.pointer_clicked(PointerEvent::click(10, 5)).unwrap();
    assert!(!g.is_editing());
    assert_eq!(handle.puts.get(), 1);
    assert_eq!(g.model().get(1, 1), Some(&CellValue::from("z")));
    assert_eq!(g.cursor().line(), Some(0));
}

#[test]
fn test_text_editor_round_trip_through_keys() {
    let mut g = Grid::from_model(Matrix::new(5, 2), plain_config(50, 20));
    g.set_bounds(Rect::new(0, 0, 100, 100));
    g.set_editor_provider(Some(Box::new(TextEditorProvider::default())))
        .unwrap();
    g.set_row_col(2, 0);

    assert!(g.key_pressed(KeyEvent::new(Key::F2)).unwrap());
    assert_eq!(g.editing_cell(), Some((2, 0)));
    for ch in "3.55".chars() {
        assert!(g.key_typed(ch).unwrap());
    }
    g.key_pressed(KeyEvent::new(Key::Backspace)).unwrap();
    g.key_pressed(KeyEvent::new(Key::Enter)).unwrap();
    assert!(!g.is_editing());
    assert_eq!(g.model().get(2, 0), Some(&CellValue::Number(3.5)));
}

#[test]
fn test_text_editor_keeps_number_cells_numeric() {
    let mut matrix = Matrix::new(3, 2);
    matrix.put(1, 1, CellValue::from(42)).unwrap();
    let mut g = Grid::from_model(matrix, plain_config(50, 20));
    g.set_bounds(Rect::new(0, 0, 100, 100));
    g.set_editor_provider(Some(Box::new(TextEditorProvider::default())))
        .unwrap();
    g.set_row_col(1, 1);
    g.drain_events();

    assert!(g.key_pressed(KeyEvent::new(Key::F2)).unwrap());
    g.key_typed('x').unwrap();
    let err = g.key_pressed(KeyEvent::new(Key::Enter)).unwrap_err();
    assert!(matches!(err, GridError::Edit(_)));
    assert!(!g.is_editing());
    assert!(g.has_focus());
    assert_eq!(g.model().get(1, 1), Some(&CellValue::from(42)));
    assert!(g.drain_events().contains(&GridEvent::EditingStopped {
        row: 1,
        col: 1,
        applied: false
    }));
}

#[test]
fn test_typed_char_without_trigger_is_not_consumed() {
    let mut g = Grid::from_model(Matrix::new(5, 2), plain_config(50, 20));
    g.set_bounds(Rect::new(0, 0, 100, 100));
    g.set_editor_provider(Some(Box::new(TextEditorProvider::default())))
        .unwrap();
    g.set_row_col(1, 0);
    assert!(!g.key_typed('q').unwrap());
    assert!(!g.is_editing());
}

// ============================================================================
// Forced commits
// ============================================================================

#[test]
fn test_provider_swap_commits_through_old_provider() {
    let (mut g, handle) = editable(ScriptedProvider::new("old"));
    g.start_editing(2, 2).unwrap();
    g.set_editor_provider(None).unwrap();
    assert!(!g.is_editing());
    assert_eq!(handle.puts.get(), 1);
    assert_eq!(g.model().get(2, 2), Some(&CellValue::from("old")));
    assert!(!g.start_editing(2, 2).unwrap());
}

#[test]
fn test_resizing_a_row_commits_open_edit() {
    let (mut g, handle) = editable(ScriptedProvider::new("r"));
    g.start_editing(1, 0).unwrap();
    g.set_row_height(0, 35).unwrap();
    assert!(!g.is_editing());
    assert_eq!(handle.puts.get(), 1);
}

#[test]
fn test_resize_to_same_size_keeps_edit_open() {
    let (mut g, handle) = editable(ScriptedProvider::new("r"));
    g.start_editing(1, 0).unwrap();
    g.set_row_height(0, 20).unwrap();
    assert!(g.is_editing());
    assert_eq!(handle.puts.get(), 0);
}

#[test]
fn test_swapping_model_commits_to_old_model() {
    let (mut g, handle) = editable(ScriptedProvider::new("gone"));
    g.start_editing(0, 0).unwrap();
    g.set_model(Matrix::new(2, 2)).unwrap();
    assert_eq!(handle.puts.get(), 1);
    assert_eq!(g.model().get(0, 0), Some(&CellValue::Empty));
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_popup_placed_once_in_host_coordinates() {
    let mut provider = ScriptedProvider::new("p");
    provider.popup = true;
    let log = std::rc::Rc::clone(&provider.log);
    let (mut g, _handle) = editable(provider);
    g.set_bounds(Rect::new(10, 20, 150, 60));

    g.start_editing(2, 1).unwrap();
    // Cell (2, 1) sits at (50, 40); the popup takes its preferred size
    let placed = Rect::new(60, 60, 120, 60);
    assert_eq!(log.borrow().bounds, Some(placed));
    assert!(log.borrow().focused);

    g.scroll_by(0, -15);
    assert_eq!(g.editor().unwrap().bounds(), placed);
}

#[test]
fn test_inline_editor_tracks_cell_through_scroll() {
    let (mut g, _handle) = editable(ScriptedProvider::new("i"));
    g.set_bounds(Rect::new(0, 0, 100, 50));
    g.start_editing(2, 1).unwrap();
    assert_eq!(g.editor().unwrap().bounds(), Rect::new(50, 40, 50, 20));

    g.scroll_by(-20, -15);
    assert_eq!(g.editor().unwrap().bounds(), Rect::new(30, 25, 50, 20));
}

#[test]
fn test_inline_editor_inset_under_preferred_metric() {
    let mut config = plain_config(50, 20);
    config.cell_insets = Insets::new(1, 3, 1, 3);
    let mut g = Grid::from_model(
        Matrix::from_rows(vec![vec!["abcd".into(), "e".into()]]),
        config,
    );
    g.set_bounds(Rect::new(0, 0, 200, 100));
    g.set_use_ps_metric(true);
    g.set_editor_provider(Some(Box::new(ScriptedProvider::new("v"))))
        .unwrap();

    g.start_editing(0, 1).unwrap();
    // Column 0 is 4 * 7 + 6 wide; cells are 16 + 2 high
    let cell = g.cell_rect(0, 1);
    assert_eq!(cell, Rect::new(34, 0, 13, 18));
    assert_eq!(g.editor().unwrap().bounds(), Rect::new(37, 1, 7, 16));
}
