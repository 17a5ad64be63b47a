//! Visible cell window with incremental (ratchet) recomputation.
//!
//! The window stores the first and last visible row and column together with
//! their pixel positions. After a scroll only the edge that moved is walked,
//! starting from the previously known anchors, so the cost of a scroll tick is
//! proportional to the number of rows/columns that entered or left the
//! viewport rather than to the model size.

use std::ops::RangeInclusive;

/// An index on one axis paired with its unscrolled pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub index: usize,
    pub pos: i32,
}

impl Anchor {
    pub const fn new(index: usize, pos: i32) -> Self {
        Self { index, pos }
    }
}

/// Pending invalidation of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    /// Window is up to date.
    Valid,
    /// Anchors cannot be trusted; scan from index 0.
    #[default]
    Full,
    /// Scroll offset grew: content moved toward the trailing edge, so the
    /// window slides back toward index 0.
    Positive,
    /// Scroll offset shrank: the window slides toward higher indices.
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    const fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// What a [`scan`] is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Stop at the first index inside the visible span.
    FirstInside,
    /// Start inside the span and stop at the last index of that run.
    EdgeOfRun,
}

/// Geometry of one axis as seen by the scan.
#[derive(Debug, Clone, Copy)]
pub struct AxisSpan<'a> {
    /// Row heights or column widths
    pub sizes: &'a [i32],
    /// Gap between consecutive cells
    pub line_size: i32,
    /// Unscrolled position of index 0
    pub origin: i32,
    /// Scroll offset added to every position
    pub scroll: i32,
    /// Visible interval `[lo, hi)`
    pub lo: i32,
    pub hi: i32,
}

impl AxisSpan<'_> {
    /// A cell is inside iff `pos + scroll < hi && pos + size + scroll > lo`.
    pub fn is_inside(&self, pos: i32, size: i32) -> bool {
        pos + self.scroll < self.hi && pos + size + self.scroll > self.lo
    }

    fn size(&self, index: usize) -> i32 {
        self.sizes.get(index).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty() || self.hi <= self.lo
    }
}

/// Walk an axis from `start` in `dir`.
///
/// With [`ScanMode::FirstInside`] the first index inside the span is
/// returned, or `None` when the walk runs off the axis. With
/// [`ScanMode::EdgeOfRun`] the walk continues while indices are inside; on
/// the first index outside it turns around and returns the last inside one.
/// Running off the axis while still inside returns the boundary index.
/// `steps` is incremented once per visited index.
pub fn scan(
    span: &AxisSpan<'_>,
    start: Anchor,
    dir: Direction,
    mode: ScanMode,
    steps: &mut usize,
) -> Option<Anchor> {
    let count = span.sizes.len();
    if count == 0 || start.index >= count {
        return None;
    }

    let (mut index, mut pos) = (start.index, start.pos);
    let (mut dir, mut mode) = (dir, mode);
    loop {
        *steps += 1;
        let size = span.size(index);
        let inside = span.is_inside(pos, size);
        match mode {
            ScanMode::FirstInside if inside => return Some(Anchor::new(index, pos)),
            ScanMode::EdgeOfRun if !inside => {
                // Turn around: the previous index was the edge
                mode = ScanMode::FirstInside;
                dir = dir.reverse();
                continue;
            }
            _ => {}
        }

        match dir {
            Direction::Forward => {
                if index + 1 >= count {
                    break;
                }
                pos += size + span.line_size;
                index += 1;
            }
            Direction::Backward => {
                if index == 0 {
                    break;
                }
                index -= 1;
                pos -= span.size(index) + span.line_size;
            }
        }
    }

    match mode {
        ScanMode::FirstInside => None,
        ScanMode::EdgeOfRun => Some(Anchor::new(index, pos)),
    }
}

/// Anchor used when no index is inside a non-empty span: index 0 when the
/// content starts past `hi`, the last index when it ended before `lo`.
fn nearest_boundary(span: &AxisSpan<'_>) -> Anchor {
    if span.origin + span.scroll >= span.hi {
        return Anchor::new(0, span.origin);
    }
    let last = span.sizes.len().saturating_sub(1);
    let pos = span
        .sizes
        .iter()
        .take(last)
        .fold(span.origin, |pos, size| pos + size + span.line_size);
    Anchor::new(last, pos)
}

/// First/last visible anchors of one axis plus its pending invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisWindow {
    first: Option<Anchor>,
    last: Option<Anchor>,
    pending: Pending,
}

impl AxisWindow {
    pub const fn pending(&self) -> Pending {
        self.pending
    }

    /// Record a scroll of `delta` pixels.
    ///
    /// Same-direction deltas coalesce; a reversal falls back to a full scan.
    pub fn scrolled(&mut self, delta: i32) {
        let dir = match delta {
            0 => return,
            d if d > 0 => Pending::Positive,
            _ => Pending::Negative,
        };
        self.pending = match self.pending {
            Pending::Valid => dir,
            p if p == dir => p,
            _ => Pending::Full,
        };
    }

    pub fn invalidate(&mut self) {
        self.pending = Pending::Full;
    }

    fn has_anchors(&self) -> bool {
        self.first.is_some() && self.last.is_some()
    }

    fn clear(&mut self) {
        self.first = None;
        self.last = None;
    }

    fn update(&mut self, span: &AxisSpan<'_>, steps: &mut usize) {
        match (self.pending, self.first, self.last) {
            (Pending::Valid, ..) => return,
            (Pending::Positive, Some(_), Some(last)) => {
                self.last = scan(span, last, Direction::Backward, ScanMode::FirstInside, steps);
                self.first = self
                    .last
                    .and_then(|l| scan(span, l, Direction::Backward, ScanMode::EdgeOfRun, steps));
            }
            (Pending::Negative, Some(first), Some(_)) => {
                self.first = scan(span, first, Direction::Forward, ScanMode::FirstInside, steps);
                self.last = self
                    .first
                    .and_then(|f| scan(span, f, Direction::Forward, ScanMode::EdgeOfRun, steps));
            }
            _ => {
                let start = Anchor::new(0, span.origin);
                self.first = scan(span, start, Direction::Forward, ScanMode::FirstInside, steps);
                self.last = self
                    .first
                    .and_then(|f| scan(span, f, Direction::Forward, ScanMode::EdgeOfRun, steps));
            }
        }
        if !self.has_anchors() {
            let nearest = nearest_boundary(span);
            self.first = Some(nearest);
            self.last = Some(nearest);
        }
        self.pending = Pending::Valid;
    }
}

/// Cached first/last visible row and column.
///
/// Either all four anchors are present or none are.
#[derive(Debug, Clone, Default)]
pub struct VisibilityWindow {
    rows: AxisWindow,
    cols: AxisWindow,
    last_steps: usize,
}

impl VisibilityWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_row(&self) -> Option<Anchor> {
        self.visible(self.rows.first)
    }

    pub fn last_row(&self) -> Option<Anchor> {
        self.visible(self.rows.last)
    }

    pub fn first_col(&self) -> Option<Anchor> {
        self.visible(self.cols.first)
    }

    pub fn last_col(&self) -> Option<Anchor> {
        self.visible(self.cols.last)
    }

    /// Each axis keeps its own anchors so a later scroll can continue from
    /// them, but they are only reported while both axes have some.
    fn visible(&self, anchor: Option<Anchor>) -> Option<Anchor> {
        if self.has_visible_cells() {
            anchor
        } else {
            None
        }
    }

    pub fn has_visible_cells(&self) -> bool {
        self.rows.has_anchors() && self.cols.has_anchors()
    }

    /// Visible row indices, `None` for an empty window.
    pub fn row_range(&self) -> Option<RangeInclusive<usize>> {
        Some(self.first_row()?.index..=self.last_row()?.index)
    }

    /// Visible column indices, `None` for an empty window.
    pub fn col_range(&self) -> Option<RangeInclusive<usize>> {
        Some(self.first_col()?.index..=self.last_col()?.index)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_range().is_some_and(|r| r.contains(&row))
            && self.col_range().is_some_and(|c| c.contains(&col))
    }

    /// Whether either axis has a pending invalidation.
    pub fn needs_update(&self) -> bool {
        self.rows.pending != Pending::Valid || self.cols.pending != Pending::Valid
    }

    /// Indices visited by the most recent [`update`](Self::update).
    pub const fn last_steps(&self) -> usize {
        self.last_steps
    }

    pub fn scrolled(&mut self, dx: i32, dy: i32) {
        self.cols.scrolled(dx);
        self.rows.scrolled(dy);
    }

    pub fn invalidate_rows(&mut self) {
        self.rows.invalidate();
    }

    pub fn invalidate_cols(&mut self) {
        self.cols.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.rows.invalidate();
        self.cols.invalidate();
    }

    /// Empty the window (zero-size or hidden viewport). The next update after
    /// the viewport becomes usable again does a full scan.
    pub fn cancel(&mut self) {
        self.rows.clear();
        self.cols.clear();
        self.invalidate();
    }

    /// Resolve pending invalidations against the current geometry.
    pub fn update(&mut self, rows: &AxisSpan<'_>, cols: &AxisSpan<'_>) {
        if rows.is_empty() || cols.is_empty() {
            self.cancel();
            return;
        }
        if !self.needs_update() {
            return;
        }

        let rows_pending = self.rows.pending;
        let cols_pending = self.cols.pending;
        let mut steps = 0;
        self.cols.update(cols, &mut steps);
        self.rows.update(rows, &mut steps);
        self.last_steps = steps;

        tracing::trace!(
            target: "grid.window",
            ?rows_pending,
            ?cols_pending,
            steps,
            rows = ?self.row_range(),
            cols = ?self.col_range(),
            "window updated"
        );
    }
}
