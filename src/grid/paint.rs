//! Painting for `Grid`.
//!
//! Cells are painted in a fixed order: backgrounds (provider color, then the
//! selection on top, then the cursor marker), cell views, grid lines. The
//! caption is painted last in its own band. Every `save` is paired with a
//! `restore` before an error from a cell view is returned.

use super::{Frame, Grid};
use crate::cursor::NavigationMode;
use crate::error::Result;
use crate::layout::Axis;
use crate::render::PaintSurface;
use crate::types::Rect;

/// Thickness of the cursor marker outline.
const MARKER_WIDTH: i32 = 2;

/// A visible row or column: index, unscrolled position and size.
#[derive(Debug, Clone, Copy)]
struct Span {
    index: usize,
    pos: i32,
    size: i32,
}

impl Grid {
    /// Paint the visible part of the grid.
    pub fn paint(&mut self, surface: &mut dyn PaintSurface) -> Result<()> {
        self.validate();
        let frame = self.frame();
        let rows = self.visible_spans(Axis::Rows);
        let cols = self.visible_spans(Axis::Cols);

        if !rows.is_empty() && !cols.is_empty() {
            surface.save();
            surface.clip_rect(frame.area);
            surface.translate(self.scroll.sx(), self.scroll.sy());
            self.paint_backgrounds(surface, &rows, &cols);
            self.paint_marker(surface, &rows, &cols);
            let result = self.paint_content(surface, &rows, &cols);
            if result.is_ok() {
                self.paint_lines(surface, &rows, &cols);
            }
            surface.restore();
            result?;
        }

        if self.caption.is_some() {
            self.paint_caption(surface, &frame, &cols);
        }
        Ok(())
    }

    fn visible_spans(&self, axis: Axis) -> Vec<Span> {
        let (first, last) = match axis {
            Axis::Rows => (self.window.first_row(), self.window.last_row()),
            Axis::Cols => (self.window.first_col(), self.window.last_col()),
        };
        let (Some(first), Some(last)) = (first, last) else {
            return Vec::new();
        };
        let sizes = self.metrics.sizes(axis);
        let line = self.metrics.line_size();
        let mut pos = first.pos;
        (first.index..=last.index)
            .map(|index| {
                let size = sizes.get(index).copied().unwrap_or(0);
                let span = Span { index, pos, size };
                pos += size + line;
                span
            })
            .collect()
    }

    fn paint_backgrounds(&self, surface: &mut dyn PaintSurface, rows: &[Span], cols: &[Span]) {
        for row in rows {
            let selected = self.selection.is_selected(row.index);
            for col in cols {
                let color = if selected {
                    Some(self.config.select_color)
                } else {
                    self.views.cell_color(row.index, col.index)
                };
                if let Some(color) = color {
                    surface.fill_rect(Rect::new(col.pos, row.pos, col.size, row.size), color);
                }
            }
        }
    }

    /// Outline the cursor cell, or the cursor row in row navigation.
    fn paint_marker(&self, surface: &mut dyn PaintSurface, rows: &[Span], cols: &[Span]) {
        if self.is_editing() {
            return;
        }
        let Some(line) = self.cursor.line() else {
            return;
        };
        let Some(row) = rows.iter().find(|r| r.index == line) else {
            return;
        };
        let (Some(first), Some(last)) = (cols.first(), cols.last()) else {
            return;
        };
        let (left, right) = match self.navigation_mode() {
            NavigationMode::Row => (first.pos, last.pos + last.size),
            NavigationMode::Cell => {
                let Some(col) = self
                    .cursor
                    .col()
                    .and_then(|c| cols.iter().find(|s| s.index == c))
                else {
                    return;
                };
                (col.pos, col.pos + col.size)
            }
        };
        let color = self.config.marker_color;
        let w = MARKER_WIDTH;
        let (top, bottom) = (row.pos, row.pos + row.size);
        surface.fill_rect(Rect::new(left, top, right - left, w), color);
        surface.fill_rect(Rect::new(left, bottom - w, right - left, w), color);
        surface.fill_rect(Rect::new(left, top, w, row.size), color);
        surface.fill_rect(Rect::new(right - w, top, w, row.size), color);
    }

    fn paint_content(
        &self,
        surface: &mut dyn PaintSurface,
        rows: &[Span],
        cols: &[Span],
    ) -> Result<()> {
        // An inline editor covers its cell
        let covered = self
            .editing_cell()
            .filter(|_| self.editor().is_some_and(|e| !e.is_popup()));
        let insets = self.config.cell_insets;
        for row in rows {
            for col in cols {
                if covered == Some((row.index, col.index)) {
                    continue;
                }
                let value = self.model.get(row.index, col.index);
                let Some(view) = self.views.view(row.index, col.index, value) else {
                    continue;
                };
                let inner = Rect::new(col.pos, row.pos, col.size, row.size).inset(&insets);
                let ps = view.preferred_size();
                let dx = self
                    .views
                    .x_alignment(row.index, col.index, value)
                    .offset(inner.width, ps.width);
                let dy = self
                    .views
                    .y_alignment(row.index, col.index, value)
                    .offset(inner.height, ps.height);

                surface.save();
                surface.clip_rect(inner);
                let result = view.paint(
                    surface,
                    Rect::new(inner.x + dx, inner.y + dy, ps.width, ps.height),
                );
                surface.restore();
                if let Err(error) = result {
                    tracing::warn!(
                        target: "grid.paint",
                        row = row.index,
                        col = col.index,
                        %error,
                        "cell view failed to paint"
                    );
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn paint_lines(&self, surface: &mut dyn PaintSurface, rows: &[Span], cols: &[Span]) {
        let line = self.metrics.line_size();
        if line <= 0 {
            return;
        }
        let (Some(first_row), Some(last_row)) = (rows.first(), rows.last()) else {
            return;
        };
        let (Some(first_col), Some(last_col)) = (cols.first(), cols.last()) else {
            return;
        };
        let color = self.config.line_color;
        let half = line / 2;
        let left = first_col.pos - line;
        let right = last_col.pos + last_col.size + line;
        let top = first_row.pos - line;
        let bottom = last_row.pos + last_row.size + line;

        let gaps_y = rows
            .iter()
            .map(|r| r.pos - line)
            .chain(std::iter::once(last_row.pos + last_row.size));
        for gap in gaps_y {
            surface.draw_line(left, gap + half, right, gap + half, line, color);
        }
        let gaps_x = cols
            .iter()
            .map(|c| c.pos - line)
            .chain(std::iter::once(last_col.pos + last_col.size));
        for gap in gaps_x {
            surface.draw_line(gap + half, top, gap + half, bottom, line, color);
        }
    }

    fn paint_caption(&self, surface: &mut dyn PaintSurface, frame: &Frame, cols: &[Span]) {
        let Some(caption) = &self.caption else {
            return;
        };
        let band = frame.caption;
        if band.is_empty() {
            return;
        }
        let insets = self.config.cell_insets;
        let text_color = self.config.text_color;
        surface.save();
        surface.clip_rect(band);
        surface.fill_rect(band, self.config.caption_color);
        surface.translate(self.scroll.sx(), 0);
        for col in cols {
            if let Some(title) = caption.title(col.index) {
                surface.fill_text(title, col.pos + insets.left, band.y + insets.top, text_color);
            }
            let edge = col.pos + col.size;
            surface.draw_line(edge, band.y, edge, band.bottom(), 1, self.config.line_color);
        }
        surface.restore();

        let border = self.config.caption_color.darken(0.2);
        let y = band.bottom() - 1;
        surface.draw_line(band.x, y, band.right(), y, 1, border);
    }
}
