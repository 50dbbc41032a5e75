//! Popovers: content anchored to a reference box.
//!
//! A [`Popover`] copies the reference box's left/top/width and shifts itself
//! by an [`Offset`] evaluated against the reference size. The position is
//! recomputed only when the reference box changes, as decided by the
//! [`MeasureStrategy`].
//!
//! ```
//! use ratatui::layout::Rect;
//! use taro_widgets::popover::{Offset, Popover};
//!
//! let popover = Popover::new(Offset::new("0", "100%").unwrap());
//! let position = popover.place(Some(Rect::new(10, 20, 100, 50)));
//! assert_eq!((position.left, position.top), (10.0, 20.0));
//! assert_eq!(position.transform(), "translate(0px, 50px)");
//! ```

mod measure;
mod offset;
mod position;

pub use measure::{Measure, MeasureStrategy};
pub use offset::{Offset, OffsetError, OffsetExpr, Term, Unit};
pub use position::{PopoverPosition, ScrollOffset};

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;
use std::cell::Cell;

/// A positioned overlay.
///
/// Placement state lives in [`Cell`]s so it can be refreshed from
/// `view(&self)`, which is where the reference box becomes known.
#[derive(Debug, Clone)]
pub struct Popover {
    offset: Offset,
    scroll: ScrollOffset,
    measure: Cell<Measure>,
    position: Cell<Option<PopoverPosition>>,
    block: Option<Block<'static>>,
}

impl Popover {
    /// A popover with the given offset, observing its reference for any
    /// change.
    pub fn new(offset: Offset) -> Self {
        Self {
            offset,
            scroll: ScrollOffset::default(),
            measure: Cell::new(Measure::new(MeasureStrategy::default())),
            position: Cell::new(None),
            block: None,
        }
    }

    /// Change how reference changes are detected.
    pub fn with_strategy(mut self, strategy: MeasureStrategy) -> Self {
        self.measure = Cell::new(Measure::new(strategy));
        self.position.set(None);
        self
    }

    /// Border drawn around the popover content.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set the initial scroll offset.
    pub fn with_scroll(mut self, scroll: ScrollOffset) -> Self {
        self.set_scroll(scroll);
        self
    }

    /// Update the scroll offset; the next placement recomputes.
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
        self.position.set(None);
    }

    /// The configured offset.
    pub fn offset(&self) -> &Offset {
        &self.offset
    }

    /// Replace the offset; the next placement recomputes.
    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
        self.position.set(None);
    }

    /// The most recently computed position, if any.
    pub fn position(&self) -> Option<PopoverPosition> {
        self.position.get()
    }

    /// Measure `reference` and return the popover position, recomputing it
    /// only when the reference changed.
    pub fn place(&self, reference: Option<Rect>) -> PopoverPosition {
        let mut measure = self.measure.get();
        let changed = measure.observe(reference.unwrap_or_default());
        self.measure.set(measure);

        match self.position.get() {
            Some(position) if !changed => position,
            _ => {
                let position = PopoverPosition::compute(reference, &self.offset, self.scroll);
                log::trace!(
                    "popover remeasured: left={} top={} {}",
                    position.left,
                    position.top,
                    position.transform()
                );
                self.position.set(Some(position));
                position
            }
        }
    }

    /// The screen area of a popover `height` rows tall, clipped to `bounds`.
    pub fn area(&self, reference: Option<Rect>, height: u16, bounds: Rect) -> Rect {
        self.place(reference).to_rect(height, self.scroll, bounds)
    }

    /// Clear `area`, draw the border if any and return the content area.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> Rect {
        if area.is_empty() {
            return area;
        }
        frame.render_widget(Clear, area);
        match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        }
    }

    /// Drop the cached measurement. The next placement always recomputes.
    pub fn reset(&self) {
        let mut measure = self.measure.get();
        measure.reset();
        self.measure.set(measure);
        self.position.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::widgets::Paragraph;
    use ratatui::Terminal;

    #[test]
    fn place_caches_until_reference_changes() {
        let popover = Popover::new(Offset::below());
        let first = popover.place(Some(Rect::new(0, 0, 10, 3)));
        assert_eq!(popover.position(), Some(first));

        let moved = popover.place(Some(Rect::new(4, 0, 10, 3)));
        assert_eq!(moved.left, 4.0);
    }

    #[test]
    fn size_only_keeps_stale_position_on_move() {
        let popover = Popover::new(Offset::below()).with_strategy(MeasureStrategy::SizeOnly);
        popover.place(Some(Rect::new(0, 0, 10, 3)));
        let moved = popover.place(Some(Rect::new(4, 0, 10, 3)));
        assert_eq!(moved.left, 0.0);

        let resized = popover.place(Some(Rect::new(4, 0, 12, 3)));
        assert_eq!(resized.left, 4.0);
        assert_eq!(resized.width, 12.0);
    }

    #[test]
    fn reset_forces_recompute() {
        let popover = Popover::new(Offset::below()).with_strategy(MeasureStrategy::SizeOnly);
        popover.place(Some(Rect::new(0, 0, 10, 3)));
        popover.reset();
        assert_eq!(popover.position(), None);
        let moved = popover.place(Some(Rect::new(4, 0, 10, 3)));
        assert_eq!(moved.left, 4.0);
    }

    #[test]
    fn scroll_change_recomputes() {
        let mut popover = Popover::new(Offset::below());
        popover.place(Some(Rect::new(0, 0, 10, 3)));
        popover.set_scroll(ScrollOffset::new(0.0, 2.0));
        let pos = popover.place(Some(Rect::new(0, 0, 10, 3)));
        assert_eq!(pos.top, 2.0);
    }

    #[test]
    fn render_clears_and_returns_inner() {
        let backend = TestBackend::new(12, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let popover = Popover::new(Offset::below()).with_block(Block::bordered());
        terminal
            .draw(|frame| {
                frame.render_widget(Paragraph::new("xxxxxxxxxxxx\n".repeat(6)), frame.area());
                let area = popover.area(Some(Rect::new(0, 0, 12, 1)), 3, frame.area());
                assert_eq!(area, Rect::new(0, 1, 12, 3));
                let inner = popover.render(frame, area);
                assert_eq!(inner, Rect::new(1, 2, 10, 1));
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), "x");
        assert_eq!(buf[(1, 2)].symbol(), " ");
        assert_eq!(buf[(0, 4)].symbol(), "x");
    }
}
