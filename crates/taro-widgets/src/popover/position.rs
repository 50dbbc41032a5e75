use super::offset::Offset;
use ratatui::layout::Rect;

/// How far the screen is scrolled, added to reference coordinates so the
/// computed position is relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    /// Horizontal scroll in cells.
    pub x: f64,
    /// Vertical scroll in cells.
    pub y: f64,
}

impl ScrollOffset {
    /// A scroll offset of `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The placement of a popover relative to the document.
///
/// `left`/`top`/`width` copy the reference box; the offset expressions turn
/// into a separate translation, so the popover's visual origin is
/// `(left + translate_x, top + translate_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverPosition {
    /// Reference left edge plus horizontal scroll.
    pub left: f64,
    /// Reference top edge plus vertical scroll.
    pub top: f64,
    /// Reference width.
    pub width: f64,
    /// Horizontal offset evaluated against the reference width.
    pub translate_x: f64,
    /// Vertical offset evaluated against the reference height.
    pub translate_y: f64,
}

impl PopoverPosition {
    /// Compute a position from the reference box.
    ///
    /// A missing reference is treated as a zero-sized box at the origin.
    pub fn compute(reference: Option<Rect>, offset: &Offset, scroll: ScrollOffset) -> Self {
        let reference = reference.unwrap_or_default();
        let width = f64::from(reference.width);
        let height = f64::from(reference.height);
        Self {
            left: scroll.x + f64::from(reference.x),
            top: scroll.y + f64::from(reference.y),
            width,
            translate_x: offset.left.eval(width),
            translate_y: offset.top.eval(height),
        }
    }

    /// The translation as a `translate(Xpx, Ypx)` string.
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.translate_x, self.translate_y)
    }

    /// Where the popover's top-left corner lands, in document coordinates.
    pub fn origin(&self) -> (f64, f64) {
        (self.left + self.translate_x, self.top + self.translate_y)
    }

    /// Convert to a screen rectangle `height` rows tall, clipped to `bounds`.
    ///
    /// `scroll` is subtracted again to go from document to screen
    /// coordinates. The result is empty when nothing is visible.
    pub fn to_rect(&self, height: u16, scroll: ScrollOffset, bounds: Rect) -> Rect {
        let (x, y) = self.origin();
        let x0 = (x - scroll.x).round() as i64;
        let y0 = (y - scroll.y).round() as i64;
        let x1 = x0 + self.width.round().max(0.0) as i64;
        let y1 = y0 + i64::from(height);

        let left = x0.max(i64::from(bounds.left()));
        let top = y0.max(i64::from(bounds.top()));
        let right = x1.min(i64::from(bounds.right()));
        let bottom = y1.min(i64::from(bounds.bottom()));
        if right <= left || bottom <= top {
            return Rect::new(bounds.x, bounds.y, 0, 0);
        }
        // Every value is inside `bounds` here, so the casts cannot truncate.
        Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_reference() {
        let offset = Offset::new("0", "100%").unwrap();
        let pos =
            PopoverPosition::compute(Some(Rect::new(10, 20, 100, 50)), &offset, ScrollOffset::default());
        assert_eq!(pos.left, 10.0);
        assert_eq!(pos.top, 20.0);
        assert_eq!(pos.width, 100.0);
        assert_eq!(pos.transform(), "translate(0px, 50px)");
    }

    #[test]
    fn scroll_is_added() {
        let pos = PopoverPosition::compute(
            Some(Rect::new(2, 3, 10, 4)),
            &Offset::below(),
            ScrollOffset::new(5.0, 7.0),
        );
        assert_eq!(pos.left, 7.0);
        assert_eq!(pos.top, 10.0);
        assert_eq!(pos.origin(), (7.0, 14.0));
    }

    #[test]
    fn missing_reference_is_zero_sized() {
        let offset = Offset::new("4", "50%").unwrap();
        let pos = PopoverPosition::compute(None, &offset, ScrollOffset::default());
        assert_eq!(pos.left, 0.0);
        assert_eq!(pos.top, 0.0);
        assert_eq!(pos.width, 0.0);
        assert_eq!(pos.transform(), "translate(4px, 0px)");
    }

    #[test]
    fn mixed_offsets() {
        let offset = Offset::new("50% - 2", "-100%").unwrap();
        let pos =
            PopoverPosition::compute(Some(Rect::new(0, 10, 20, 3)), &offset, ScrollOffset::default());
        assert_eq!(pos.translate_x, 8.0);
        assert_eq!(pos.translate_y, -3.0);
    }

    #[test]
    fn to_rect_places_below() {
        let pos = PopoverPosition::compute(
            Some(Rect::new(2, 1, 20, 3)),
            &Offset::below(),
            ScrollOffset::default(),
        );
        let rect = pos.to_rect(5, ScrollOffset::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(2, 4, 20, 5));
    }

    #[test]
    fn to_rect_clips_to_bounds() {
        let pos = PopoverPosition::compute(
            Some(Rect::new(70, 20, 20, 3)),
            &Offset::below(),
            ScrollOffset::default(),
        );
        let rect = pos.to_rect(5, ScrollOffset::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(70, 23, 10, 1));
    }

    #[test]
    fn to_rect_fully_outside_is_empty() {
        let offset = Offset::new("-100%", "0").unwrap();
        let pos =
            PopoverPosition::compute(Some(Rect::new(0, 0, 10, 1)), &offset, ScrollOffset::default());
        assert!(pos
            .to_rect(3, ScrollOffset::default(), Rect::new(0, 0, 80, 24))
            .is_empty());
    }

    #[test]
    fn to_rect_removes_scroll() {
        let scroll = ScrollOffset::new(0.0, 10.0);
        let pos = PopoverPosition::compute(Some(Rect::new(0, 2, 10, 1)), &Offset::below(), scroll);
        assert_eq!(pos.top, 12.0);
        let rect = pos.to_rect(2, scroll, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(0, 3, 10, 2));
    }
}
