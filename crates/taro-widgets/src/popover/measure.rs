use ratatui::layout::Rect;

/// When a reference box counts as changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureStrategy {
    /// Any change to position or size triggers a remeasure.
    #[default]
    Observe,
    /// Only size changes trigger a remeasure; a reference that moves without
    /// resizing keeps the previous position.
    SizeOnly,
}

/// Tracks the last observed reference box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measure {
    strategy: MeasureStrategy,
    last: Option<Rect>,
}

impl Measure {
    /// A fresh measure, so the first observation always counts as a change.
    pub fn new(strategy: MeasureStrategy) -> Self {
        Self {
            strategy,
            last: None,
        }
    }

    /// The strategy in use.
    pub fn strategy(&self) -> MeasureStrategy {
        self.strategy
    }

    /// Record `rect` and report whether the popover must be repositioned.
    pub fn observe(&mut self, rect: Rect) -> bool {
        let changed = match (self.strategy, self.last) {
            (_, None) => true,
            (MeasureStrategy::Observe, Some(last)) => last != rect,
            (MeasureStrategy::SizeOnly, Some(last)) => last.as_size() != rect.as_size(),
        };
        if changed {
            self.last = Some(rect);
        }
        changed
    }

    /// The box the current position was computed from.
    pub fn last(&self) -> Option<Rect> {
        self.last
    }

    /// Forget the last box.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_changes() {
        let mut m = Measure::new(MeasureStrategy::Observe);
        assert!(m.observe(Rect::default()));
        assert_eq!(m.last(), Some(Rect::default()));
    }

    #[test]
    fn observe_tracks_moves_and_resizes() {
        let mut m = Measure::new(MeasureStrategy::Observe);
        m.observe(Rect::new(0, 0, 10, 3));
        assert!(!m.observe(Rect::new(0, 0, 10, 3)));
        assert!(m.observe(Rect::new(1, 0, 10, 3)));
        assert!(m.observe(Rect::new(1, 0, 12, 3)));
    }

    #[test]
    fn size_only_ignores_moves() {
        let mut m = Measure::new(MeasureStrategy::SizeOnly);
        m.observe(Rect::new(0, 0, 10, 3));
        assert!(!m.observe(Rect::new(5, 5, 10, 3)));
        assert_eq!(m.last(), Some(Rect::new(0, 0, 10, 3)));
        assert!(m.observe(Rect::new(5, 5, 11, 3)));
    }

    #[test]
    fn reset_forgets() {
        let mut m = Measure::new(MeasureStrategy::SizeOnly);
        m.observe(Rect::new(0, 0, 10, 3));
        m.reset();
        assert!(m.observe(Rect::new(0, 0, 10, 3)));
    }
}
