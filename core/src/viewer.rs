use deck_common::{Deck, Slide};

/// Navigation state over a received deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideViewer {
    deck: Deck,
    cursor: usize,
    export_panel_open: bool,
}

impl SlideViewer {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            cursor: 0,
            export_panel_open: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.deck.slides.get(self.cursor)
    }

    fn last_index(&self) -> usize {
        self.deck.len().saturating_sub(1)
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor >= self.last_index()
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.cursor < self.last_index() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.last_index();
    }

    /// e.g. `SLIDE 2 / 7`
    pub fn position_label(&self) -> String {
        format!("SLIDE {} / {}", self.cursor + 1, self.deck.len())
    }

    /// Fraction of the deck shown so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.deck.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f64 / self.deck.len() as f64
    }

    pub fn export_panel_open(&self) -> bool {
        self.export_panel_open
    }

    pub fn toggle_export_panel(&mut self) {
        self.export_panel_open = !self.export_panel_open;
    }

    pub fn close_export_panel(&mut self) {
        self.export_panel_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Deck {
        Deck {
            title: "Deck".to_string(),
            slides: (1..=n)
                .map(|i| Slide {
                    title: format!("Slide {i}"),
                    bullets: vec![format!("Point {i}")],
                })
                .collect(),
        }
    }

    #[test]
    fn test_starts_at_first_slide() {
        let viewer = SlideViewer::new(deck(3));
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.current_slide().map(|s| s.title.as_str()), Some("Slide 1"));
        assert_eq!(viewer.position_label(), "SLIDE 1 / 3");
        assert!(!viewer.export_panel_open());
    }

    #[test]
    fn test_next_is_idempotent_at_end() {
        let mut viewer = SlideViewer::new(deck(3));
        assert!(viewer.next());
        assert!(viewer.next());
        assert!(viewer.is_last());
        for _ in 0..3 {
            assert!(!viewer.next());
            assert_eq!(viewer.cursor(), 2);
        }
        assert!((viewer.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prev_is_idempotent_at_start() {
        let mut viewer = SlideViewer::new(deck(2));
        assert!(!viewer.prev());
        assert!(!viewer.prev());
        assert_eq!(viewer.cursor(), 0);
        viewer.last();
        assert!(viewer.prev());
        assert!(viewer.is_first());
    }

    #[test]
    fn test_single_slide_deck() {
        let mut viewer = SlideViewer::new(deck(1));
        assert!(viewer.is_first() && viewer.is_last());
        assert!(!viewer.next());
        assert!(!viewer.prev());
    }

    #[test]
    fn test_export_panel_toggle() {
        let mut viewer = SlideViewer::new(deck(2));
        viewer.next();
        viewer.toggle_export_panel();
        assert!(viewer.export_panel_open());
        assert_eq!(viewer.cursor(), 1);
        viewer.close_export_panel();
        assert!(!viewer.export_panel_open());
    }
}
