//! The slide deck that presents the charts as a story.

mod deck;
mod pages;
mod slides;
mod tooltip;

pub use deck::StoryDeck;
pub use pages::{
    BidirectionalPage, DotChartPage, SankeyPage, ScatterPersonalityPage, ScatterPlotPage,
};
pub use slides::{IntroKind, IntroSlide, LastSlide, TitleSlide};
pub use tooltip::TooltipPanel;

/// Slides in story order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Title,
    DotIntro,
    DotChart,
    Sankey,
    ScatterIntro,
    ScatterPersonality,
    ScatterIsolation,
    BidirectionalIntro,
    Bidirectional,
    Closing,
}

impl Slide {
    pub const ALL: [Slide; 10] = [
        Slide::Title,
        Slide::DotIntro,
        Slide::DotChart,
        Slide::Sankey,
        Slide::ScatterIntro,
        Slide::ScatterPersonality,
        Slide::ScatterIsolation,
        Slide::BidirectionalIntro,
        Slide::Bidirectional,
        Slide::Closing,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn at(index: usize) -> Option<Slide> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn chapter(self) -> Chapter {
        match self {
            Slide::Title => Chapter::Opening,
            Slide::DotIntro | Slide::DotChart | Slide::Sankey => Chapter::Distress,
            Slide::ScatterIntro | Slide::ScatterPersonality | Slide::ScatterIsolation => {
                Chapter::Correlations
            }
            Slide::BidirectionalIntro | Slide::Bidirectional => Chapter::Factors,
            Slide::Closing => Chapter::Closing,
        }
    }

    /// Slides that show a chart rather than text.
    pub fn is_chart(self) -> bool {
        matches!(
            self,
            Slide::DotChart
                | Slide::Sankey
                | Slide::ScatterPersonality
                | Slide::ScatterIsolation
                | Slide::Bidirectional
        )
    }
}

/// Groups of slides linked from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chapter {
    Opening,
    Distress,
    Correlations,
    Factors,
    Closing,
}

impl Chapter {
    pub const ALL: [Chapter; 5] = [
        Chapter::Opening,
        Chapter::Distress,
        Chapter::Correlations,
        Chapter::Factors,
        Chapter::Closing,
    ];

    pub fn first_slide(self) -> Slide {
        Slide::ALL
            .into_iter()
            .find(|slide| slide.chapter() == self)
            .unwrap_or(Slide::Title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    Next,
    Prev,
}

impl DeckAction {
    /// Arrow keys move through the deck; everything else is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "ArrowRight" => Some(DeckAction::Next),
            "ArrowUp" | "ArrowLeft" => Some(DeckAction::Prev),
            _ => None,
        }
    }
}

/// Position in a deck of `len` slides. Moves are clamped to the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    index: usize,
    len: usize,
}

impl Deck {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn at(len: usize, index: usize) -> Self {
        let mut deck = Self::new(len);
        deck.goto(index);
        deck
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn goto(&mut self, index: usize) -> bool {
        let target = index.min(self.len.saturating_sub(1));
        let moved = target != self.index;
        self.index = target;
        moved
    }

    pub fn apply(&mut self, action: DeckAction) -> bool {
        match action {
            DeckAction::Next => self.next(),
            DeckAction::Prev => self.prev(),
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(Slide::COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut deck = Deck::default();
        assert!(!deck.prev());
        assert_eq!(deck.index(), 0);

        for _ in 0..20 {
            deck.next();
        }
        assert_eq!(deck.index(), Slide::COUNT - 1);
        assert!(deck.is_last());
        assert!(!deck.next());

        assert!(deck.prev());
        assert_eq!(deck.index(), Slide::COUNT - 2);
    }

    #[test]
    fn goto_clamps_out_of_range_indices() {
        let mut deck = Deck::default();
        assert!(deck.goto(4));
        assert_eq!(deck.index(), 4);
        deck.goto(99);
        assert_eq!(deck.index(), 9);
        assert!(!deck.goto(9));
        assert_eq!(Deck::at(10, 42).index(), 9);
    }

    #[test]
    fn arrow_keys_map_to_actions() {
        assert_eq!(DeckAction::from_key("ArrowDown"), Some(DeckAction::Next));
        assert_eq!(DeckAction::from_key("ArrowRight"), Some(DeckAction::Next));
        assert_eq!(DeckAction::from_key("ArrowUp"), Some(DeckAction::Prev));
        assert_eq!(DeckAction::from_key("ArrowLeft"), Some(DeckAction::Prev));
        assert_eq!(DeckAction::from_key("Enter"), None);

        let mut deck = Deck::default();
        deck.apply(DeckAction::Next);
        deck.apply(DeckAction::Next);
        deck.apply(DeckAction::Prev);
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn chapters_start_at_their_first_slide() {
        assert_eq!(Slide::COUNT, 10);
        assert_eq!(Chapter::Distress.first_slide(), Slide::DotIntro);
        assert_eq!(Chapter::Correlations.first_slide(), Slide::ScatterIntro);
        assert_eq!(Chapter::Factors.first_slide().index(), 7);
        for (index, slide) in Slide::ALL.into_iter().enumerate() {
            assert_eq!(slide.index(), index);
            assert_eq!(Slide::at(index), Some(slide));
        }
        assert_eq!(Slide::at(10), None);
    }
}
