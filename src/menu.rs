/// Title-screen selections and the best run of this process.

use crate::entities::{Character, Theme};

/// Best result seen so far.  Kept in memory only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestRun {
    pub distance: u64,
    pub stars: u32,
}

impl BestRun {
    /// Fold in a finished run; each field keeps its own maximum.
    pub fn record(&mut self, distance: u64, stars: u32) -> bool {
        let improved = distance > self.distance || stars > self.stars;
        self.distance = self.distance.max(distance);
        self.stars = self.stars.max(stars);
        improved
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuState {
    pub character: Character,
    pub theme: Theme,
    pub best: BestRun,
}

impl MenuState {
    pub fn new(character: Character, theme: Theme) -> Self {
        Self {
            character,
            theme,
            best: BestRun::default(),
        }
    }

    pub fn cycle_character(&mut self) {
        self.character = self.character.next();
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn select_character(&mut self, index: usize) {
        if let Some(c) = Character::ALL.get(index) {
            self.character = *c;
        }
    }
}

/// One volume step on the menu slider.
pub const VOLUME_STEP: f32 = 0.1;
