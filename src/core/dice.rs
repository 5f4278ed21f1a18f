//! Dice.
//!
//! `Dice` sums `number_of_dice` independent six-sided faces. Faces come from
//! a [`FaceSource`]: a seeded [`GameRng`] in normal play, or a
//! [`LoadedFaces`] script for replays and tests.

use std::collections::VecDeque;

use super::error::{GameResult, ValidationError};
use super::rng::GameRng;

/// Something that yields die faces in `1..=6`.
pub trait FaceSource {
    fn next_face(&mut self) -> u8;
}

impl FaceSource for GameRng {
    fn next_face(&mut self) -> u8 {
        self.roll_die()
    }
}

/// A fixed script of faces, replayed cyclically.
///
/// Faces outside `1..=6` are clamped into range.
#[derive(Clone, Debug)]
pub struct LoadedFaces {
    faces: VecDeque<u8>,
}

impl LoadedFaces {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: VecDeque<u8> = faces.into_iter().map(|f| f.clamp(1, 6)).collect();
        Self { faces }
    }
}

impl FaceSource for LoadedFaces {
    fn next_face(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => {
                self.faces.push_back(face);
                face
            }
            None => 1,
        }
    }
}

/// A set of six-sided dice rolled together.
pub struct Dice {
    number_of_dice: u8,
    source: Box<dyn FaceSource>,
}

impl Dice {
    /// Create dice driven by a seeded RNG.
    pub fn new(number_of_dice: u8, rng: GameRng) -> GameResult<Self> {
        Self::with_source(number_of_dice, rng)
    }

    /// Create dice driven by any face source.
    pub fn with_source(
        number_of_dice: u8,
        source: impl FaceSource + 'static,
    ) -> GameResult<Self> {
        if number_of_dice == 0 {
            return Err(ValidationError::NoDice.into());
        }
        Ok(Self {
            number_of_dice,
            source: Box::new(source),
        })
    }

    #[must_use]
    pub fn number_of_dice(&self) -> u8 {
        self.number_of_dice
    }

    /// Roll every die and return the sum, in `[n, 6n]`.
    ///
    /// Faces outside `1..=6` are clamped, whatever the source.
    pub fn roll(&mut self) -> u32 {
        (0..self.number_of_dice)
            .map(|_| u32::from(self.source.next_face().clamp(1, 6)))
            .sum()
    }
}

impl std::fmt::Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dice")
            .field("number_of_dice", &self.number_of_dice)
            .finish_non_exhaustive()
    }
}
