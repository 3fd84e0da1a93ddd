//! RNG module - where new pieces come from
//!
//! The game draws each new piece kind from a [`PieceSource`]. Play uses
//! [`RandomPieces`], a uniform choice over all kinds driven by a small seeded
//! LCG so that a seed reproduces a game. Tests use [`ScriptedPieces`] to
//! force an exact sequence.

use crate::types::PieceKind;

/// Supplies the kind of each newly materialized piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a weak first draw
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniformly random piece kinds
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: SimpleRng,
}

impl RandomPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// A fixed sequence of kinds, repeated forever
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPieces {
    /// `kinds` must not be empty
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "scripted piece sequence is empty");
        Self { kinds, index: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

impl<P: PieceSource + ?Sized> PieceSource for Box<P> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
