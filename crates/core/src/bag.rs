//! Bag module - 7-bag random piece generation
//!
//! Implements the "7-bag" discipline: each bag holds one of every piece kind,
//! shuffled, consumed from the end until empty, then refilled with a fresh
//! permutation. The shuffle source is a small seedable LCG so whole games are
//! reproducible from a single seed.

use blockfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece source
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current bag; pieces are consumed from the end.
    bag: [PieceKind; 7],
    /// Count of pieces still unconsumed in `bag`.
    remaining: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a new bag source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            bag: PieceKind::ALL,
            remaining: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill();
        source
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.remaining = self.bag.len();
    }

    /// Draw the next piece, refilling the bag first if it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining == 0 {
            self.refill();
        }
        self.remaining -= 1;
        self.bag[self.remaining]
    }

    /// Look at the piece the next `draw` will return, without consuming it.
    /// Refills first when the bag is empty so a preview always exists.
    pub fn peek(&mut self) -> PieceKind {
        if self.remaining == 0 {
            self.refill();
        }
        self.bag[self.remaining - 1]
    }

    /// Discard the current bag and reshuffle. The RNG state carries on, so
    /// a reset game continues the same deterministic stream.
    pub fn reset(&mut self) {
        self.refill();
    }

    /// Pieces left in the current bag (for tests)
    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}
