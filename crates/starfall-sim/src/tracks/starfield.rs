//! Background starfield — a fixed set of stars recycled by wrap-around.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::constants::{STAR_COUNT, STAR_MAX_SIZE, STAR_MIN_SIZE};
use starfall_core::types::{Bounds, Position};

/// A background star. Created once; x never changes after spawn.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Position,
    /// Cell size; doubles as fall speed, so larger stars fall faster.
    pub size: f64,
}

/// The full star set. Never grows or shrinks; the same stars cycle
/// through the canvas forever.
#[derive(Debug)]
pub struct StarField {
    stars: Vec<Star>,
    bounds: Bounds,
}

impl StarField {
    pub fn new(bounds: Bounds, rng: &mut ChaCha8Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Position::new(
                    rng.gen_range(0..bounds.width as u32) as f64,
                    rng.gen_range(0..bounds.height as u32) as f64,
                ),
                size: rng.gen_range(STAR_MIN_SIZE..STAR_MAX_SIZE),
            })
            .collect();
        Self { stars, bounds }
    }

    /// Advance one tick. A star at or past the bottom edge wraps to the
    /// top and spends the whole tick there; every other star falls by its
    /// own size.
    pub fn advance(&mut self) {
        for star in &mut self.stars {
            if star.pos.y >= self.bounds.height {
                star.pos.y = 0.0;
            } else {
                star.pos.y += star.size;
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field() -> StarField {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        StarField::new(Bounds::new(800.0, 600.0), &mut rng)
    }

    #[test]
    fn test_fixed_count_and_in_bounds_spawn() {
        let field = field();
        assert_eq!(field.stars().len(), STAR_COUNT);
        for star in field.stars() {
            assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < 600.0);
            assert!(star.size >= STAR_MIN_SIZE && star.size < STAR_MAX_SIZE);
        }
    }

    #[test]
    fn test_star_falls_by_its_size() {
        let mut field = field();
        field.stars[0].pos.y = 100.0;
        field.stars[0].size = 2.0;

        field.advance();
        assert_eq!(field.stars[0].pos.y, 102.0);
    }

    #[test]
    fn test_star_wraps_to_exactly_zero() {
        let mut field = field();
        field.stars[0].pos.y = 600.0;
        field.stars[0].size = 2.0;

        // The wrap consumes the whole tick: y lands on 0, not on size.
        field.advance();
        assert_eq!(field.stars[0].pos.y, 0.0);

        field.advance();
        assert_eq!(field.stars[0].pos.y, 2.0);
    }

    #[test]
    fn test_set_size_never_changes() {
        let mut field = field();
        let before: Vec<f64> = field.stars().iter().map(|s| s.size).collect();
        for _ in 0..50 {
            field.advance();
        }
        let after: Vec<f64> = field.stars().iter().map(|s| s.size).collect();
        assert_eq!(before, after);
        assert_eq!(field.stars().len(), STAR_COUNT);
    }
}
