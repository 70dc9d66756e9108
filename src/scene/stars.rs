use crate::map::ScreenPoint;

pub const STAR_COUNT: usize = 200;
const MAX_STAR_RADIUS: f64 = 1.5;

/// Fast 2-value hash with xorshift
#[inline(always)]
fn hash2(a: u64, b: u64) -> u64 {
    let mut seed = a.wrapping_mul(2654435761).wrapping_add(b.wrapping_mul(2246822519));
    seed ^= seed << 13;
    seed ^= seed >> 7;
    seed ^= seed << 17;
    seed
}

/// Deterministic uniform in [0, 1) using splitmix64
#[inline(always)]
fn unit(seed: u64) -> f64 {
    let mut x = seed.wrapping_mul(0x9e3779b97f4a7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    (x >> 11) as f64 / 9007199254740992.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub at: ScreenPoint,
    pub radius: f64,
}

/// Background stars, generated once per mount so they stay put across redraws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(width: f64, height: f64, seed: u64) -> Self {
        let stars = (0..STAR_COUNT as u64)
            .map(|i| {
                let base = hash2(seed, i);
                Star {
                    at: (unit(base) * width, unit(base ^ 0x5851f42d4c957f2d) * height),
                    radius: unit(base.wrapping_add(0x2545F4914F6CDD1D)) * MAX_STAR_RADIUS,
                }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
