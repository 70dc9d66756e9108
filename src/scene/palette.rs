/// 8-bit RGB colour, independent of any drawing backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Linear blend, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
pub const STAR: Rgb = Rgb(255, 255, 255);
pub const OCEAN: Rgb = Rgb::hex(0x87CEEB);
pub const FOCAL_LAND: Rgb = Rgb::hex(0x009A49);
pub const LAND: Rgb = Rgb::hex(0xF0E4D7);
/// Half-transparent black border pre-blended over land.
pub const BORDER: Rgb = Rgb(120, 114, 108);
pub const ARC_LOW: Rgb = Rgb::hex(0xFFD23F);
pub const ARC_HIGH: Rgb = Rgb::hex(0xE3170A);
pub const OTHER_NODE: Rgb = Rgb::hex(0x9E9E9E);
pub const TOOLTIP_FG: Rgb = Rgb(0, 0, 0);
pub const TOOLTIP_BG: Rgb = Rgb(255, 255, 255);
pub const LABEL: Rgb = Rgb(230, 230, 230);

const CATEGORY: [Rgb; 10] = [
    Rgb::hex(0xFF5733),
    Rgb::hex(0x33FF57),
    Rgb::hex(0x3357FF),
    Rgb::hex(0xFF33A1),
    Rgb::hex(0x33FFF5),
    Rgb::hex(0xF5FF33),
    Rgb::hex(0x9C33FF),
    Rgb::hex(0xFF9633),
    Rgb::hex(0x33FF9C),
    Rgb::hex(0xFF3333),
];

/// Ordinal colour for the n-th category node.
pub fn category(index: usize) -> Rgb {
    CATEGORY[index % CATEGORY.len()]
}

/// Arc colour at the destination end for a normalized weight.
pub fn magnitude(weight: f64) -> Rgb {
    ARC_LOW.lerp(ARC_HIGH, weight)
}
