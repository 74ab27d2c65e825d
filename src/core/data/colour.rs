#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour { r: 0, g: 0, b: 0 };

    /// Scales every channel by `factor`, clamped to `[0, 1]`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Colour {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let scale = |channel: u8| (f64::from(channel) * factor).round() as u8;

        Colour {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}
