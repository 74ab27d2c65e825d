use std::fmt;

/// How trustworthy a single reading is, judged from how close the carriage
/// sat to a dark fringe and how fast it was travelling when the key was hit.
///
/// Variants are declared worst first so that `Ord` ranks better grades higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MeasurementQuality {
    #[default]
    Standard,
    Good,
    High,
    VeryHigh,
    UltraHigh,
}

/// `(grade, max distance to the nearest fringe in mm, max speed in mm/s)`,
/// best grade first.
const GRADES: [(MeasurementQuality, f64, f64); 4] = [
    (MeasurementQuality::UltraHigh, 0.001, 0.001),
    (MeasurementQuality::VeryHigh, 0.01, 0.01),
    (MeasurementQuality::High, 0.05, 0.05),
    (MeasurementQuality::Good, 0.1, 0.1),
];

impl MeasurementQuality {
    /// Best first.
    pub const ALL: [Self; 5] = [
        Self::UltraHigh,
        Self::VeryHigh,
        Self::High,
        Self::Good,
        Self::Standard,
    ];

    /// Both bounds are strict. Non-finite inputs grade as `Standard`.
    #[must_use]
    pub fn grade(fringe_distance_mm: f64, speed_mm_per_s: f64) -> Self {
        let distance = fringe_distance_mm.abs();
        let speed = speed_mm_per_s.abs();

        GRADES
            .iter()
            .find(|(_, max_distance, max_speed)| distance < *max_distance && speed < *max_speed)
            .map_or(Self::Standard, |(quality, ..)| *quality)
    }

    /// Weight of a ring read at this grade in the weighted wavelength mean.
    /// `Good` counts no more than `Standard`.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::UltraHigh => 4.0,
            Self::VeryHigh => 3.0,
            Self::High => 2.0,
            Self::Good | Self::Standard => 1.0,
        }
    }
}

impl fmt::Display for MeasurementQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UltraHigh => "ultra-high",
            Self::VeryHigh => "very high",
            Self::High => "high",
            Self::Good => "good",
            Self::Standard => "standard",
        };
        f.write_str(label)
    }
}
