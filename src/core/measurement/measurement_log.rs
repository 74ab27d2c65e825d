use crate::core::measurement::quality::MeasurementQuality;

/// One press of the measurement key: where the carriage stood, when, and how
/// steady the reading was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub sequence: u64,
    pub position_mm: f64,
    pub logical_time: u64,
    pub quality: MeasurementQuality,
}

/// Append-only record of measurements, cleared only as a whole.
///
/// Neither `sequence` nor `logical_time` restarts after [`clear`](Self::clear),
/// so a sequence number handed out before a clear never names a later
/// measurement.
#[derive(Debug, Default)]
pub struct MeasurementLog {
    entries: Vec<Measurement>,
    next_sequence: u64,
    clock: u64,
}

impl MeasurementLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, position_mm: f64, quality: MeasurementQuality) -> Measurement {
        let measurement = Measurement {
            sequence: self.next_sequence,
            position_mm,
            logical_time: self.clock,
            quality,
        };

        self.next_sequence += 1;
        self.clock += 1;
        self.entries.push(measurement);
        measurement
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn all(&self) -> &[Measurement] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<&Measurement> {
        self.entries
            .binary_search_by_key(&sequence, |m| m.sequence)
            .ok()
            .and_then(|index| self.entries.get(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
