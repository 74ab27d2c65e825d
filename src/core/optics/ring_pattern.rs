/// Dark-fringe radii in millimetres, indexed by ring order.
#[derive(Debug, Clone, PartialEq)]
pub struct RingPattern {
    radii_mm: Vec<f64>,
}

impl RingPattern {
    pub(crate) fn new(radii_mm: Vec<f64>) -> Self {
        Self { radii_mm }
    }

    #[must_use]
    pub fn radius(&self, order: u32) -> Option<f64> {
        self.radii_mm.get(order as usize).copied()
    }

    #[must_use]
    pub fn radii_mm(&self) -> &[f64] {
        &self.radii_mm
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.radii_mm.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii_mm.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_looked_up_by_order() {
        let pattern = RingPattern::new(vec![0.0, 1.0, 1.5]);

        assert_eq!(pattern.radius(2), Some(1.5));
        assert_eq!(pattern.radius(3), None);
        assert_eq!(pattern.len(), 3);
        assert!(!pattern.is_empty());
    }

    #[test]
    fn empty_pattern_has_no_radii() {
        let pattern = RingPattern::new(Vec::new());

        assert_eq!(pattern.radius(0), None);
        assert!(pattern.is_empty());
    }
}
