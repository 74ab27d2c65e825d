use std::fmt::{self, Write};

use crate::controllers::session::{SessionSnapshot, SnapshotPresenterPort, ViewMode};

const CENTRE: char = '|';
const RING_EDGE: char = ':';
const TRACK: char = '-';
const MARKER: char = 'v';
const PRECISION_MARKER: char = '*';

/// Text renderer for terminals.
///
/// In microscope view it draws the stage as a single line, `span_mm` either
/// side of the centre, with ring edges and the carriage marker on it. In
/// ring-pattern view it lists the radius of every sampled order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsciiPresenter {
    width: usize,
    span_mm: f64,
}

impl AsciiPresenter {
    /// `width` is rounded up to an odd number of at least three columns so
    /// the centre mark has a column of its own.
    #[must_use]
    pub fn new(width: usize, span_mm: f64) -> Self {
        let width = width.max(3) | 1;
        let span_mm = if span_mm.is_finite() && span_mm > 0.0 {
            span_mm
        } else {
            5.0
        };

        Self { width, span_mm }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn half(&self) -> usize {
        (self.width - 1) / 2
    }

    /// Column of a stage coordinate, pinned to the ends of the scale.
    fn column_for(&self, position_mm: f64) -> usize {
        let half = self.half() as f64;
        let offset = (position_mm / self.span_mm * half).round();
        let offset = if offset.is_finite() {
            offset.clamp(-half, half)
        } else {
            0.0
        };

        (half + offset) as usize
    }

    fn scale_line(&self, snapshot: &SessionSnapshot) -> String {
        let mut scale = vec![TRACK; self.width];

        for &radius in snapshot.ring_radii_mm.iter().skip(1) {
            if radius > self.span_mm {
                break;
            }
            scale[self.column_for(-radius)] = RING_EDGE;
            scale[self.column_for(radius)] = RING_EDGE;
        }

        scale[self.half()] = CENTRE;
        scale[self.column_for(snapshot.microscope.position_mm)] = if snapshot.microscope.precision {
            PRECISION_MARKER
        } else {
            MARKER
        };

        scale.into_iter().collect()
    }

    fn write_ring_table(&self, out: &mut String, snapshot: &SessionSnapshot) -> fmt::Result {
        writeln!(out, "order  radius (mm)  diameter (mm)")?;
        for (order, radius) in snapshot.ring_radii_mm.iter().enumerate() {
            writeln!(out, "{order:>5}  {radius:>11.4}  {:>13.4}", 2.0 * radius)?;
        }
        Ok(())
    }

    fn write_status(&self, out: &mut String, snapshot: &SessionSnapshot) -> fmt::Result {
        let microscope = &snapshot.microscope;

        write!(
            out,
            "pos {:+.4} mm  step {:.4} mm",
            microscope.position_mm, microscope.step_mm
        )?;
        if microscope.precision {
            write!(out, " (precision {:.4} mm)", microscope.effective_step_mm)?;
        }
        write!(
            out,
            "  ring {} {:+.4} mm  measurements {}",
            snapshot.nearest_ring.order,
            microscope.position_mm.abs() - snapshot.nearest_ring.radius_mm,
            snapshot.measurement_count
        )?;

        match snapshot.last_estimate {
            Some(estimate) => writeln!(
                out,
                "  R {:.2} cm (rms {:.2e} mm²)",
                estimate.radius_of_curvature_cm, estimate.residual_rms_mm2
            ),
            None => writeln!(out, "  R --"),
        }
    }
}

impl Default for AsciiPresenter {
    fn default() -> Self {
        Self::new(61, 5.0)
    }
}

impl SnapshotPresenterPort for AsciiPresenter {
    type Frame = String;
    type Failure = fmt::Error;

    fn present(&self, snapshot: &SessionSnapshot) -> Result<String, fmt::Error> {
        let mut out = String::new();

        match snapshot.view_mode {
            ViewMode::Microscope => writeln!(out, "{}", self.scale_line(snapshot))?,
            ViewMode::RingPattern => self.write_ring_table(&mut out, snapshot)?,
        }
        self.write_status(&mut out, snapshot)?;

        Ok(out)
    }
}
