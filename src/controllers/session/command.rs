use crate::core::measurement::Measurement;
use crate::core::optics::ParameterName;

/// The fixed vocabulary an input source may send to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    MoveLeft,
    MoveRight,
    IncreaseStep,
    DecreaseStep,
    RecordMeasurement,
    TogglePrecision,
    SwitchViewMode,
    ShowMeasurements,
    Visualize,
    SetParameter(ParameterName, f64),
    Reset,
    Quit,
}

/// What a handled command did. The display-only outcomes
/// (`ShowMeasurements`, `Visualize`, `Quit`) are signals for the shell and
/// leave the session state as it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    Applied,
    Recorded(Measurement),
    ShowMeasurements,
    Visualize,
    ParameterChanged,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Microscope,
    RingPattern,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Microscope => Self::RingPattern,
            Self::RingPattern => Self::Microscope,
        }
    }
}
