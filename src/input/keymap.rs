use crate::controllers::session::SessionCommand;
use crate::core::optics::{ParameterName, WavelengthPreset};

/// Translates a single key name into a command. Unknown keys map to `None`
/// and are meant to be dropped by the caller.
#[must_use]
pub fn command_for_key(key: &str) -> Option<SessionCommand> {
    let command = match key.to_ascii_lowercase().as_str() {
        "a" | "left" => SessionCommand::MoveLeft,
        "d" | "right" => SessionCommand::MoveRight,
        "+" | "=" => SessionCommand::IncreaseStep,
        "-" | "_" => SessionCommand::DecreaseStep,
        " " | "space" => SessionCommand::RecordMeasurement,
        "p" => SessionCommand::TogglePrecision,
        "v" => SessionCommand::SwitchViewMode,
        "m" => SessionCommand::ShowMeasurements,
        "g" => SessionCommand::Visualize,
        "r" => SessionCommand::Reset,
        "q" | "esc" | "escape" => SessionCommand::Quit,
        _ => return None,
    };

    Some(command)
}

/// Translates a typed line. Besides single keys this understands
/// `set <wavelength|radius|index> <value>` and `preset <1-4>`.
#[must_use]
pub fn command_for_line(line: &str) -> Option<SessionCommand> {
    let mut words = line.split_whitespace();

    match (words.next(), words.next(), words.next(), words.next()) {
        (Some("set"), Some(name), Some(value), None) => {
            let name = parameter_for_word(name)?;
            let value = value.parse::<f64>().ok()?;
            Some(SessionCommand::SetParameter(name, value))
        }
        (Some("preset"), Some(index), None, None) => {
            let index = index.parse::<usize>().ok()?.checked_sub(1)?;
            let preset = WavelengthPreset::ALL.get(index)?;
            Some(SessionCommand::SetParameter(
                ParameterName::Wavelength,
                preset.wavelength_nm(),
            ))
        }
        (Some(key), None, None, None) => command_for_key(key),
        (None, ..) if line.contains(' ') => command_for_key(" "),
        _ => None,
    }
}

fn parameter_for_word(word: &str) -> Option<ParameterName> {
    match word.to_ascii_lowercase().as_str() {
        "wavelength" | "lambda" => Some(ParameterName::Wavelength),
        "radius" | "r" => Some(ParameterName::RadiusOfCurvature),
        "index" | "mu" => Some(ParameterName::RefractiveIndex),
        _ => None,
    }
}
