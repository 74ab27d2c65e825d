use std::time::Duration;

use log::info;
use newton_rings::{
    AsciiPresenter, CommandOutcome, InterferenceImagePresenter, OrderAssignment, SessionCommand,
    SessionController, SessionError, command_for_key, write_ppm,
};

const FRAME: Duration = Duration::from_micros(16_667);
const MEASURED_ORDERS: [u32; 5] = [2, 4, 6, 8, 10];

fn settle(session: &mut SessionController) {
    while session.tick(FRAME).state_changed {}
}

/// Steps towards `target_mm` the way an operator would: coarse steps first,
/// then precision steps, each one animated to rest before the next.
fn walk_to(session: &mut SessionController, target_mm: f64) -> Result<(), SessionError> {
    for precision in [false, true] {
        if session.snapshot().microscope.precision != precision {
            session.handle_command(SessionCommand::TogglePrecision)?;
        }

        loop {
            let microscope = session.snapshot().microscope;
            let gap = target_mm - microscope.position_mm;
            if gap.abs() <= microscope.effective_step_mm / 2.0 {
                break;
            }

            let command = if gap > 0.0 {
                SessionCommand::MoveRight
            } else {
                SessionCommand::MoveLeft
            };
            session.handle_command(command)?;
            settle(session);
        }
    }

    session.handle_command(SessionCommand::TogglePrecision)?;
    Ok(())
}

fn record(session: &mut SessionController) -> Result<Option<u64>, SessionError> {
    match session.handle_command(SessionCommand::RecordMeasurement)? {
        CommandOutcome::Recorded(measurement) => Ok(Some(measurement.sequence)),
        _ => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = SessionController::default();
    let ascii = AsciiPresenter::default();

    for key in ["d", "d", "a", "a", "v", "v", "x"] {
        if let Some(command) = command_for_key(key) {
            session.handle_command(command)?;
        }
        settle(&mut session);
    }

    let mut assignment = OrderAssignment::new();
    for order in MEASURED_ORDERS {
        let radius = session.pattern().radius(order).unwrap_or_default();

        for edge in [radius, -radius] {
            walk_to(&mut session, edge)?;
            if let Some(sequence) = record(&mut session)? {
                assignment.assign(sequence, order)?;
            }
        }
    }

    let estimate = session.estimate_curvature(&assignment)?;
    let true_radius_cm = session.parameters().radius_of_curvature_cm();
    info!(
        "R = {:.2} cm, {:.2}% from the true {:.1} cm",
        estimate.radius_of_curvature_cm,
        estimate.percent_error(true_radius_cm),
        true_radius_cm
    );

    let wavelength = session.estimate_wavelength(&assignment)?;
    info!(
        "λ = {:.1} ± {:.1} nm over {} rings ({:.1} nm weighted by grade)",
        wavelength.mean_nm,
        wavelength.std_dev_nm,
        wavelength.rings_used,
        wavelength.weighted_mean_nm
    );

    print!("{}", session.present(&ascii)?);

    let image = InterferenceImagePresenter::new(512, 3.0)?;
    std::fs::create_dir_all("output")?;
    write_ppm(&session.present(&image)?, "output/newton_rings.ppm")?;

    Ok(())
}
