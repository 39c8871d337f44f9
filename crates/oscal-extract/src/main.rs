use oscal_extract::{cli, logging, run_with, ControlSummary, RunEvent};
use std::process::ExitCode;

fn print_event(event: RunEvent<'_>) {
    if event.is_warning() {
        eprintln!("{event}");
    } else {
        println!("{event}");
    }
}

fn main() -> ExitCode {
    let matches = cli::command().get_matches();
    logging::init(matches.get_flag("verbose"));

    let result = cli::config_from_matches(&matches).and_then(|config| {
        let outcome = run_with(&config, print_event)?;
        Ok((config, outcome))
    });

    match result {
        Ok((config, outcome)) => {
            if config.summary {
                println!();
                print!("{}", ControlSummary::new(&outcome.document));
            }
            println!();
            println!("Successfully extracted {} controls", outcome.control_count());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, stage = e.stage(), "extraction failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
