use std::io;
use tabnotes_shell::configuration::CONFIGURATION;
use tabnotes_shell::startup::{run, StartupError};
use tabnotes_shell::telemetry::{get_subscriber, init_tracing};

fn main() -> Result<(), StartupError> {
    init_tracing(get_subscriber(&CONFIGURATION, io::stderr));
    let stdin = io::stdin();
    run(&CONFIGURATION, stdin.lock(), io::stdout())
}
