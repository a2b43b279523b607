mod platform;

use std::process::ExitCode;

fn main() -> ExitCode {
    match platform::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
