use std::process::ExitCode;

fn main() -> ExitCode {
    match stdf_filter::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
