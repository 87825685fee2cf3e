use std::process::ExitCode;
use tm4j_converter::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
