use std::process::ExitCode;

fn main() -> ExitCode {
    tariffy_cli::run()
}
