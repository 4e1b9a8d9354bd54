use std::process::ExitCode;

fn main() -> ExitCode {
    setconf_cli::run()
}
