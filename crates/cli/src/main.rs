use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    adbook_cli::run()
}
