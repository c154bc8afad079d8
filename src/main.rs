use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = quiver2jekyll::run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
