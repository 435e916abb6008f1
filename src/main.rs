use proclab::utils::logger::init_logger;
use proclab::{platform, tasks, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = init_logger(cli.log_level.as_deref()) {
        eprintln!("Failed to initialise logging: {}", err);
        return ExitCode::from(1);
    }

    if let Err(err) = platform::ensure_supported() {
        println!("{}", err.user_message());
        return ExitCode::from(err.exit_code());
    }

    match tasks::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(category = ?err.category(), "task failed");
            println!("{}", err.user_message());
            ExitCode::from(err.exit_code())
        }
    }
}
