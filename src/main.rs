use ascii_mosaic::cli::{handle_config_action, load_config, run_convert, Args, CliError, Command};
use clap::Parser;

fn main() {
    let args = Args::parse();

    // Default filter is "info" (or "debug" with -v) if RUST_LOG is not set.
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Convert(convert) => {
            let cfg = load_config(args.config.as_deref())?;
            run_convert(&convert, &cfg)?;
        }
        Command::Config { action } => {
            handle_config_action(&action, args.config.as_deref())?;
        }
    }
    Ok(())
}
