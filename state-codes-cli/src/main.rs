use clap::Parser;

use state_codes_cli::cli::{Cli, handle_generate};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_logging(args.verbose);

    if let Err(e) = handle_generate(args).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
