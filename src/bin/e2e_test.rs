use clap::Parser;
use log_pipeline_probe::{cli::E2eArgs, run_checks, session, AwsPipeline};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args = E2eArgs::parse();

    let config = match session::load_config(&args.session_options()).await {
        Ok(config) => config,
        Err(err) => {
            println!("Error creating AWS session: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = AwsPipeline::new(&config);
    if run_checks(&pipeline, &args.targets()).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
