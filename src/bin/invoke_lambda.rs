use clap::Parser;
use log_pipeline_probe::{cli::InvokeArgs, generate_load, session, LambdaInvoker};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args = InvokeArgs::parse();
    let options = args.load_options();
    println!("{}", options.banner(&args.function_name));

    let config = match session::load_config(&args.session_options()).await {
        Ok(config) => config,
        Err(err) => {
            println!("Error creating AWS session: {err}");
            return ExitCode::FAILURE;
        }
    };

    let invoker = LambdaInvoker::new(&config);
    match generate_load(&invoker, &args.function_name, &options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
