use clap::{Parser, Subcommand};
use geosnap::configuration::{Config, ConfigOverrides};
use geosnap::controller::controller_handler::Controller;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geosnap")]
#[command(version = "0.0.2")]
#[command(about = "Capture a photo, tag it with the device location and upload it")]
struct Args {
    config_file: PathBuf,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one capture, geotag and upload cycle
    Capture {
        /// Frame the camera binding points at
        #[arg(long)]
        image: PathBuf,
    },
    /// Serve the local upload receiver
    Receive,
}

#[tokio::main]
async fn main() {
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();

    info!("Importing configuration");
    let mut config = Config::from_file(&args.config_file).unwrap_or_else(|e| {
        error!("Unable to import configuration from file: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = config.apply_overrides(&args.overrides) {
        error!("Invalid command-line override: {}", e);
        std::process::exit(1);
    }
    info!("Configuration imported successfully");

    let controller = Controller::new(config).unwrap_or_else(|e| {
        error!("Unable to create a controller instance: {}, exiting...", e);
        std::process::exit(1);
    });

    let code = match args.command {
        Command::Capture { image } => match controller.capture(&image).await {
            Ok(outcome) => {
                println!("{}", outcome.user_message());
                if outcome.is_success() {
                    0
                } else {
                    info!("Run finished with {}", outcome);
                    2
                }
            }
            Err(e) => {
                error!("Error occured in the controller process: {}", e);
                1
            }
        },
        Command::Receive => match controller.serve_receiver().await {
            Ok(()) => 0,
            Err(e) => {
                error!("Upload receiver stopped: {}", e);
                1
            }
        },
    };

    std::process::exit(code);
}
