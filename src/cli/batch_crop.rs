use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strident_tools::{
    config::{parse_config, BatchCropConfig},
    modules::batch_crop::{
        BatchCrop as BatchCropModule, OnError, DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER,
    },
};

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct BatchCropCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(name = "batch_crop")]
    BatchCrop {
        /// Folder with the source images
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Folder for the cropped images. Created if missing
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Target width in pixels
        #[arg(short = 'W', long)]
        width: Option<u32>,
        /// Target height in pixels
        #[arg(short = 'H', long)]
        height: Option<u32>,
        /// Only files with this extension are cropped
        #[arg(short, long)]
        extension: Option<String>,
        /// Stops at the first image that cannot be cropped
        #[arg(long)]
        abort_on_error: bool,
    },
}

/// Flags win over `config.toml`, which wins over the built-in defaults.
fn make_batch_crop(command: Commands, config: &BatchCropConfig) -> BatchCropModule {
    let Commands::BatchCrop {
        input,
        output,
        width,
        height,
        extension,
        abort_on_error,
    } = command;

    let input = input
        .or_else(|| config.input_folder.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FOLDER));
    let output = output
        .or_else(|| config.output_folder.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FOLDER));
    let on_error = if abort_on_error {
        OnError::Abort
    } else {
        config.on_error
    };

    let mut batch_crop = BatchCropModule::new();

    batch_crop
        .input_folder(input)
        .output_folder(output)
        .size(width.unwrap_or(config.width), height.unwrap_or(config.height))
        .extension(extension.as_deref().unwrap_or(&config.extension))
        .on_error(on_error);

    batch_crop
}

pub struct BatchCrop;

impl Cli for BatchCrop {
    fn name(&self) -> &'static str {
        "batch_crop"
    }

    fn cli(&self) -> CliRes {
        let cli = BatchCropCli::parse();

        let config = match parse_config() {
            Ok(config) => config,
            Err(err) => {
                println!("Error parsing config.toml: {}", err);
                return CliRes::Err;
            }
        };

        let batch_crop = make_batch_crop(cli.command, &config.batch_crop);

        match batch_crop.work() {
            Ok(report) => {
                for path in report.cropped.iter() {
                    println!("Cropped and saved: {}", path.display());
                }

                for (path, err) in report.skipped.iter() {
                    println!("Skipped {}: {}", path.display(), err);
                }

                println!("Batch cropping completed.");

                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        // handled by clap
        unreachable!()
    }
}
