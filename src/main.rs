//! Resume qualifier: screen a resume against a job description

use clap::Parser;
use log::{error, info};
use resume_qualifier::cli::{self, Cli, Commands, ConfigAction};
use resume_qualifier::config::Config;
use resume_qualifier::error::{QualifierError, Result};
use resume_qualifier::input::{DocumentIngress, InputManager, Submission};
use resume_qualifier::output::{save_report_to_file, ReportGenerator};
use resume_qualifier::processing::MatchingPipeline;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed ({}): {}", e.status_code(), e);
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, &config.input.resume_extensions)
                .map_err(|e| QualifierError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &config.input.job_extensions)
                .map_err(|e| QualifierError::InvalidInput(format!("Job description file: {}", e)))?;

            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(QualifierError::InvalidInput)?,
                None => config.output.format,
            };

            let input_manager = InputManager::new();
            let submission = Submission::new(
                input_manager.load(&resume).await?,
                input_manager.load(&job).await?,
            );

            let texts = DocumentIngress::new().receive(submission)?;
            let pipeline = MatchingPipeline::new(&config)?;
            let report = pipeline.run(&texts.resume_text, &texts.job_description_text)?;

            let use_colors = config.output.color_output && save.is_none();
            let rendered = ReportGenerator::new(use_colors, config.output.pretty_json)
                .generate_report(&report, format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration file: {}\n", path.display());
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| QualifierError::Configuration(e.to_string()))?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
