use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

mod batch;
mod config;
mod demo;
mod error;
mod extract;
mod format;
mod generator;
mod llm;
mod logger;
mod models;
mod prompt;
mod providers;

use batch::{combine_output, load_batch};
use config::Config;
use demo::DemoExample;
use error::GeneratorError;
use format::{format_suite, OutputFormat};
use generator::TestCaseGenerator;
use models::TestSuite;

#[derive(Parser)]
#[command(name = "testgen", version)]
#[command(about = "Generate comprehensive test scenarios from user stories")]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to a configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate test cases from a user story
    Generate {
        /// User story to generate test cases for
        #[arg(short, long)]
        story: String,
        /// Acceptance criteria (can be specified multiple times)
        #[arg(short, long)]
        criteria: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
        output: OutputFormat,
        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Run demo with predefined user stories
    Demo {
        /// Example user story to demonstrate
        #[arg(short, long, value_enum, default_value_t = DemoExample::Login)]
        example: DemoExample,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
        output: OutputFormat,
    },
    /// Process multiple user stories from a file
    Batch {
        /// JSON file with an array of stories or {story, criteria} objects
        input_file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
        output: OutputFormat,
        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Check the environment and configuration
    Setup,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logger::init(args.verbose);

    if let Err(e) = run(args).await {
        let label = match e.downcast_ref::<GeneratorError>() {
            Some(GeneratorError::Validation(_)) => "Validation Error:",
            _ => "Error:",
        };
        eprintln!("{} {}", label.red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.config)?;

    match args.command {
        Command::Generate {
            story,
            criteria,
            output,
            save,
        } => {
            let generator = TestCaseGenerator::new(&config)?;
            let criteria = if criteria.is_empty() { None } else { Some(criteria) };
            let suite = generate_with_spinner(&generator, &story, criteria, None).await?;
            info!("generated {} test scenarios", suite.total_scenarios);
            emit(&format_suite(&suite, output), save.as_deref())
        }
        Command::Demo { example, output } => {
            println!(
                "Running demo with the '{}' user story...",
                example.name().cyan()
            );
            println!("Story: {}\n", example.story());

            let generator = TestCaseGenerator::new(&config)?;
            let suite = generate_with_spinner(
                &generator,
                example.story(),
                Some(example.criteria()),
                None,
            )
            .await?;
            println!("{}", format_suite(&suite, output));
            Ok(())
        }
        Command::Batch {
            input_file,
            output,
            save,
        } => {
            println!("Processing batch file...");
            let entries = load_batch(&input_file)?;
            let generator = TestCaseGenerator::new(&config)?;

            let mut suites: Vec<TestSuite> = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                let progress = format!("story {}/{}", i + 1, entries.len());
                let suite = generate_with_spinner(
                    &generator,
                    entry.story(),
                    entry.criteria(),
                    Some(&progress),
                )
                .await?;
                suites.push(suite);
            }

            emit(&combine_output(&suites, output), save.as_deref())
        }
        Command::Setup => setup(&config),
    }
}

/// Run one generation call behind a spinner so the blocking API call shows
/// visible progress.
async fn generate_with_spinner(
    generator: &TestCaseGenerator,
    story: &str,
    criteria: Option<Vec<String>>,
    progress: Option<&str>,
) -> Result<TestSuite> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    let message = match progress {
        Some(progress) => format!("Generating test scenarios ({progress})..."),
        None => "Generating test scenarios...".to_string(),
    };
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = generator.generate(story, criteria).await;
    spinner.finish_and_clear();
    Ok(result?)
}

/// Print the formatted output, or save it when a path was given.
fn emit(formatted: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            fs::write(path, formatted)
                .with_context(|| format!("Failed to save output to {}", path.display()))?;
            println!("Output saved to: {}", path.display().to_string().green());
            Ok(())
        }
        None => {
            println!("{}", formatted);
            Ok(())
        }
    }
}

/// Report whether the environment is ready without spending any tokens.
fn setup(config: &Config) -> Result<()> {
    println!("Test Case Generator Setup");
    println!("{}", "=".repeat(40));

    if Path::new(".env").exists() {
        println!("{} .env file found", "ok".green());
    } else {
        println!(
            "{} no .env file; relying on the process environment",
            "--".yellow()
        );
    }

    match llm::provider_from_config(config) {
        Ok(provider) => {
            println!(
                "{} provider {} initialized (model {})",
                "ok".green(),
                provider.name(),
                provider.model_name()
            );
            println!("\nSetup complete. Try: testgen demo --example login");
        }
        Err(e) => {
            println!("{} {}", "!!".red(), e);
            println!("Set the provider API key in .env or the environment and retry.");
        }
    }

    Ok(())
}
