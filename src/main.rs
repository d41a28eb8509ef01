use clap::Parser;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::error;

mod config;
mod convert;
mod llm;
mod schema;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs, Command};
use crate::convert::{Converter, DEFAULT_MAX_LENGTH};
use crate::schema::Schema;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "Show me all customers who ordered in January",
    "What are the top 5 products by price?",
    "Find customers from New York with orders over $1000",
    "List all pending orders with customer names",
    "Show total sales by product category",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Load the schema, writing the default one if no file exists yet
    let schema = Schema::load(&config.schema_file)?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => run_interactive(&config, schema).await?,
        Command::Batch { file } => run_batch(&config, schema, &file).await?,
        Command::Serve => {
            let converter = Converter::new(&config.llm, schema);
            let app_state = Arc::new(AppState::new(config.clone(), converter));
            web::run_server(config.web, app_state).await?;
        }
    }

    Ok(())
}

/// CLI mode: print the schema, run the example questions, then read
/// questions from stdin until the user quits.
async fn run_interactive(
    config: &AppConfig,
    schema: Schema,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "=".repeat(60));
    println!("TEXT-TO-SQL CONVERTER");
    println!("{}", "=".repeat(60));
    println!();

    println!("Database Schema Loaded:");
    println!("{}", schema.render_text());

    let converter = Converter::new(&config.llm, schema);
    println!();

    println!("Running Example Queries:");
    println!("{}", "-".repeat(60));

    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        println!("\n{}. Question: {}", i + 1, question);
        let sql = converter.convert(question, DEFAULT_MAX_LENGTH).await;
        println!("   SQL: {}", sql);
    }

    println!("\n{}", "=".repeat(60));
    println!("Interactive Mode (type 'quit' to exit)");
    println!("{}", "=".repeat(60));

    let stdin = std::io::stdin();
    loop {
        print!("\nEnter your question: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!("\nGoodbye!");
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }

        let sql = converter.convert(question, DEFAULT_MAX_LENGTH).await;
        println!("\nGenerated SQL:");
        println!("  {}", sql);
    }

    Ok(())
}

/// Batch mode: convert one question per line from a file, skipping blanks.
async fn run_batch(
    config: &AppConfig,
    schema: Schema,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(file)?;
    let questions: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let converter = Converter::new(&config.llm, schema);
    let results = converter.batch_convert(&questions).await;

    println!("Converted {} queries:\n", results.len());
    for (i, (question, sql)) in results.iter().enumerate() {
        println!("{}. {}", i + 1, question);
        println!("   {}\n", sql);
    }

    Ok(())
}
