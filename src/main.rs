// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2markup::{
    blocks_to_html, blocks_to_markdown, ApiKey, CommandLineInput, ConvertError, FileResolver,
    NotionHttpClient, OutputFormat, PageId, RetrieveOptions, RetrieverConfig, TreeRetriever,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2markup.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the three-stage pipeline: fetch → render → deliver.
async fn run(cli: &CommandLineInput) -> Result<(), ConvertError> {
    let api_key = std::env::var("NOTION_API_KEY")
        .ok()
        .ok_or_else(|| ConvertError::MissingConfiguration("NOTION_API_KEY".to_string()))
        .and_then(|key| Ok(ApiKey::new(key)?))?;

    let page_id = PageId::parse(&cli.notion_input)?;

    let resolver = Arc::new(FileResolver::from_config(&cli.files_config())?);
    let client = Arc::new(NotionHttpClient::new(&api_key)?);

    let mut retriever_config = RetrieverConfig::default();
    if let Some(concurrency) = cli.concurrency {
        retriever_config.concurrency = concurrency.max(1);
    }
    let retriever = TreeRetriever::with_config(client, resolver, retriever_config);

    let opts = RetrieveOptions {
        process_files: !cli.no_files,
    };
    let blocks = retriever
        .get_page_content(&page_id, !cli.no_recursive, &opts)
        .await?;

    log::info!("Retrieved {} top-level blocks", blocks.len());

    let rendered = match cli.format {
        OutputFormat::Markdown => blocks_to_markdown(&blocks),
        OutputFormat::Html => blocks_to_html(&blocks),
    };

    match &cli.output_file {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Document saved to {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    run(&cli).await?;

    Ok(())
}
