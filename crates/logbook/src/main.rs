//! `logbook` - CLI for the duty logbook
//!
//! This binary renders months of the logbook and records or deletes duties.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use logbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, MonthsCommand, OutputFormat,
    RemoveCommand, ShowCommand,
};
use logbook::{init_logging, Config, DateKey, Logbook, Session, SqliteBackend, YearMonth};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Validation reports on a config that may not load
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        return handle_validate(file.clone().or_else(|| cli.config.clone()));
    }

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Months(cmd) => handle_months(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Remove(cmd) => handle_remove(&config, &cmd),
        Command::Session => handle_session(&config),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn open(config: &Config) -> anyhow::Result<Logbook<SqliteBackend>> {
    Logbook::open(config)
        .with_context(|| format!("opening logbook at {}", config.database_path().display()))
}

fn parse_date(input: &str) -> anyhow::Result<DateKey> {
    Ok(input.parse()?)
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut book = open(config)?;

    if let Some(month) = &cmd.month {
        let month: YearMonth = month.parse()?;
        if !book.set_current_month(month) && book.current_month() != month {
            warn!(
                "{} is outside the logbook range; showing {}",
                month,
                book.current_month()
            );
        }
    }

    let view = book.render_month()?;
    match cmd.format {
        OutputFormat::Plain => print!("{view}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn handle_months(config: &Config, cmd: &MonthsCommand) -> anyhow::Result<()> {
    let book = open(config)?;
    let buttons = book.month_buttons();

    match cmd.format {
        OutputFormat::Plain => {
            for button in &buttons {
                println!("{}  {}", button.month, button.label);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&buttons)?),
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let book = open(config)?;
    let entry = book.render_day(parse_date(&cmd.date)?)?;

    match cmd.format {
        OutputFormat::Plain => print!("{entry}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let date = parse_date(&cmd.date)?;
    let text = cmd.text();
    if text.trim().is_empty() {
        warn!("Nothing to add for {}", date);
        return Ok(());
    }

    let book = open(config)?;
    book.add_duty(date, &text)?;
    print!("{}", book.render_day(date)?);
    Ok(())
}

fn handle_remove(config: &Config, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let date = parse_date(&cmd.date)?;
    let book = open(config)?;

    let removed = book.remove_duty(date, cmd.index)?;
    println!("Removed: {removed}");
    print!("{}", book.render_day(date)?);
    Ok(())
}

fn handle_session(config: &Config) -> anyhow::Result<()> {
    let mut session = Session::new(open(config)?);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let book = open(config)?;
    let range = book.range();
    let days = book.store().day_count()?;
    let duties: usize = book.store().snapshot()?.values().map(Vec::len).sum();
    let record_bytes = book.store().raw()?.map_or(0, |raw| raw.len());
    let stats = book.store().inspect(SqliteBackend::stats)??;

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "storage_key": config.storage.key,
            "range": { "start": range.start(), "end": range.end() },
            "days_with_duties": days,
            "duties": duties,
            "record_bytes": record_bytes,
            "database_bytes": stats.db_size_bytes,
            "last_write": stats.last_write,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("logbook status");
        println!("--------------");
        println!("Database:      {}", config.database_path().display());
        println!("Record key:    {}", config.storage.key);
        println!("Range:         {} .. {}", range.start(), range.end());
        println!("Days logged:   {days}");
        println!("Duties:        {duties}");
        println!("Record size:   {record_bytes} bytes");
        println!("Database size: {} bytes", stats.db_size_bytes);
        println!(
            "Last write:    {}",
            stats.last_write.as_deref().unwrap_or("never")
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Range]");
                println!("  Start:              {}", config.range.start);
                println!("  End:                {}", config.range.end);
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Record key:         {}", config.storage.key);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => handle_validate(file.clone())?,
    }
    Ok(())
}

fn handle_validate(file: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => println!("Configuration error: {e}"),
    }
    Ok(())
}
