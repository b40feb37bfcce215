use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use jcs_conf::{JcsConf, MailSettings};
use jcs_props::{LineRecord, OrderedConfigStore};
use serde::Serialize;
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Get(args) => cmd_get(args, format),
        Command::Set(args) => cmd_set(args, format),
        Command::Remove(args) => cmd_remove(args, format),
        Command::Keys(args) => cmd_keys(args, format),
        Command::Lines(args) => cmd_lines(args, format),
        Command::Mail(args) => cmd_mail(args, format),
    }
}

fn open(path: &Path) -> anyhow::Result<OrderedConfigStore> {
    let store = OrderedConfigStore::new();
    store
        .load_path(path)
        .with_context(|| format!("cannot load {}", path.display()))?;
    Ok(store)
}

fn save(store: &OrderedConfigStore, path: &Path) -> anyhow::Result<()> {
    store
        .store_path(path)
        .with_context(|| format!("cannot write {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_get(args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open(&args.file)?;
    let value = store.get_property(&args.key).or(args.default);
    match format {
        OutputFormat::Json => print_json(&json!({ "key": args.key, "value": value })),
        OutputFormat::Text => match value {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => anyhow::bail!("{} is not set in {}", args.key, args.file.display()),
        },
    }
}

/// Result of a `set` edit.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct SetOutcome {
    key: String,
    value: String,
    previous: Option<String>,
    position: Option<usize>,
}

fn apply_set(store: &OrderedConfigStore, args: &SetArgs) -> SetOutcome {
    let previous = match (&args.after, &args.before) {
        (Some(anchor), _) => store.put_after(args.key.as_str(), args.value.as_str(), anchor),
        (None, Some(anchor)) => store.put_before(args.key.as_str(), args.value.as_str(), anchor),
        (None, None) => store.put(args.key.as_str(), args.value.as_str()),
    };
    SetOutcome {
        key: args.key.clone(),
        value: args.value.clone(),
        previous,
        position: store.position_of(&args.key),
    }
}

fn cmd_set(args: SetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open(&args.file)?;
    let outcome = apply_set(&store, &args);
    save(&store, &args.file)?;
    match format {
        OutputFormat::Json => print_json(&outcome),
        OutputFormat::Text => {
            let line = outcome.position.map(|p| format!(" (line {p})")).unwrap_or_default();
            match &outcome.previous {
                Some(previous) => println!(
                    "{} {} = {}{} (was {})",
                    "✓".green(),
                    outcome.key.bold(),
                    outcome.value,
                    line.dimmed(),
                    previous.yellow()
                ),
                None => println!(
                    "{} {} = {}{}",
                    "✓".green(),
                    outcome.key.bold(),
                    outcome.value,
                    line.dimmed()
                ),
            }
            Ok(())
        }
    }
}

fn cmd_remove(args: RemoveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open(&args.file)?;
    let removed = store.remove(&args.key);
    if removed.is_some() {
        save(&store, &args.file)?;
    }
    match format {
        OutputFormat::Json => print_json(&json!({ "key": args.key, "removed": removed })),
        OutputFormat::Text => {
            match removed {
                Some(value) => println!("{} Removed {} (was {})", "✓".green(), args.key.bold(), value.yellow()),
                None => println!("{} is not set; nothing removed.", args.key.bold()),
            }
            Ok(())
        }
    }
}

fn cmd_keys(args: FileArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open(&args.file)?;
    let keys = store.keys().unwrap_or_default();
    match format {
        OutputFormat::Json => print_json(&keys),
        OutputFormat::Text => {
            if keys.is_empty() {
                println!("No keys.");
            }
            for key in keys {
                println!("{key}");
            }
            Ok(())
        }
    }
}

/// One record with its 1-based position, as shown by `lines`.
#[derive(Debug, Serialize)]
struct NumberedLine {
    position: usize,
    #[serde(flatten)]
    record: LineRecord,
}

fn numbered(store: &OrderedConfigStore) -> Vec<NumberedLine> {
    store
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, record)| NumberedLine {
            position: i + 1,
            record,
        })
        .collect()
}

fn cmd_lines(args: FileArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open(&args.file)?;
    let lines = numbered(&store);
    match format {
        OutputFormat::Json => print_json(&lines),
        OutputFormat::Text => {
            for line in &lines {
                let text = match &line.record {
                    LineRecord::Comment { text } => text.dimmed().to_string(),
                    LineRecord::Entry { key, value } => format!("{} = {}", key.bold(), value),
                };
                println!("{:>4} │ {}", line.position.to_string().dimmed(), text);
            }
            Ok(())
        }
    }
}

fn cmd_mail(args: FileArgs, format: OutputFormat) -> anyhow::Result<()> {
    let conf = JcsConf::open(&args.file)
        .with_context(|| format!("cannot load {}", args.file.display()))?;
    let mail = conf.mail_config()?;
    match format {
        OutputFormat::Json => print_json(&mail),
        OutputFormat::Text => {
            let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not set)".into());
            let list = |set: &std::collections::BTreeSet<String>| {
                set.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            println!("SMTP host:  {}", or_unset(&mail.smtp_host).bold());
            println!("SMTP port:  {}", mail.smtp_port);
            println!("SMTP user:  {}", or_unset(&mail.smtp_user));
            println!("Auth:       {}", mail.smtp_auth);
            println!("STARTTLS:   {}", mail.starttls);
            println!("SSL:        {}", mail.ssl);
            println!("Subject:    {}", or_unset(&mail.subject));
            println!("To:         {}", list(&mail.to).cyan());
            println!("Cc:         {}", list(&mail.cc).cyan());
            println!("Bcc:        {}", list(&mail.bcc).cyan());
            Ok(())
        }
    }
}
