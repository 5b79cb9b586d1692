//! `seclearn` - CLI for the security learning dashboard
//!
//! Every subcommand opens the configured database, performs one dashboard
//! action and exits; `shell` keeps a session open.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use seclearn::cli::output;
use seclearn::cli::shell::{ShellCommand, HELP};
use seclearn::cli::{Cli, Command, ConfigCommand, ListCommand, RenderCommand};
use seclearn::debounce::Debouncer;
use seclearn::forms::{FormInput, FormKind};
use seclearn::model::Note;
use seclearn::{init_logging, Collection, Config, Dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        command => {
            let mut dashboard = Dashboard::open(&config);
            run(&mut dashboard, &config, command).await
        }
    }
}

async fn run(dashboard: &mut Dashboard, config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render(cmd) => handle_render(dashboard, config, &cmd),
        Command::List(cmd) => handle_list(dashboard, &cmd),
        Command::Add(cmd) => {
            let kind = FormKind::from(cmd.collection);
            let input = FormInput::new().parse_assignments(&cmd.fields)?;
            let saved = dashboard.submit_form(kind, None, &input)?;
            println!("{}\t{}", saved.id, kind.saved_message(saved.outcome));
            Ok(())
        }
        Command::Edit(cmd) => {
            let kind = FormKind::from(cmd.collection);
            let input = FormInput::prefill(dashboard.store(), kind, &cmd.id)?
                .parse_assignments(&cmd.fields)?;
            let saved = dashboard.submit_form(kind, Some(&cmd.id), &input)?;
            println!("{}\t{}", saved.id, kind.saved_message(saved.outcome));
            Ok(())
        }
        Command::Delete(cmd) => {
            if !dashboard.delete(cmd.collection, &cmd.id) {
                bail!("no {} record with id {}", cmd.collection, cmd.id);
            }
            print_notice(dashboard);
            Ok(())
        }
        Command::Annotate(cmd) => {
            dashboard.save_annotation(&cmd.news_id, &cmd.text)?;
            print_notice(dashboard);
            Ok(())
        }
        Command::Import(cmd) => {
            let text = read_payload(&cmd.file).await?;
            dashboard.import_text(&text)?;
            print_notice(dashboard);
            Ok(())
        }
        Command::ClearNews(cmd) => {
            if !cmd.yes {
                println!("This removes every news item and annotation.");
                println!("Use --yes to confirm.");
                return Ok(());
            }
            dashboard.clear_news();
            print_notice(dashboard);
            Ok(())
        }
        Command::Shell => run_shell(dashboard, config).await,
        Command::Config(config_cmd) => handle_config(config, config_cmd),
    }
}

fn print_notice(dashboard: &Dashboard) {
    if let Some(notice) = &dashboard.screen().notice {
        println!("{}", notice.message);
    }
}

async fn read_payload(file: &str) -> anyhow::Result<String> {
    let mut text = String::new();
    if file == "-" {
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("reading import payload from stdin")?;
    } else {
        text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("reading import payload from {file}"))?;
    }
    Ok(text)
}

fn write_page(dashboard: &Dashboard, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, dashboard.page())
        .with_context(|| format!("writing page to {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

fn handle_render(
    dashboard: &mut Dashboard,
    config: &Config,
    cmd: &RenderCommand,
) -> anyhow::Result<()> {
    if let Some(section) = cmd.section {
        dashboard.switch_section(section);
    }
    match cmd.output.as_ref().or(config.ui.output_path.as_ref()) {
        Some(path) => write_page(dashboard, path),
        None => {
            print!("{}", dashboard.page());
            Ok(())
        }
    }
}

fn handle_list(dashboard: &mut Dashboard, cmd: &ListCommand) -> anyhow::Result<()> {
    if let Some(search) = &cmd.search {
        dashboard.set_search(cmd.collection, search);
    }
    if let Some(category) = &cmd.category {
        dashboard.set_category(cmd.collection, category);
    }
    if let Some(bucket) = &cmd.bucket {
        if !dashboard.set_bucket(bucket) {
            bail!("unknown bucket: {bucket}");
        }
    }
    print!("{}", output::list(dashboard.store(), cmd.collection, cmd.format)?);
    Ok(())
}

async fn run_shell(dashboard: &mut Dashboard, config: &Config) -> anyhow::Result<()> {
    let (mut debouncer, mut searches) = Debouncer::new(config.search_debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("seclearn shell, type help for commands");
    println!("{}", output::summary(dashboard.store()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match ShellCommand::parse(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Search(text)) => debouncer.trigger(text),
                    Ok(command) => {
                        if let Err(e) = apply(dashboard, command) {
                            eprintln!("{e:#}");
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(text) = searches.recv() => {
                let section = dashboard.store().active();
                dashboard.set_search(section, &text);
                print!("{}", output::list_plain(dashboard.store(), section));
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

fn apply(dashboard: &mut Dashboard, command: ShellCommand) -> anyhow::Result<()> {
    match command {
        ShellCommand::Nothing | ShellCommand::Quit | ShellCommand::Search(_) => {}
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Section(section) => {
            dashboard.switch_section(section);
            print!("{}", output::list_plain(dashboard.store(), section));
        }
        ShellCommand::Category(raw) => {
            if dashboard.store().active() == Collection::Notes {
                bail!("notes have no categories");
            }
            dashboard.category_shortcut(&raw);
            list_active(dashboard);
        }
        ShellCommand::Bucket(raw) => {
            if !dashboard.set_bucket(&raw) {
                bail!("unknown bucket: {raw}");
            }
            print!("{}", output::list_plain(dashboard.store(), Collection::Glossary));
        }
        ShellCommand::Tag(tag) => {
            dashboard.quick_search(&tag);
            // Tag searches from the glossary land in news.
            let section = match dashboard.store().active() {
                Collection::Glossary => Collection::News,
                other => other,
            };
            print!("{}", output::list_plain(dashboard.store(), section));
        }
        ShellCommand::Toggle(id) => {
            let open = dashboard.toggle_glossary(&id);
            println!("{id} {}", if open { "expanded" } else { "collapsed" });
        }
        ShellCommand::Show(collection, id) => {
            dashboard.open_detail(collection, &id)?;
            if let Some(modal) = &dashboard.screen().modal {
                println!("{}", modal.title);
            }
            match collection {
                Collection::News => {
                    if let Some(text) = dashboard.store().annotation(&id) {
                        println!("memo: {text}");
                    }
                }
                Collection::Notes => {
                    if let Some(note) = dashboard.store().get::<Note>(&id) {
                        println!("{}", note.content);
                    }
                }
                Collection::Glossary | Collection::Resources => {}
            }
            dashboard.close_modal();
        }
        ShellCommand::Delete(collection, id) => {
            if !dashboard.delete(collection, &id) {
                bail!("no {collection} record with id {id}");
            }
            print_notice(dashboard);
        }
        ShellCommand::Annotate(id, text) => {
            dashboard.save_annotation(&id, &text)?;
            print_notice(dashboard);
        }
        ShellCommand::ClearNews => {
            dashboard.clear_news();
            print_notice(dashboard);
        }
        ShellCommand::List => list_active(dashboard),
        ShellCommand::Render(path) => write_page(dashboard, &path)?,
    }
    Ok(())
}

fn list_active(dashboard: &Dashboard) {
    let store = dashboard.store();
    print!("{}", output::list_plain(store, store.active()));
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key prefix:         {}", config.storage.key_prefix);
                println!();
                println!("[UI]");
                println!("  Search debounce:    {} ms", config.ui.search_debounce_ms);
                println!("  Tag cloud size:     {}", config.ui.tag_cloud_size);
                match &config.ui.output_path {
                    Some(path) => println!("  Output path:        {}", path.display()),
                    None => println!("  Output path:        (stdout)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
