use std::io::Write;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use dialoguer::Select;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::configuration::Config;
use crate::domain::models::Adapter;
use crate::domain::models::ProviderName;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::services::chat_help_text;
use crate::domain::services::take_turn;
use crate::domain::services::Session;

fn select_provider() -> Result<ProviderName> {
    if let Some(provider) = Config::provider()? {
        return Ok(provider);
    }

    let providers = ProviderName::iter().collect::<Vec<ProviderName>>();
    let options = providers
        .iter()
        .map(|provider| return provider.config().display_name)
        .collect::<Vec<&str>>();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Provider")
        .default(0)
        .items(&options)
        .interact()?;

    return Ok(providers[idx]);
}

fn configure(session: &mut Session) -> Result<()> {
    let provider = select_provider()?;
    let config = provider.config();

    loop {
        let api_key = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} API key ({})", config.display_name, config.key_hint))
            .allow_empty_password(true)
            .interact()?;

        if session.configure(provider, &api_key) {
            break;
        }
        eprintln!("{}", "An API key is required to start chatting.".red());
    }

    println!(
        "Chatting with {}. Your API key is only kept in memory. Type /help for commands.\n",
        config.display_name.bold()
    );

    return Ok(());
}

fn render_turn(session: &mut Session) {
    if let Some(err) = &session.last_error {
        eprintln!("{}\n", err.red());
        session.dismiss_error();
        return;
    }

    if let Some(message) = session.messages.last() {
        if message.role == Role::Assistant {
            println!("{}\n", message.content);
        }
    }
}

/// Line-oriented chat loop. Runs until `/quit` or end of input.
pub async fn start(adapter: &dyn Adapter) -> Result<()> {
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if !session.configured {
            configure(&mut session)?;
        }

        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => return Ok(()),
        };

        if let Some(command) = SlashCommand::parse(&line) {
            if command.is_quit() {
                return Ok(());
            }
            if command.is_reset() {
                session.reset();
                println!("Session cleared.\n");
                continue;
            }
            if command.is_help() {
                println!("{}\n", chat_help_text());
                continue;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        println!("{}", "...".dimmed());
        take_turn(&mut session, adapter, &line).await;
        render_turn(&mut session);
    }
}
