use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::Command;
use strum::VariantNames;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ProviderName;
use crate::domain::services::chat_help_text;

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Serve,
}

fn arg_provider() -> Arg {
    return Arg::new(ConfigKey::Provider.to_string())
        .short('p')
        .long(ConfigKey::Provider.to_string())
        .env("SIMPLE_AI_CHAT_PROVIDER")
        .num_args(1)
        .help("The provider to chat with. You will be asked to pick one if not set.")
        .value_parser(PossibleValuesParser::new(ProviderName::VARIANTS));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("SIMPLE_AI_CHAT_MODEL")
        .num_args(1)
        .help("Overrides the provider's default model.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a chat session in the terminal. The API key is asked for on start and only kept in memory.")
        .after_help(chat_help_text())
        .arg(arg_provider())
        .arg(arg_model());
}

fn subcommand_serve() -> Command {
    return Command::new("serve")
        .about("Serve the built browser client, falling back to index.html for unknown paths.")
        .arg(
            Arg::new(ConfigKey::Port.to_string())
                .long(ConfigKey::Port.to_string())
                .env("PORT")
                .num_args(1)
                .help(format!(
                    "Port to listen on. [default: {}]",
                    Config::default(ConfigKey::Port)
                )),
        )
        .arg(
            Arg::new(ConfigKey::BindAddress.to_string())
                .long(ConfigKey::BindAddress.to_string())
                .env("BIND_ADDRESS")
                .num_args(1)
                .help(format!(
                    "Address to bind to. [default: {}]",
                    Config::default(ConfigKey::BindAddress)
                )),
        )
        .arg(
            Arg::new(ConfigKey::BasePath.to_string())
                .long(ConfigKey::BasePath.to_string())
                .env("BASE_PATH")
                .num_args(1)
                .help("Prefix stripped from request paths when deployed behind a reverse proxy, e.g. /apps/2"),
        )
        .arg(
            Arg::new(ConfigKey::DocumentRoot.to_string())
                .short('d')
                .long(ConfigKey::DocumentRoot.to_string())
                .env("DOCUMENT_ROOT")
                .num_args(1)
                .help(format!(
                    "Directory holding the built client. [default: {}]",
                    Config::default(ConfigKey::DocumentRoot)
                )),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("simple-ai-chat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_serve());
}

pub fn parse() -> Result<Mode> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]);
            return Ok(Mode::Chat);
        }
        Some(("serve", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]);
            return Ok(Mode::Serve);
        }
        _ => {
            build().print_long_help()?;
            std::process::exit(0);
        }
    }
}
