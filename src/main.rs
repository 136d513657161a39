use clap::Parser;
use passvault::cli::commands::update::resolve_action;
use passvault::cli::{Cli, Commands, VaultAction};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Vault { ref action } => match action {
            VaultAction::Add { ref name, ref key } => {
                passvault::cli::commands::vault_add::execute(&cli, name, key)
            }
            VaultAction::Switch { ref name, ref key } => {
                passvault::cli::commands::vault_switch::execute(&cli, name, key)
            }
            VaultAction::Update {
                ref old_key,
                ref new_key,
            } => passvault::cli::commands::vault_update::execute(&cli, old_key, new_key),
            VaultAction::Delete { ref name, ref key } => {
                passvault::cli::commands::vault_delete::execute(&cli, name, key)
            }
            VaultAction::List { ref key, info } => {
                passvault::cli::commands::vault_list::execute(&cli, key.as_deref(), *info)
            }
        },
        Commands::Add {
            ref tag,
            ref key,
            ref username,
            ref password,
            ref file,
        } => passvault::cli::commands::add::execute(
            &cli,
            tag,
            key,
            username.as_deref(),
            password.as_deref(),
            file.as_deref(),
        ),
        Commands::Update {
            ref tag,
            ref key,
            ref username,
            ref password,
            ref note,
            ref file,
            delete,
        } => resolve_action(
            username.as_deref(),
            password.as_deref(),
            note.as_deref(),
            file.as_deref(),
            delete,
        )
        .and_then(|action| passvault::cli::commands::update::execute(&cli, tag, key, action)),
        Commands::Print {
            ref tag,
            ref key,
            username,
            password,
            note,
        } => passvault::cli::commands::print::execute(&cli, tag, key, username, password, note),
        Commands::Clip {
            ref tag,
            ref key,
            username,
            password,
        } => passvault::cli::commands::clip::execute(&cli, tag, key, username, password),
        Commands::Completions { ref shell } => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
