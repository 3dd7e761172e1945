//! Lotus command-line interface.

use std::path::PathBuf;

use anyhow::Error;

use clap::{Parser, Subcommand};

use tokio::io::{AsyncBufReadExt as _, BufReader};

use crate::{commands::HELP, config::Config, format, pipeline::Pipeline};

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Subcommands.
    ///
    /// Without one, the Discord bot is started.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operational commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Query(QueryCommand),
    Repl(Repl),
    /// Runs the sample commands.
    Test,
    History(ListHistory),
}

/// Answers a single command, like `lotus-bot query /low card 3 Black Lotus`.
#[derive(clap::Args, Debug)]
pub struct QueryCommand {
    /// The command, with or without quotes.
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub command: Vec<String>,
    /// Records the command to this user's history.
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Reads commands from standard input until `/quit`.
#[derive(clap::Args, Debug)]
pub struct Repl {
    /// Records commands to this user's history.
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Lists a user's recent commands.
#[derive(clap::Args, Debug)]
pub struct ListHistory {
    pub username: String,
    /// How many commands to list.
    ///
    /// Defaults to `history.list_limit`.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Runs a command.
pub async fn run_command(
    command: &Command,
    pipeline: &Pipeline,
    config: &Config,
) -> Result<(), Error> {
    match command {
        Command::Query(command) => {
            let text = command.command.join(" ");
            let (result, recording) = pipeline
                .respond_recorded(command.user.as_deref(), &text)
                .await;

            match result {
                Ok(answer) => println!("{}", answer.text),
                Err(err) => println!("{}", err.user_message()),
            }

            // the runtime shuts down on return, taking unfinished writes with it
            if let Some(recording) = recording {
                recording.await?;
            }

            Ok(())
        }
        Command::Repl(repl) => run_repl(repl, pipeline, config.history.list_limit).await,
        Command::Test => {
            println!("{}", pipeline.run_samples().await);
            Ok(())
        }
        Command::History(command) => {
            let limit = command.limit.unwrap_or(config.history.list_limit);
            println!("{}", history(pipeline, &command.username, limit).await?);
            Ok(())
        }
    }
}

async fn run_repl(repl: &Repl, pipeline: &Pipeline, list_limit: u32) -> Result<(), Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        let output = match line.split_whitespace().next() {
            None => continue,
            Some("/quit") => break,
            Some("/help" | "/start") => HELP.to_owned(),
            Some("/test") => pipeline.run_samples().await,
            Some("/history") => match repl.user.as_deref() {
                Some(user) => history(pipeline, user, list_limit).await?,
                None => "Pass `--user` to keep history.".to_owned(),
            },
            Some(_) => answer(pipeline, repl.user.as_deref(), line).await,
        };

        println!("{}\n", output);
    }

    Ok(())
}

async fn answer(pipeline: &Pipeline, user: Option<&str>, command: &str) -> String {
    match pipeline.respond(user, command).await {
        Ok(answer) => answer.text,
        Err(err) => err.user_message(),
    }
}

async fn history(pipeline: &Pipeline, username: &str, limit: u32) -> Result<String, Error> {
    let Some(history) = pipeline.history() else {
        return Err(Error::msg("`DATABASE_URL` not present, history is disabled"));
    };

    let entries = history.list(username, limit).await?;

    Ok(format::history(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_unquoted_commands() {
        let args = Args::parse_from(["lotus-bot", "query", "/low", "card", "3", "Black", "Lotus"]);

        let Some(Command::Query(query)) = args.command else {
            panic!("expected query subcommand");
        };
        assert_eq!(query.command.join(" "), "/low card 3 Black Lotus");
    }

    #[test]
    fn no_subcommand_runs_bot() {
        let args = Args::parse_from(["lotus-bot", "--config", "bot.toml"]);

        assert!(args.command.is_none());
        assert_eq!(args.config, Some(PathBuf::from("bot.toml")));
    }

    #[test]
    fn history_takes_limit() {
        let args = Args::parse_from(["lotus-bot", "history", "jace", "--limit", "5"]);

        assert!(matches!(
            args.command,
            Some(Command::History(ListHistory { ref username, limit: Some(5) })) if username == "jace"
        ));
    }
}
