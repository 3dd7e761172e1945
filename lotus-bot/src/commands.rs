//! Command suite.

use std::sync::Arc;

use twilight_http::Client;

use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::{Interaction, InteractionContextType},
    },
    guild::Permissions,
    id::{Id, marker::ApplicationMarker},
    oauth::ApplicationIntegrationType,
};

use twilight_util::builder::command::{CommandBuilder, IntegerBuilder, StringBuilder};

use crate::{config::Config, pipeline::Pipeline};

use derive_more::Deref;

/// Usage text shown by `/help`.
pub const HELP: &str = "\
Hi! I look up card prices on Scryfall.

/low card|set <count> <name>
    The cheapest printings of a card, or the cheapest cards of a set.
/high card|set <count> <name>
    The most expensive printings of a card, or the most expensive cards of a set.
/custom card|set <low price> <high price> <name>
    Every printing or card priced between two prices, inclusive.
/history
    Your most recent commands.
/test
    Runs a few sample commands.

Set names must be spelled out in full, like `Battle for Zendikar`.";

/// Command context.
///
/// Drills some useful things to the command endpoint.
#[derive(Clone, Debug, Deref)]
pub struct InteractionContext {
    /// The interaction this request is responding to.
    #[deref]
    pub interaction: Interaction,
    /// HTTP Client used to respond to interactions.
    pub client: Arc<Client>,
    /// Answers price commands.
    pub pipeline: Pipeline,
    pub config: Arc<Config>,
    pub application_id: Id<ApplicationMarker>,
}

/// Returns a list of commands the bot offers.
pub fn commands() -> [Command; 6] {
    [
        ranked("low", "Lists the cheapest printings of a card, or cards of a set"),
        ranked("high", "Lists the most expensive printings of a card, or cards of a set"),
        CommandBuilder::new(
            "custom",
            "Lists the printings of a card, or cards of a set, within a price range",
            CommandType::ChatInput,
        )
        .integration_types([ApplicationIntegrationType::GuildInstall])
        .contexts([InteractionContextType::Guild])
        .option(scope())
        .option(StringBuilder::new("low", "The lowest price, like 0.50").required(true))
        .option(StringBuilder::new("high", "The highest price, like 20").required(true))
        .option(name())
        .build(),
        CommandBuilder::new(
            "history",
            "Displays the commands you have run recently",
            CommandType::ChatInput,
        )
        .integration_types([ApplicationIntegrationType::GuildInstall])
        .contexts([InteractionContextType::Guild])
        .build(),
        CommandBuilder::new("help", "Explains how to use the bot", CommandType::ChatInput)
            .integration_types([ApplicationIntegrationType::GuildInstall])
            .contexts([InteractionContextType::Guild])
            .build(),
        CommandBuilder::new(
            "test",
            "Runs a few sample commands against Scryfall",
            CommandType::ChatInput,
        )
        .integration_types([ApplicationIntegrationType::GuildInstall])
        .contexts([InteractionContextType::Guild])
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .build(),
    ]
}

fn ranked(name: &str, description: &str) -> Command {
    CommandBuilder::new(name, description, CommandType::ChatInput)
        .integration_types([ApplicationIntegrationType::GuildInstall])
        .contexts([InteractionContextType::Guild])
        .option(scope())
        .option(
            IntegerBuilder::new("count", "How many results to show")
                .min_value(1)
                .required(true),
        )
        .option(self::name())
        .build()
}

fn scope() -> StringBuilder {
    StringBuilder::new("scope", "Whether to look up a single card or a whole set")
        .choices([("card", "card"), ("set", "set")])
        .required(true)
}

fn name() -> StringBuilder {
    StringBuilder::new("name", "The full name of the card or set").required(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_every_command() {
        let names = commands().map(|command| command.name);

        assert_eq!(names, ["low", "high", "custom", "history", "help", "test"]);
    }

    #[test]
    fn custom_options_follow_command_order() {
        let [_, _, custom, ..] = commands();
        let options = custom
            .options
            .iter()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(options, ["scope", "low", "high", "name"]);
    }
}
