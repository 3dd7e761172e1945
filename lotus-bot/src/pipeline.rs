//! Answering price commands.

use lotus_model::{
    card::CardRecord,
    history::HistoryEntry,
    query::{Query, Scope},
};

use tokio::task::JoinHandle;

use tracing::instrument;

use crate::{
    config::Config,
    error::{Error, ErrorKind},
    format,
    history::History,
    http::Client,
    rank,
    resolve::resolve_set,
    search::{self, Plan, Target},
};

/// Commands exercising each part of the pipeline, run by `/test`.
pub const SAMPLE_COMMANDS: [&str; 4] = [
    "/low card 3 Black Lotus",
    "/high card 5 Island",
    "/low set 2 Limited Edition Alpha",
    "/high set 10 Battle for Zendikar",
];

/// Everything needed to answer a command.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct Pipeline {
    client: Client,
    history: Option<History>,
}

/// A successfully answered command.
#[derive(Clone, Debug)]
pub struct Answer {
    pub query: Query,
    /// The cards that made it through ranking, in display order.
    pub cards: Vec<CardRecord>,
    /// The cards rendered for display.
    pub text: String,
}

impl Pipeline {
    /// Creates a new `Pipeline`, opening the history database if one is
    /// configured.
    pub async fn new(config: &Config) -> Result<Pipeline, anyhow::Error> {
        let client = Client::new(&config.api)?;

        let history = match config.history.database_url.as_deref() {
            Some(url) => Some(History::connect(url).await?),
            None => {
                tracing::info!("no `DATABASE_URL` given, history is disabled");
                None
            }
        };

        Ok(Pipeline::from_parts(client, history))
    }

    /// Creates a `Pipeline` from an existing client and history.
    pub fn from_parts(client: Client, history: Option<History>) -> Pipeline {
        Pipeline { client, history }
    }

    /// The history log, if history is enabled.
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Answers a raw command.
    ///
    /// Commands that parse are recorded to the history of `username` in the
    /// background, whether they are answered or not.
    pub async fn respond(&self, username: Option<&str>, command: &str) -> Result<Answer, Error> {
        let (result, _) = self.respond_recorded(username, command).await;
        result
    }

    /// Answers a raw command like [`Pipeline::respond`], also handing back
    /// the history write so it can be waited on.
    #[instrument(skip(self))]
    pub async fn respond_recorded(
        &self,
        username: Option<&str>,
        command: &str,
    ) -> (Result<Answer, Error>, Option<JoinHandle<()>>) {
        let query = match command.parse::<Query>() {
            Ok(query) => query,
            Err(err) => {
                tracing::info!(%err, "command failed to parse");
                return (Err(err.into()), None);
            }
        };

        let recording = username
            .and_then(|username| self.record(HistoryEntry::new(username, command, &query)));

        let result = self.run(query).await;

        match &result {
            Ok(answer) => tracing::info!(count = answer.cards.len(), "answered"),
            Err(err) if err.kind() == ErrorKind::Unexpected => {
                tracing::error!(%err, "unexpected failure answering command")
            }
            Err(err) => tracing::info!(%err, "command failed"),
        }

        (result, recording)
    }

    /// Writes an entry to history without waiting on it.
    ///
    /// Returns `None` if history is disabled.
    pub fn record(&self, entry: HistoryEntry) -> Option<JoinHandle<()>> {
        let history = self.history.clone()?;

        Some(tokio::spawn(async move {
            if let Err(err) = history.append(&entry).await {
                tracing::warn!(%err, "failed to record history");
            }
        }))
    }

    /// Runs every sample command, rendering each answer under its command.
    pub async fn run_samples(&self) -> String {
        let mut report = Vec::with_capacity(SAMPLE_COMMANDS.len());

        for command in SAMPLE_COMMANDS {
            let text = match self.respond(None, command).await {
                Ok(answer) => answer.text,
                Err(err) => err.user_message(),
            };
            report.push(format!("> {}\n{}", command, text));
        }

        report.join("\n\n")
    }

    /// Answers an already parsed query.
    pub async fn run(&self, query: Query) -> Result<Answer, Error> {
        let plan = Plan::for_query(&query);

        let records = match query.scope {
            Scope::Card => search::search(&self.client, Target::Card(&query.name), plan).await?,
            Scope::Set => {
                let code = resolve_set(&self.client, &query.name).await?;
                search::search(&self.client, Target::Set(&code), plan).await?
            }
        };

        if records.is_empty() {
            return Err(Error::NotFound);
        }

        let cards = rank::apply(records, &query);
        if cards.is_empty() {
            return Err(Error::EmptyResult);
        }

        let text = format::cards(&cards, self.client.currency());

        Ok(Answer { query, cards, text })
    }
}
