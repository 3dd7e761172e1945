//! Interaction dispatch.

use tracing::instrument;

use twilight_model::{
    application::interaction::{
        InteractionData, InteractionType,
        application_command::{CommandData, CommandDataOption, CommandOptionValue},
    },
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseType},
};

use crate::{commands::InteractionContext, error::ErrorKind, format};

/// The longest message Discord accepts.
pub const MESSAGE_LEN: usize = 2000;

/// Handles an interaction.
#[instrument(skip(cx))]
pub async fn interaction(mut cx: InteractionContext) {
    match cx.kind {
        InteractionType::ApplicationCommand => {
            let data = cx.interaction.data.take();
            let Some(InteractionData::ApplicationCommand(data)) = data else {
                tracing::error!("failed to get interaction payload");
                return;
            };

            if let Err(err) = slash_command(cx, *data).await {
                for err in err.chain() {
                    tracing::error!("{:?}", err);
                }
            }
        }
        // ignore other payloads
        _ => (),
    }
}

async fn slash_command(cx: InteractionContext, data: CommandData) -> anyhow::Result<()> {
    match data.name.as_str() {
        "low" | "high" | "custom" => {
            defer(&cx).await?;

            let command = command_text(&data.name, &data.options);
            let username = cx.author().map(|user| user.name.as_str());

            let text = match cx.pipeline.respond(username, &command).await {
                Ok(answer) => answer.text,
                Err(err) => match (err.kind(), cx.config.accent.select_not_found()) {
                    (ErrorKind::NotFound | ErrorKind::EmptyResult, Some(accent)) => {
                        format!("-# {}\n{}", accent, err.user_message())
                    }
                    _ => err.user_message(),
                },
            };

            reply(&cx, &text).await?;
        }
        "history" => {
            let text = match (cx.pipeline.history(), cx.author()) {
                (Some(history), Some(user)) => {
                    let entries = history
                        .list(&user.name, cx.config.history.list_limit)
                        .await?;
                    format::history(&entries)
                }
                _ => "History is not being kept.".to_owned(),
            };

            respond_ephemeral(&cx, &text).await?;
        }
        "help" => respond_ephemeral(&cx, crate::commands::HELP).await?,
        "test" => {
            defer(&cx).await?;

            let report = cx.pipeline.run_samples().await;
            reply(&cx, &report).await?;
        }
        _ => tracing::warn!(?cx.interaction, "unknown interaction"),
    }

    Ok(())
}

/// Rebuilds the raw command text a slash command stands for.
///
/// Missing options are left out, which the parser reports as a malformed
/// command.
pub fn command_text(name: &str, options: &[CommandDataOption]) -> String {
    let fields: &[&str] = match name {
        "custom" => &["scope", "low", "high", "name"],
        _ => &["scope", "count", "name"],
    };

    let values = fields.iter().filter_map(|field| {
        options
            .iter()
            .find(|option| option.name == *field)
            .and_then(|option| match option.value {
                CommandOptionValue::String(ref value) => Some(value.clone()),
                CommandOptionValue::Integer(value) => Some(value.to_string()),
                CommandOptionValue::Number(value) => Some(value.to_string()),
                _ => None,
            })
    });

    std::iter::once(format!("/{}", name))
        .chain(values)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits text into messages Discord accepts.
///
/// Splits happen between paragraphs where possible, so a card is never
/// spread over two messages unless it alone is too long.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let needed = if current.is_empty() {
            paragraph.len()
        } else {
            current.len() + 2 + paragraph.len()
        };

        if needed <= max_len {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
            continue;
        }

        if !current.is_empty() {
            messages.push(std::mem::take(&mut current));
        }

        if paragraph.len() <= max_len {
            current.push_str(paragraph);
        } else {
            messages.extend(hard_split(paragraph, max_len));
        }
    }

    if !current.is_empty() {
        messages.push(current);
    }

    messages
}

fn hard_split(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();

    for ch in text.chars() {
        if chunk.len() + ch.len_utf8() > max_len {
            chunks.push(std::mem::take(&mut chunk));
        }
        chunk.push(ch);
    }

    if !chunk.is_empty() {
        chunks.push(chunk);
    }

    chunks
}

async fn defer(cx: &InteractionContext) -> anyhow::Result<()> {
    cx.client
        .interaction(cx.application_id)
        .create_response(
            cx.id,
            &cx.token,
            &InteractionResponse {
                kind: InteractionResponseType::DeferredChannelMessageWithSource,
                data: None,
            },
        )
        .await?;

    Ok(())
}

/// Fills a deferred response with `text`, following up with the rest if it
/// does not fit in a single message.
async fn reply(cx: &InteractionContext, text: &str) -> anyhow::Result<()> {
    let client = cx.client.interaction(cx.application_id);
    let mut messages = split_message(text, MESSAGE_LEN).into_iter();

    let first = messages.next().unwrap_or_default();
    client
        .update_response(&cx.token)
        .content(Some(first.as_str()))
        .await?;

    for message in messages {
        client.create_followup(&cx.token).content(&message).await?;
    }

    Ok(())
}

async fn respond_ephemeral(cx: &InteractionContext, text: &str) -> anyhow::Result<()> {
    let client = cx.client.interaction(cx.application_id);
    let mut messages = split_message(text, MESSAGE_LEN).into_iter();

    let first = messages.next().unwrap_or_default();
    client
        .create_response(
            cx.id,
            &cx.token,
            &InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(
                    twilight_util::builder::InteractionResponseDataBuilder::new()
                        .flags(MessageFlags::EPHEMERAL)
                        .content(first)
                        .build(),
                ),
            },
        )
        .await?;

    for message in messages {
        client
            .create_followup(&cx.token)
            .flags(MessageFlags::EPHEMERAL)
            .content(&message)
            .await?;
    }

    Ok(())
}
