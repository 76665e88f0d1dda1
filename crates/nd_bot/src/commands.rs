//! Command handlers: parse incoming messages, run the digest flows and
//! convert every internal failure into a user-facing reply.

use tracing::{error, info};
use url::Url;

use nd_core::Error;

use crate::digest::{DetailReply, DigestReply, DigestService};
use crate::telegram::{BotCommand, Message, TelegramClient};
use crate::text::escape_markdown;

pub struct Bot {
    pub telegram: TelegramClient,
    pub digest: DigestService,
}

pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand {
            command: "start".to_string(),
            description: "Start working with the bot".to_string(),
        },
        BotCommand {
            command: "digest".to_string(),
            description: "Get the next news digest item".to_string(),
        },
        BotCommand {
            command: "detail".to_string(),
            description: "Get a detailed summary for a keyword".to_string(),
        },
    ]
}

/// Dispatch one incoming message.
///
/// This is the error boundary: no failure below here escapes to the
/// polling loop; everything becomes a logged apology reply.
pub async fn handle_update(bot: &Bot, message: &Message) {
    let Some(text) = message.text.as_deref() else {
        return;
    };
    let Some((command, args)) = parse_command(text) else {
        return;
    };
    let chat_id = message.chat.id;

    let result = match command {
        "/start" => handle_start(bot, message).await,
        "/digest" => handle_digest(bot, chat_id).await,
        "/detail" => handle_detail(bot, chat_id, args).await,
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!(chat_id, command, error = %e, "command failed");
        let reply = error_reply(&e);
        if let Err(send_err) = bot.telegram.send_message(chat_id, reply, false).await {
            error!(chat_id, error = %send_err, "failed to deliver error reply");
        }
    }
}

/// `/command@botname args` -> `("/command", "args")`.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let (head, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let command = head.split('@').next().unwrap_or(head);
    Some((command, rest.trim()))
}

fn error_reply(error: &Error) -> &'static str {
    match error {
        Error::FetchTimeout(_) => {
            "The news service took too long to respond. Please try again later."
        }
        Error::Fetch(_) | Error::Http(_) => {
            "Could not reach the news service. Please try again later."
        }
        Error::EmptyResult => "No news found.",
        Error::EmptyAfterCleaning => "Could not process the fetched news. Please try again later.",
        _ => "An error occurred while processing your request. Please try again.",
    }
}

async fn handle_start(bot: &Bot, message: &Message) -> nd_core::Result<()> {
    let chat_id = message.chat.id;
    bot.telegram.send_typing(chat_id).await?;

    // A fresh start also restarts pagination.
    bot.digest.reset(chat_id).await;

    let name = message
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .unwrap_or("there");
    let greeting = format!(
        "Hi {name}!\n\n\
         I'm your news digest bot.\n\n\
         Use /digest to page through today's news one story at a time.\n\
         Use /detail <keyword> for a detailed summary on a topic."
    );
    bot.telegram.send_message(chat_id, &greeting, false).await
}

async fn handle_digest(bot: &Bot, chat_id: i64) -> nd_core::Result<()> {
    bot.telegram.send_typing(chat_id).await?;

    if bot.digest.needs_load(chat_id).await {
        bot.telegram
            .send_message(chat_id, "Loading and processing news...", false)
            .await?;
    }

    match bot.digest.digest(chat_id).await? {
        DigestReply::Exhausted => {
            bot.telegram
                .send_message(
                    chat_id,
                    "You have viewed all the news!\nUse /start to start over.",
                    false,
                )
                .await
        }
        DigestReply::Item {
            index,
            total,
            title,
            summary,
            url,
        } => {
            info!(chat_id, index, total, "serving digest item");
            let text = format_digest_item(index, total, &title, &summary, url.as_ref());
            bot.telegram.send_long_message(chat_id, &text, true).await?;
            bot.telegram
                .send_message(
                    chat_id,
                    "For a deeper look at a topic, use /detail <keyword>.",
                    false,
                )
                .await
        }
    }
}

async fn handle_detail(bot: &Bot, chat_id: i64, keyword: &str) -> nd_core::Result<()> {
    if keyword.is_empty() {
        return bot
            .telegram
            .send_message(
                chat_id,
                "Please provide a keyword to search for.\n\nFor example:\n/detail quantum",
                false,
            )
            .await;
    }

    bot.telegram.send_typing(chat_id).await?;
    bot.telegram
        .send_message(chat_id, &format!("Searching for news about: {keyword}..."), false)
        .await?;

    match bot.digest.detail(keyword).await? {
        DetailReply::NoMatches => {
            bot.telegram
                .send_message(
                    chat_id,
                    &format!("No relevant news found for '{keyword}'."),
                    false,
                )
                .await
        }
        DetailReply::Summary { text, url } => {
            let reply = format_detail(&text, url.as_ref());
            bot.telegram.send_long_message(chat_id, &reply, true).await
        }
    }
}

fn format_digest_item(
    index: usize,
    total: usize,
    title: &str,
    summary: &str,
    url: Option<&Url>,
) -> String {
    let mut text = format!(
        "*News {} of {}*\n\n*Title:* {}\n\n{}",
        index + 1,
        total,
        escape_markdown(title),
        escape_markdown(summary),
    );
    if let Some(url) = url {
        text.push_str(&format!("\n\n[Read more]({})", escape_markdown(url.as_str())));
    }
    text
}

fn format_detail(summary: &str, url: Option<&Url>) -> String {
    let mut text = escape_markdown(summary);
    if let Some(url) = url {
        text.push_str(&format!(
            "\n\n[Read the article]({})",
            escape_markdown(url.as_str())
        ));
    }
    text
}
