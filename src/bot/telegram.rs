//! Telegram transport: `/start` sends the menu, every button press edits
//! the pressed message in place.
use crate::bot::action::Action;
use crate::bot::controller::{BotController, RenderedPage};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the news categories")]
    Start,
    #[command(description = "Show this help message")]
    Help,
}

/// Runs the long-polling dispatcher until Ctrl-C.
///
/// Each update is handled as its own task; the controller is shared
/// read-only between them.
pub async fn run(bot: Bot, controller: Arc<BotController>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    tracing::info!("Bot started, polling for updates");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![controller])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bot stopped");
}

fn schema() -> UpdateHandler<RequestError> {
    let commands = teloxide::filter_command::<Command, _>().endpoint(on_command);

    dptree::entry()
        .branch(Update::filter_message().branch(commands))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    controller: Arc<BotController>,
) -> ResponseResult<()> {
    tracing::debug!(chat_id = %msg.chat.id, command = ?cmd, "Received command");

    match cmd {
        Command::Start => {
            let page = controller.start();
            bot.send_message(msg.chat.id, page.text)
                .reply_markup(InlineKeyboardMarkup::from(&page.keyboard))
                .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
    }

    Ok(())
}

/// What a button press asks for once its payload and message are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonPress<M> {
    Handle(Action, M),
    /// Payload missing or not produced by this bot.
    UnknownData,
    /// Message too old or deleted, so there is nothing to edit.
    MessageGone,
}

fn classify_press<M>(data: Option<&str>, message: Option<M>) -> ButtonPress<M> {
    let Some(action) = data.and_then(Action::decode) else {
        return ButtonPress::UnknownData;
    };
    match message {
        Some(message) => ButtonPress::Handle(action, message),
        None => ButtonPress::MessageGone,
    }
}

async fn on_callback(
    bot: Bot,
    q: CallbackQuery,
    controller: Arc<BotController>,
) -> ResponseResult<()> {
    // Stop the client's loading indicator before the (possibly slow) fetch
    bot.answer_callback_query(q.id.clone()).await?;

    let (action, message) = match classify_press(q.data.as_deref(), q.regular_message()) {
        ButtonPress::Handle(action, message) => (action, message),
        ButtonPress::UnknownData => {
            tracing::debug!(data = ?q.data, "Ignoring unknown callback data");
            return Ok(());
        }
        ButtonPress::MessageGone => {
            tracing::debug!(data = ?q.data, "Callback message is no longer accessible");
            return Ok(());
        }
    };

    tracing::debug!(chat_id = %message.chat.id, ?action, "Handling button press");

    let page = controller.handle(action).await;
    edit_in_place(&bot, message, page).await
}

async fn edit_in_place(bot: &Bot, message: &Message, page: RenderedPage) -> ResponseResult<()> {
    let markup = InlineKeyboardMarkup::from(&page.keyboard);

    let result = bot
        .edit_message_text(message.chat.id, message.id, page.text)
        .reply_markup(markup)
        .await;

    if !ignore_unmodified(result)? {
        tracing::debug!(chat_id = %message.chat.id, "Message unchanged");
    }
    Ok(())
}

/// `Ok(true)` when the edit went through, `Ok(false)` when Telegram
/// rejected it only because the page is identical.
fn ignore_unmodified<T>(result: ResponseResult<T>) -> ResponseResult<bool> {
    match result {
        Ok(_) => Ok(true),
        // Refresh with unchanged upstream data produces an identical page
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(false),
        Err(e) => Err(e),
    }
}
