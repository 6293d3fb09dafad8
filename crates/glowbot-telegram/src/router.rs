use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tracing::{info, warn};

use glowbot_core::{
    config::Config, ports::PostGenerator, topics::TopicStore, workflow::PostWorkflow,
};

use crate::handlers;
use crate::ChannelSender;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub workflow: Arc<PostWorkflow>,
}

pub async fn run_polling(cfg: Arc<Config>, generator: Arc<dyn PostGenerator>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => info!("glowbot started: @{}", me.username()),
        Err(e) => warn!("get_me failed at startup: {e}"),
    }
    info!(
        "channel: {}, admins: {}",
        cfg.channel_id,
        cfg.admin_ids.len()
    );

    let channel = Arc::new(ChannelSender::new(bot.clone(), &cfg.channel_id));
    let workflow = Arc::new(PostWorkflow::new(
        TopicStore::new(cfg.topics_file.clone()),
        generator,
        channel,
    ));

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        workflow,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
