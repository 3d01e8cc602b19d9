//! Plain chat lines.

use super::Context;
use super::fanout::broadcast;
use super::replies::chat_line;
use tracing::debug;

/// Relay `text` to every client, attributed to the sender's current name.
pub(super) fn handle_chat(ctx: &Context<'_>, text: &str) {
    let nick = ctx.nick();
    let report = broadcast(ctx.registry, chat_line(&nick, text));
    debug!(
        client = %ctx.client.id(),
        delivered = report.delivered,
        failed = report.failed,
        "Chat relayed"
    );
}
