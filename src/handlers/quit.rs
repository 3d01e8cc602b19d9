//! `/quit` - leave the chat.

use super::Context;
use super::fanout::broadcast;
use super::replies::leave_notice;
use tracing::info;

pub(super) fn handle_quit(ctx: &Context<'_>) {
    let nick = ctx.nick();
    info!(client = %ctx.client.id(), nick = %nick, "Client quit");
    broadcast(ctx.registry, leave_notice(&nick));
}
