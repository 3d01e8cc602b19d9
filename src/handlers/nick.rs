//! `/nick` - rename the issuing client.

use super::Context;
use super::fanout::broadcast;
use super::replies::{rename_confirmation, rename_notice};
use crate::error::{CommandError, CommandResult};
use tracing::info;

/// Announce the rename under the old name, swap the name, confirm privately.
///
/// Names are not validated: empty names and names already in use are
/// accepted.
pub(super) fn handle_nick(ctx: &Context<'_>, new_nick: Option<&str>) -> CommandResult {
    let new_nick = new_nick.ok_or(CommandError::NoNicknameProvided)?;
    let old_nick = ctx.nick();

    broadcast(ctx.registry, rename_notice(&old_nick, new_nick));
    ctx.client.set_nick(new_nick);
    info!(client = %ctx.client.id(), old = %old_nick, new = %new_nick, "Nick changed");

    ctx.reply(rename_confirmation(new_nick));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{drain, join};
    use crate::state::Registry;

    #[test]
    fn missing_name_leaves_nick_unchanged() {
        let registry = Registry::new();
        let (alice, mut rx) = join(&registry, 1, "alice");

        let err = handle_nick(&Context::new(&alice, &registry), None).unwrap_err();

        assert_eq!(err, CommandError::NoNicknameProvided);
        assert_eq!(alice.nick().as_deref(), Some("alice"));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn duplicate_and_empty_names_are_accepted() {
        let registry = Registry::new();
        let (alice, _rx) = join(&registry, 1, "alice");
        let (_bob, _bob_rx) = join(&registry, 2, "bob");
        let ctx = Context::new(&alice, &registry);

        handle_nick(&ctx, Some("bob")).unwrap();
        assert_eq!(alice.nick().as_deref(), Some("bob"));

        handle_nick(&ctx, Some("")).unwrap();
        assert_eq!(alice.nick().as_deref(), Some(""));
    }

    #[test]
    fn exactly_one_rename_notice_per_rename() {
        let registry = Registry::new();
        let (alice, _rx) = join(&registry, 1, "alice");
        let (_bob, mut bob_rx) = join(&registry, 2, "bob");

        handle_nick(&Context::new(&alice, &registry), Some("al")).unwrap();

        assert_eq!(drain(&mut bob_rx), vec!["alice renamed themselves to al"]);
    }
}
