//! Server-to-client line formats.

/// Sent before closing a client whose line exceeded the length limit.
pub const INPUT_TOO_LONG: &str = "Input line too long";

pub fn join_notice(nick: &str) -> String {
    format!("{nick} joined the chat!")
}

pub fn rename_notice(old: &str, new: &str) -> String {
    format!("{old} renamed themselves to {new}")
}

pub fn rename_confirmation(new: &str) -> String {
    format!("Successfully changed nickname to {new}")
}

pub fn leave_notice(nick: &str) -> String {
    format!("{nick} left the chat!")
}

pub fn chat_line(nick: &str, text: &str) -> String {
    format!("{nick} : {text}")
}
