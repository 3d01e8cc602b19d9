//! Input line classification.

/// A parsed input line.
///
/// Prefixes are matched literally and case-sensitively, so `/nickname bob`
/// is a rename to `bob` and `/quitting` is a quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/nick <name>`; `None` when the line has no space after the command.
    Nick(Option<&'a str>),
    /// `/quit`
    Quit,
    /// Anything else, relayed verbatim.
    Chat(&'a str),
}

const NICK: &str = "/nick";
const QUIT: &str = "/quit";

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line.starts_with(NICK) {
            // Everything after the first space is the new name, spaces included.
            Command::Nick(line.split_once(' ').map(|(_, name)| name))
        } else if line.starts_with(QUIT) {
            Command::Quit
        } else {
            Command::Chat(line)
        }
    }
}
