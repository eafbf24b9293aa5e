/// A single line of player input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based index into the current choices.
    Select(usize),
    Addon(String),
    ClearAddon,
    Submit,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "" | "/go" => Command::Submit,
        "/clear" => Command::ClearAddon,
        "/quit" | "/q" => Command::Quit,
        _ => match trimmed.parse::<usize>() {
            Ok(number) if number >= 1 => Command::Select(number - 1),
            _ => Command::Addon(line.to_string()),
        },
    }
}
