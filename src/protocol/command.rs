#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    FieldsetInit,
    SourceExists,
    SourceAdd,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "fieldset.init" => Command::FieldsetInit,
            "source.exists" => Command::SourceExists,
            "source.add" => Command::SourceAdd,
            _ => Command::Unknown,
        }
    }
}
