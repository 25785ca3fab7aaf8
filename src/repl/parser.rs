use tracing::debug;

const MAX_FIELDS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub command: String,
    pub arg1: String,
    pub arg2: String,
}

impl Parsed {
    pub fn is_empty(&self) -> bool {
        self.command.is_empty() && self.arg1.is_empty() && self.arg2.is_empty()
    }
}

/// Splits on single spaces; missing fields are empty and anything past the
/// third field is dropped, so bodies must not contain spaces.
pub fn parse(line: &str) -> Parsed {
    let mut fields = line.splitn(MAX_FIELDS + 1, ' ').map(str::to_string);
    let parsed = Parsed {
        command: fields.next().unwrap_or_default(),
        arg1: fields.next().unwrap_or_default(),
        arg2: fields.next().unwrap_or_default(),
    };
    debug!(
        command = %parsed.command,
        arg1 = %parsed.arg1,
        arg2 = %parsed.arg2,
        "parse ok"
    );
    parsed
}
