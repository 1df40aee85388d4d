use crate::utils::error::Result;
use crate::utils::validation::{validate, FieldRule};
use std::io::{BufRead, Write};

/// Line-oriented console I/O. End of input surfaces as an `UnexpectedEof` IO error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompts until the answer satisfies `rule`.
    pub fn ask_valid(&mut self, prompt: &str, rule: FieldRule) -> Result<String> {
        loop {
            let value = self.ask(prompt)?;
            if validate(&value, rule) {
                return Ok(value);
            }
            self.say(format!("Invalid input: {}. Please try again.", rule.reason()))?;
        }
    }

    /// Like [`ask_valid`](Self::ask_valid), but a blank answer keeps `current` and yields `None`.
    pub fn ask_change(&mut self, label: &str, current: &str, rule: FieldRule) -> Result<Option<String>> {
        let prompt = format!("{} [{}]: ", label, current);
        loop {
            let value = self.ask(&prompt)?;
            if value.is_empty() {
                return Ok(None);
            }
            if validate(&value, rule) {
                return Ok(Some(value));
            }
            self.say(format!("Invalid input: {}. Please try again.", rule.reason()))?;
        }
    }
}
