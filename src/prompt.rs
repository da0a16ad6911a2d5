//! Interactive input
//!
//! Reads the fields of a new treasure, one prompt per line of input.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{Result, StepContext, TreasureError};
use crate::record::Treasure;

/// Treasure fields known before prompting; `None` fields are asked for
#[derive(Debug, Clone, Default)]
pub struct TreasureDraft {
    pub id: Option<i32>,
    pub owner: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub clue: Option<String>,
    pub value: Option<i32>,
}

impl TreasureDraft {
    /// Whether every field is already filled in
    pub fn is_complete(&self) -> bool {
        self.id.is_some()
            && self.owner.is_some()
            && self.latitude.is_some()
            && self.longitude.is_some()
            && self.clue.is_some()
            && self.value.is_some()
    }
}

/// Complete `draft`, prompting on `output` and reading from `input`
///
/// Prompts come in a fixed order: id, username, latitude, longitude, clue,
/// value. The username is the first whitespace-separated token of its line;
/// the clue is the whole line.
pub fn read_treasure<R, W>(input: &mut R, output: &mut W, draft: TreasureDraft) -> Result<Treasure>
where
    R: BufRead,
    W: Write,
{
    let mut prompter = Prompter { input, output };

    let id = match draft.id {
        Some(id) => id,
        None => prompter.parsed("Enter treasure ID (integer): ", "treasure ID")?,
    };
    let owner = match draft.owner {
        Some(owner) => owner,
        None => prompter.token("Enter username: ", "username")?,
    };
    let latitude = match draft.latitude {
        Some(lat) => lat,
        None => prompter.parsed("Enter latitude: ", "latitude")?,
    };
    let longitude = match draft.longitude {
        Some(lon) => lon,
        None => prompter.parsed("Enter longitude: ", "longitude")?,
    };
    let clue = match draft.clue {
        Some(clue) => clue,
        None => prompter.line("Enter clue text: ", "clue text")?,
    };
    let value = match draft.value {
        Some(value) => value,
        None => prompter.parsed("Enter value (integer): ", "value")?,
    };

    Ok(Treasure {
        id,
        owner,
        latitude,
        longitude,
        clue,
        value,
    })
}

struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    /// Show `prompt` and return the next line without its line ending
    fn line(&mut self, prompt: &str, field: &str) -> Result<String> {
        self.output
            .write_all(prompt.as_bytes())
            .and_then(|_| self.output.flush())
            .step("Failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .step("Failed to read input")?;
        if read == 0 {
            return Err(TreasureError::InvalidInput(format!(
                "input ended before {} was entered",
                field
            )));
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn token(&mut self, prompt: &str, field: &str) -> Result<String> {
        let line = self.line(prompt, field)?;
        line.split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| TreasureError::InvalidInput(format!("{} is empty", field)))
    }

    fn parsed<T: FromStr>(&mut self, prompt: &str, field: &str) -> Result<T> {
        let raw = self.token(prompt, field)?;
        raw.parse().map_err(|_| {
            TreasureError::InvalidInput(format!("{} '{}' is not a valid number", field, raw))
        })
    }
}
