//! Interactive prompts for values not supplied on the command line.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

/// Write `label` and read one trimmed line from `input`.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{label}").context("failed to write prompt")?;
    output.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("failed to read answer to {:?}", label.trim()))?;
    if read == 0 {
        bail!("input closed before answering {:?}", label.trim());
    }
    Ok(line.trim().to_string())
}

/// Prompt for an energy budget and parse it as a number.
pub fn prompt_budget<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64> {
    let answer = prompt_line(input, output, "Enter Energy budget: ")?;
    parse_budget(&answer)
}

/// Parse a budget value; validity (non-negative) is checked by the library.
pub fn parse_budget(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("energy budget {value:?} is not a number"))
}
