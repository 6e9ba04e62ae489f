//! Line-oriented shell running commands against a single store.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::commands::{self, Context};
use crate::Command;

const PROMPT: &str = "proposals> ";

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// Split a line into words, keeping double-quoted text together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub async fn run(ctx: &Context) -> Result<()> {
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        // Not holding the stdin lock: `login` prompts on stdin too
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let words = split_words(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit") | Some("quit") => break,
            Some(_) => {}
        }

        match Line::try_parse_from(&words) {
            Ok(parsed) => {
                if let Err(e) = commands::run(ctx, parsed.command).await {
                    eprintln!("Error: {}", e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }

        if let Some(entry) = ctx.store.cached() {
            debug!(id = %entry.proposal.id, age = %entry.age_display(), "Cached proposal");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_handles_quotes() {
        assert_eq!(
            split_words(r#"add "Summer trip" --activity 3"#),
            vec!["add", "Summer trip", "--activity", "3"]
        );
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_line_parses_subcommands() {
        let line = Line::try_parse_from(["add-activity", "1", "42"]).unwrap();
        assert!(matches!(
            line.command,
            Command::AddActivity { ref proposal_id, activity_id: 42 } if proposal_id == "1"
        ));

        let line = Line::try_parse_from(["show", "1", "2"]).unwrap();
        assert!(matches!(line.command, Command::Show { ref ids } if ids.len() == 2));
    }

    #[test]
    fn test_line_rejects_unknown() {
        assert!(Line::try_parse_from(["frobnicate"]).is_err());
    }
}
