use std::io::{BufRead, Write};

pub const CONFIRM_PROMPT: &str = "Are you sure you want to continue? [y/n]";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Use 'y' to continue")]
    Declined,
    #[error("failed to read confirmation: {0}")]
    Io(#[from] std::io::Error),
    #[error("confirmation prompt task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Ask on `output` and accept only an exact `y` line from `input`
pub fn confirm_with<R: BufRead, W: Write>(
    prompt: &str,
    mut input: R,
    mut output: W,
) -> Result<(), PromptError> {
    write!(output, "{}:", prompt)?;
    output.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;

    if response.strip_suffix('\n').unwrap_or(&response) == "y" {
        Ok(())
    } else {
        Err(PromptError::Declined)
    }
}

/// Ask on the terminal, off the async runtime
pub async fn confirm(prompt: &str) -> Result<(), PromptError> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        confirm_with(&prompt, std::io::stdin().lock(), std::io::stdout())
    })
    .await?
}
