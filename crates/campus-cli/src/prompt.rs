//! Terminal stand-in for the provider consent popup.

use async_trait::async_trait;
use campus_core::error::{AuthError, Result};
use campus_core::identity::OAuthProvider;
use campus_infrastructure::{ProviderFlow, ProviderGrant};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Asks for the provider account on the terminal.
///
/// An email given on the command line skips the prompt. Ctrl-C, Ctrl-D or an
/// empty email abandon the flow, like closing the popup.
pub struct PromptProviderFlow {
    preset: Option<ProviderGrant>,
}

impl PromptProviderFlow {
    pub fn new(email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            preset: email.map(|email| ProviderGrant {
                email,
                display_name,
            }),
        }
    }
}

#[async_trait]
impl ProviderFlow for PromptProviderFlow {
    async fn authorize(&self, provider: OAuthProvider) -> Result<Option<ProviderGrant>> {
        if let Some(grant) = &self.preset {
            return Ok(Some(grant.clone()));
        }

        tokio::task::spawn_blocking(move || prompt_grant(provider))
            .await
            .map_err(|e| AuthError::Network(format!("prompt task failed: {}", e)))?
    }
}

fn prompt_grant(provider: OAuthProvider) -> Result<Option<ProviderGrant>> {
    let mut editor = DefaultEditor::new().map_err(|e| AuthError::Network(e.to_string()))?;
    println!(
        "{} {}",
        format!("Continue with {}", provider).as_str().bold(),
        "(empty input or Ctrl-C cancels)".dimmed()
    );

    let email = match read_line(&mut editor, "  account email: ")? {
        Some(email) if !email.is_empty() => email,
        _ => return Ok(None),
    };
    let Some(display_name) = read_line(&mut editor, "  display name (optional): ")? else {
        return Ok(None);
    };

    Ok(Some(ProviderGrant {
        email,
        display_name: (!display_name.is_empty()).then_some(display_name),
    }))
}

/// Reads one trimmed line; `None` when the user interrupts.
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(AuthError::Network(e.to_string()).into()),
    }
}
