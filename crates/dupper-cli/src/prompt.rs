//! Interactive credential prompt

use std::io::{BufRead, Write};

use dupper_core::{CredentialPrompt, SecretString, StoreError};

/// Prompts on the terminal; passwords are read without echo
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stdin/stderr so stdout stays clean for results
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> CredentialPrompt for TerminalPrompt<R, W> {
    fn prompt_username(&mut self, _server: &str, default: Option<&str>) -> dupper_core::Result<String> {
        match default {
            Some(default) => write!(self.output, "Username ({}): ", default)?,
            None => write!(self.output, "Username: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn prompt_password(&mut self) -> dupper_core::Result<SecretString> {
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| StoreError::ConfigError(format!("Failed to read password: {}", e)))?;
        Ok(SecretString::new(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_username_shows_default() {
        let mut output = Vec::new();
        let mut prompt = TerminalPrompt::new(" bob \n".as_bytes(), &mut output);

        let username = prompt.prompt_username("reg.example", Some("alice")).unwrap();

        assert_eq!(username, "bob");
        assert_eq!(String::from_utf8(output).unwrap(), "Username (alice): ");
    }

    #[test]
    fn test_prompt_username_empty_input() {
        let mut output = Vec::new();
        let mut prompt = TerminalPrompt::new("\n".as_bytes(), &mut output);

        let username = prompt.prompt_username("reg.example", None).unwrap();

        assert!(username.is_empty());
        assert_eq!(String::from_utf8(output).unwrap(), "Username: ");
    }
}
