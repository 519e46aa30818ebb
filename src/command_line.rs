//! Turning a test's command into the argument vector that gets executed.

use crate::error::SessionError;

/// Token replaced by the next template argument.
pub const PLACEHOLDER: &str = "%s";

/// A command as written in a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Whitespace-delimited command, possibly containing `%s` placeholders.
    Text(String),
    /// Already split arguments, used verbatim.
    Tokens(Vec<String>),
}

impl From<&str> for CommandLine {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(value: Vec<String>) -> Self {
        Self::Tokens(value)
    }
}

impl From<&[&str]> for CommandLine {
    fn from(value: &[&str]) -> Self {
        Self::Tokens(value.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CommandLine {
    fn from(value: [&str; N]) -> Self {
        Self::from(&value[..])
    }
}

impl CommandLine {
    /// Splits the command and substitutes placeholders positionally.
    ///
    /// Substitution is plain token replacement; arguments are not escaped
    /// and must not contain whitespace.
    ///
    /// # Errors
    ///
    /// Fails when the command is empty, when a placeholder has no argument
    /// left, or when arguments remain unused.
    pub fn into_tokens(self, template_args: &[&str]) -> Result<Vec<String>, SessionError> {
        let tokens = match self {
            Self::Tokens(tokens) => {
                if !template_args.is_empty() {
                    return Err(SessionError::UnusedTemplateArguments {
                        unused: template_args.len(),
                    });
                }
                tokens
            }
            Self::Text(text) => {
                let mut args = template_args.iter();
                let mut tokens = Vec::new();
                for token in text.split_whitespace() {
                    if token == PLACEHOLDER {
                        let arg = args.next().ok_or_else(|| SessionError::MissingTemplateArgument {
                            command: text.clone(),
                            supplied: template_args.len(),
                        })?;
                        tokens.push((*arg).to_string());
                    } else {
                        tokens.push(token.to_string());
                    }
                }
                let unused = args.len();
                if unused > 0 {
                    return Err(SessionError::UnusedTemplateArguments { unused });
                }
                tokens
            }
        };
        if tokens.is_empty() {
            return Err(SessionError::EmptyCommand);
        }
        Ok(tokens)
    }
}

/// Makes `args` start with `entry`, inserting each missing element at its
/// position.
pub fn ensure_entry(args: &mut Vec<String>, entry: &[String]) {
    for (i, part) in entry.iter().enumerate() {
        if args.get(i) != Some(part) {
            args.insert(i, part.clone());
        }
    }
}
