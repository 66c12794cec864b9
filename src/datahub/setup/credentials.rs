use std::io::{self, BufRead, Write};

use crate::datahub::setup::error::Result;

/// A username/password pair obtained at runtime. Never persisted and never
/// logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Source of runtime credentials.
///
/// The database and SMTP gateways take this as a seam so tests and
/// non-interactive callers can inject fixed values instead of blocking on
/// an operator prompt.
pub trait CredentialSource {
    /// Obtains a username and password for the named realm.
    fn username_password(&self, realm: &str) -> Result<Credentials>;

    /// Obtains only a password for the named realm, for endpoints whose
    /// account name is already known.
    fn password_only(&self, realm: &str) -> Result<String>;
}

/// Interactive prompt on the operator's terminal: the username is read
/// visibly from stdin, the password is read masked and never echoed.
/// Suspends for operator input with no timeout.
pub struct TerminalPrompt;

impl CredentialSource for TerminalPrompt {
    fn username_password(&self, realm: &str) -> Result<Credentials> {
        print!("{realm} username: ");
        io::stdout().flush()?;
        let mut username = String::new();
        io::stdin().lock().read_line(&mut username)?;
        let password = rpassword::prompt_password(format!("{realm} password: "))?;
        Ok(Credentials {
            username: username.trim().to_string(),
            password,
        })
    }

    fn password_only(&self, realm: &str) -> Result<String> {
        Ok(rpassword::prompt_password(format!("{realm} password: "))?)
    }
}

/// Fixed credentials for tests and non-interactive use.
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn username_password(&self, _realm: &str) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }

    fn password_only(&self, _realm: &str) -> Result<String> {
        Ok(self.credentials.password.clone())
    }
}
