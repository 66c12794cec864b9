use oracle::Connection;
use oracle::sql_type::ToSql;
use tracing::debug;

use crate::datahub::setup::config::Config;
use crate::datahub::setup::credentials::CredentialSource;
use crate::datahub::setup::error::Result;

/// A single value bound into a statement placeholder.
///
/// Statement text carries positional placeholders only; values always
/// travel as binds, never interpolated into the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// A text value.
    Text(String),
    /// An explicit SQL NULL.
    Null,
}

/// One executable statement: PL/SQL (or query) text with positional
/// placeholders `:1..:n` and the values bound to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub binds: Vec<BindValue>,
}

impl Statement {
    pub fn new(text: impl Into<String>, binds: Vec<BindValue>) -> Self {
        Self {
            text: text.into(),
            binds,
        }
    }

    /// Whether the statement text is a query whose rows should be fetched,
    /// rather than a side-effecting call.
    pub fn is_query(&self) -> bool {
        self.text.to_ascii_uppercase().contains("SELECT")
    }
}

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// A side-effecting call completed; no rows were produced.
    Done,
    /// A query completed; every row was fetched, cells as nullable text.
    Rows(Vec<Vec<Option<String>>>),
}

/// Executes statements against the archive's account-management database.
///
/// A trait seam so orchestration code and tests can run against a stub
/// that records statements instead of a live database.
pub trait Gateway {
    fn execute(&mut self, statement: &Statement) -> Result<ExecuteOutcome>;
}

/// Gateway backed by the Oracle driver.
///
/// Each `execute` call owns a full connection lifecycle: obtain
/// credentials, connect, run the one statement, close. Invocations are
/// infrequent and operator-triggered, so there is no pooling, reuse, or
/// retry, and a failed call aborts the invocation.
pub struct OracleGateway {
    host: String,
    port: u16,
    service: String,
    credentials: Box<dyn CredentialSource>,
}

impl OracleGateway {
    pub fn new(config: &Config, credentials: Box<dyn CredentialSource>) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            service: config.service.clone(),
            credentials,
        }
    }

    fn connect_string(&self) -> String {
        format!("//{}:{}/{}", self.host, self.port, self.service)
    }
}

impl Gateway for OracleGateway {
    fn execute(&mut self, statement: &Statement) -> Result<ExecuteOutcome> {
        let credentials = self.credentials.username_password("database")?;
        let connection = Connection::connect(
            &credentials.username,
            &credentials.password,
            self.connect_string(),
        )?;
        debug!(statement = %statement.text, "executing statement");

        let params = bind_params(&statement.binds);
        let outcome = if statement.is_query() {
            let mut table = Vec::new();
            for row in connection.query(&statement.text, &params)? {
                let row = row?;
                let mut cells = Vec::with_capacity(row.sql_values().len());
                for index in 0..row.sql_values().len() {
                    cells.push(row.get::<usize, Option<String>>(index)?);
                }
                table.push(cells);
            }
            ExecuteOutcome::Rows(table)
        } else {
            connection.execute(&statement.text, &params)?;
            ExecuteOutcome::Done
        };

        connection.close()?;
        Ok(outcome)
    }
}

static NULL_BIND: Option<String> = None;

fn bind_params(binds: &[BindValue]) -> Vec<&dyn ToSql> {
    binds
        .iter()
        .map(|bind| match bind {
            BindValue::Text(value) => value as &dyn ToSql,
            BindValue::Null => &NULL_BIND as &dyn ToSql,
        })
        .collect()
}
