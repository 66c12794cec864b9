//! Core library for the datahub-setup command line tool.
//!
//! The library exposes the components that power the command-line
//! interface as well as the integration tests. The modules are structured
//! to keep responsibilities narrow and composable: settings loading lives
//! in [`datahub::setup::config`], the spreadsheet reader under
//! [`datahub::setup::io`], the tabular model in [`datahub::setup::model`],
//! hub assignment and SQL construction in [`datahub::setup::assign`], the
//! database gateway in [`datahub::setup::gateway`], and credential
//! notification in [`datahub::setup::notify`].

pub mod datahub;

pub use datahub::setup::{
    Result, SetupError, assign, config, credentials, error, gateway, io, model, notify,
};
