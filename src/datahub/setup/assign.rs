//! Data hub assignment: extracts hub metadata and Webin accounts from the
//! setup spreadsheet, builds the two stored-procedure calls, and executes
//! them through a [`Gateway`].
//!
//! # Spreadsheet template contract
//!
//! The layout below is an explicit agreement with the setup spreadsheet
//! template; extraction fails fast when it is not met instead of silently
//! reading the wrong cell.
//!
//! * Sheet [`GENERAL_SHEET`] lists one field per row, with the label in
//!   the [`FIELD_COLUMN`] column and its text in the [`VALUE_COLUMN`]
//!   column. The labels [`DESCRIPTION_FIELD`] and [`ABSTRACT_FIELD`] are
//!   required.
//! * Sheet [`PROVIDERS_SHEET`] carries one Webin account id per row in
//!   the [`ACCOUNT_COLUMN`] column.

use std::collections::BTreeSet;

use tracing::{info, instrument, warn};

use crate::datahub::setup::error::{Result, SetupError};
use crate::datahub::setup::gateway::{BindValue, Gateway, Statement};
use crate::datahub::setup::model::{Document, Sheet};

/// Sheet holding general data hub information.
pub const GENERAL_SHEET: &str = "General";
/// Label column of the general sheet.
pub const FIELD_COLUMN: &str = "Field";
/// Value column of the general sheet.
pub const VALUE_COLUMN: &str = "Value";
/// Label of the row holding the data hub description.
pub const DESCRIPTION_FIELD: &str = "Description";
/// Label of the row holding the data hub abstract.
pub const ABSTRACT_FIELD: &str = "Abstract";
/// Sheet listing the data providers and their Webin accounts.
pub const PROVIDERS_SHEET: &str = "Data_Providers";
/// Column of the providers sheet holding Webin account ids.
pub const ACCOUNT_COLUMN: &str = "Webin Account";

/// Status under which a newly registered data hub is created.
const HUB_STATUS: &str = "ACTIVE";

/// The data hub to be assigned: an externally allocated name and its
/// password. Neither value is format-validated; both come straight from
/// the operator.
#[derive(Debug, Clone)]
pub struct HubRequest {
    pub name: String,
    pub password: String,
}

/// General data hub information extracted from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubInfo {
    pub description: String,
    pub abstract_: String,
}

/// Reads the data hub description and abstract from the general sheet.
pub fn extract_hub_info(document: &Document) -> Result<HubInfo> {
    let sheet = general_sheet(document)?;
    Ok(HubInfo {
        description: labelled_field(sheet, DESCRIPTION_FIELD)?,
        abstract_: labelled_field(sheet, ABSTRACT_FIELD)?,
    })
}

fn general_sheet(document: &Document) -> Result<&Sheet> {
    document
        .sheet(GENERAL_SHEET)
        .ok_or_else(|| SetupError::MissingSheet(GENERAL_SHEET.to_string()))
}

fn labelled_field(sheet: &Sheet, label: &str) -> Result<String> {
    let field_index = column_index(sheet, FIELD_COLUMN)?;
    let value_index = column_index(sheet, VALUE_COLUMN)?;
    sheet
        .labelled_value(field_index, value_index, label)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| SetupError::MissingField {
            sheet: sheet.name.clone(),
            field: label.to_string(),
        })
}

fn column_index(sheet: &Sheet, column: &str) -> Result<usize> {
    sheet
        .column_index(column)
        .ok_or_else(|| SetupError::MissingColumn {
            sheet: sheet.name.clone(),
            column: column.to_string(),
        })
}

/// Builds the stored-procedure call registering the data hub as ACTIVE
/// under the owning Webin account. The trailing argument of the procedure
/// is always NULL.
pub fn build_assign_statement(request: &HubRequest, owner: &str, info: &HubInfo) -> Statement {
    let text = "begin\n\tera.PORTAL_DCC_PKG.add_dcc_account(:1, :2, :3, :4, :5, :6, :7);\nend;\n";
    let binds = vec![
        BindValue::Text(request.name.clone()),
        BindValue::Text(request.password.clone()),
        BindValue::Text(owner.to_string()),
        BindValue::Text(info.description.clone()),
        BindValue::Text(info.abstract_.clone()),
        BindValue::Text(HUB_STATUS.to_string()),
        BindValue::Null,
    ];
    Statement::new(text, binds)
}

/// Collects all Webin account ids listed by the data providers,
/// deduplicated, with stable iteration order.
pub fn extract_account_set(document: &Document) -> Result<BTreeSet<String>> {
    let sheet = document
        .sheet(PROVIDERS_SHEET)
        .ok_or_else(|| SetupError::MissingSheet(PROVIDERS_SHEET.to_string()))?;
    let accounts = sheet
        .column(ACCOUNT_COLUMN)
        .ok_or_else(|| SetupError::MissingColumn {
            sheet: sheet.name.clone(),
            column: ACCOUNT_COLUMN.to_string(),
        })?
        .map(str::to_string)
        .collect();
    Ok(accounts)
}

/// Builds one batched PL/SQL block linking every account to the data hub,
/// one stored-procedure call per account.
pub fn build_link_statement(accounts: &BTreeSet<String>, hub: &str) -> Statement {
    let mut text = String::from("begin\n");
    let mut binds = Vec::with_capacity(accounts.len() * 2);
    for (index, account) in accounts.iter().enumerate() {
        let account_bind = index * 2 + 1;
        let hub_bind = index * 2 + 2;
        text.push_str(&format!(
            "\tera.PORTAL_DCC_PKG.add_dcc_to_submission_account(:{account_bind}, :{hub_bind});\n"
        ));
        binds.push(BindValue::Text(account.clone()));
        binds.push(BindValue::Text(hub.to_string()));
    }
    text.push_str("end;\n");
    Statement::new(text, binds)
}

/// Assigns the data hub, then links its Webin accounts: extract, build,
/// and execute each step in sequence.
///
/// There is no rollback. If linking fails after the hub was created, the
/// hub is left registered with zero linked accounts; the operator re-runs
/// the linking step. Running the whole assignment twice double-submits.
#[instrument(level = "info", skip_all, fields(hub = %request.name))]
pub fn run(
    document: &Document,
    request: &HubRequest,
    owner: &str,
    gateway: &mut dyn Gateway,
) -> Result<()> {
    let info = extract_hub_info(document)?;
    info!(
        description = %info.description,
        abstract_ = %info.abstract_,
        "assigning data hub"
    );
    let assign = build_assign_statement(request, owner, &info);
    gateway.execute(&assign)?;
    info!("data hub registered");

    let accounts = extract_account_set(document)?;
    if accounts.is_empty() {
        warn!("no Webin accounts listed; data hub left without linked accounts");
        return Ok(());
    }
    let link = build_link_statement(&accounts, &request.name);
    if let Err(error) = gateway.execute(&link) {
        warn!(
            %error,
            "account linking failed after hub creation; data hub exists with no linked accounts"
        );
        return Err(error);
    }
    info!(account_count = accounts.len(), "linked Webin accounts to data hub");
    Ok(())
}
