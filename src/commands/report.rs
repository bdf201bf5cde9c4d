use crate::commands::{connect_with_session, print_success, require_admin};
use crate::display::reports_table;
use crate::error::{BrightError, Result};
use crate::types::ReportKind;

/// File a report against an event or a poll.
pub async fn cmd_report(kind: ReportKind, target_id: &str, text: &str) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BrightError::Validation(
            "Please fill in a reason for the report.".to_string(),
        ));
    }

    let (_config, api, session) = connect_with_session().await?;
    api.report(kind, target_id, &session.user.id, trimmed).await?;
    print_success("Report successfully submitted!");
    Ok(())
}

pub async fn cmd_reports_ls() -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;

    let reports = api.reports().await?;
    if reports.is_empty() {
        println!("No reports.");
        return Ok(());
    }

    println!("{}", reports_table(&reports));
    Ok(())
}

pub async fn cmd_report_rm(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;

    api.delete_report(id).await?;
    print_success("Report was deleted successfully!");
    Ok(())
}
