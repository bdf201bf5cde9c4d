use crate::commands::{connect_with_session, require_admin};
use crate::display::users_table;
use crate::error::Result;

pub async fn cmd_users_ls() -> Result<()> {
    let (_config, api, _session) = connect_with_session().await?;

    let users = api.users().await?;
    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!("{}", users_table(&users));
    Ok(())
}

pub async fn cmd_whoami() -> Result<()> {
    let (_config, _api, session) = connect_with_session().await?;

    println!("{} ({})", session.user.name, session.user.id);
    println!("Role:   {}", session.user.role);
    println!("Region: {}", session.user.location);
    Ok(())
}

/// Platform totals, fetched concurrently.
pub async fn cmd_stats() -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;

    let (events, polls, users) =
        futures::try_join!(api.event_count(), api.poll_count(), api.user_count())?;

    println!("Events: {events}");
    println!("Polls:  {polls}");
    println!("Users:  {users}");
    Ok(())
}
