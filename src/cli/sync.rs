use log::debug;

use crate::{
    Res,
    cli::spinner,
    config::Settings,
    fip::HistoryClient,
    info,
    management::CredentialsManager,
    success, tidal, utils, warning,
};

pub async fn sync(
    settings: &Settings,
    from: Option<String>,
    count: usize,
    name: Option<String>,
) -> Res<()> {
    let from = match from {
        Some(value) => utils::parse_timestamp(&value)?,
        None => utils::default_from(),
    };
    let playlist_name =
        name.unwrap_or_else(|| utils::default_playlist_name(&settings.source.station_name, from));

    let credentials = CredentialsManager::load(&settings.credentials_path).await?;
    let accounts = credentials.tidal_accounts();
    if accounts.is_empty() {
        return Err(format!(
            "No Tidal account found in {}",
            credentials.path().display()
        )
        .into());
    }

    let client = HistoryClient::new(settings.source.clone());
    let pb = spinner(format!(
        "Fetching {} tracks from {}...",
        count, settings.source.station_name
    ));
    let result = client.fetch_history(from, count).await;
    pb.finish_and_clear();
    let tracks = result?;
    success!(
        "Fetched {} tracks aired on {}",
        tracks.len(),
        settings.source.station_name
    );

    info!(
        "Creating playlist {:?} on {} Tidal account(s)",
        playlist_name,
        accounts.len()
    );
    let outcomes = tidal::sync_accounts(
        &settings.destination,
        accounts,
        &playlist_name,
        &tracks,
        |account, added| debug!("{}: {} track(s) appended", account.username, added),
    )
    .await?;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => success!(
                "{}: added {}/{} unique tracks to {} ({} without match)",
                outcome.username,
                report.added,
                report.unique,
                report.playlist_uuid,
                report.not_found
            ),
            Err(e) => {
                failed += 1;
                warning!("{}: {}", outcome.username, e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{}/{} account(s) failed", failed, outcomes.len()).into());
    }

    Ok(())
}
