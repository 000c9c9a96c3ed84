use tabled::Table;

use crate::{
    Res,
    cli::spinner,
    config::Settings,
    fip::HistoryClient,
    success, utils,
};

pub async fn history(settings: &Settings, from: Option<String>, count: usize) -> Res<()> {
    let from = match from {
        Some(value) => utils::parse_timestamp(&value)?,
        None => utils::default_from(),
    };

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

    println!("{}", Table::new(utils::track_table_rows(&tracks)));
    Ok(())
}
