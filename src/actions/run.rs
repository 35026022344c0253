use crate::{
    client::ApiClient,
    output::{write_results, OutputError},
    settings::Settings,
    transport::Transport,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const RACKS_FILE: &str = "racks";
pub const RACK_CONTENTS_FILE: &str = "rackContents";
pub const RACK_FILE: &str = "rack";

/// One pass over the API in the client's format.
///
/// Logs in, saves the rack collection, then the contents and the details of
/// the first rack in it. Stops early when there is no collection or it has
/// no rack. Returns the files that were written.
pub fn run_format<T: Transport>(
    client: &ApiClient<T>,
    settings: &mut Settings,
    output_directory: &Path,
) -> Result<Vec<PathBuf>, OutputError> {
    let extension = client.format().extension();
    let file_name = |stem: &str| format!("{}.{}", stem, extension);
    let mut written = Vec::new();

    if !client.login(settings) {
        warn!("Not logged in, continuing without a token");
    }

    let collection = client.retrieve_rack_collection(settings);
    written.extend(write_results(
        output_directory,
        &file_name(RACKS_FILE),
        collection.as_ref(),
    )?);

    let Some(collection) = collection else {
        return Ok(written);
    };
    let Some(rack_id) = client.first_asset_id(&collection) else {
        info!("The rack collection is empty, nothing more to retrieve");
        return Ok(written);
    };

    let contents = client.retrieve_rack_contents(settings, &rack_id);
    written.extend(write_results(
        output_directory,
        &file_name(RACK_CONTENTS_FILE),
        contents.as_ref(),
    )?);

    let rack = client.retrieve_asset(settings, &rack_id);
    written.extend(write_results(
        output_directory,
        &file_name(RACK_FILE),
        rack.as_ref(),
    )?);

    Ok(written)
}
