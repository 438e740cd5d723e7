use std::path::Path;

use common::{is_cover_file, Cover};
use tracing::{info, warn};

use crate::data_from_file;
use crate::paths::list_dir;

/// Loads the first image in `dir`, in listing order.
///
/// Pass the listing when the caller already has one; otherwise the directory
/// is read here. Every failure yields `None`.
pub fn album_cover(dir: &Path, listing: Option<&[String]>) -> Option<Cover> {
    let owned;
    let files = match listing {
        Some(files) => files,
        None => match list_dir(dir) {
            Ok(files) => {
                owned = files;
                owned.as_slice()
            }
            Err(err) => {
                warn!("Error reading album directory {:?}: {}", dir, err);
                return None;
            }
        },
    };

    let name = match files.iter().find(|file| is_cover_file(file)) {
        Some(name) => name,
        None => {
            info!("No cover image found in {:?}", dir);
            return None;
        }
    };

    let path = dir.join(name);
    match data_from_file(&path) {
        Ok(data) => {
            let mime = mime_guess::from_path(&path)
                .first_raw()
                .map(|value| value.to_string());
            Some(Cover::new(data, mime))
        }
        Err(err) => {
            warn!("Error reading cover image {:?}: {}", path, err);
            None
        }
    }
}
