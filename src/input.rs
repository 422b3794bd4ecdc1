//! Loading page results produced elsewhere for `allyscan aggregate`.

use crate::error::InputError;
use crate::models::PageResult;
use std::fs;
use std::path::Path;

/// Read a JSON array of page results and check each page's counters.
pub fn load_pages(path: &Path) -> Result<Vec<PageResult>, InputError> {
    let data = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pages: Vec<PageResult> = serde_json::from_str(&data).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for page in &pages {
        page.validate()?;
    }
    Ok(pages)
}
