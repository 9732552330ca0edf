use anyhow::Result;

use wilo::config::WiloConfig;
use wilo::tracker::search::{search as search_records, SearchFilter};
use wilo::tracker::types::MarkerType;

/// Run a substring search from the terminal.
pub fn search(
    config: &WiloConfig,
    query: &str,
    marker_type: Option<MarkerType>,
    pinned_only: bool,
) -> Result<()> {
    let conn = super::open(config)?;
    let filter = SearchFilter {
        marker_type,
        pinned_only,
    };
    let results = search_records(&conn, query, &filter)?;

    if results.total() == 0 {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.total());
    if !results.markers.is_empty() {
        println!("Markers");
        super::print_markers(&results.markers);
    }
    if !results.rhythms.is_empty() {
        println!("Rhythms");
        super::print_rhythms(&results.rhythms);
    }
    Ok(())
}
