//! Plain-text rendering of the search view.

use std::io::{self, Write};

use scout_search::state::SearchState;

/// Write a listing of `state`. `is_favorite` marks favorited uuids.
pub fn render_state(
    out: &mut impl Write,
    state: &SearchState,
    is_favorite: impl Fn(&str) -> bool,
) -> io::Result<()> {
    if let Some(error) = &state.error {
        writeln!(out, "error: {error}")?;
    }
    let results = &state.results;
    if state.degraded {
        if results.assets.is_empty() {
            writeln!(out, "The catalog could not be reached; showing no results.")?;
            return Ok(());
        }
        writeln!(out, "The catalog could not be reached; showing earlier results.")?;
    } else if results.assets.is_empty() {
        if state.error.is_none() {
            writeln!(out, "No results.")?;
        }
        return Ok(());
    }

    writeln!(
        out,
        "{} of {} results (page {} of {})",
        results.assets.len(),
        results.total,
        results.current_page,
        results.total_pages
    )?;
    for (i, asset) in results.assets.iter().enumerate() {
        let star = if is_favorite(&asset.uuid) { '*' } else { ' ' };
        let price = if asset.is_premium { "premium" } else { "free" };
        writeln!(
            out,
            "{star}{:>3}. {} [{} / {}] {price} {} {}",
            i + 1,
            asset.title,
            asset.asset_type.name,
            asset.category.name,
            asset.format.as_str(),
            asset.image_url,
        )?;
    }
    if results.has_more {
        writeln!(out, "More results available.")?;
    }
    Ok(())
}
