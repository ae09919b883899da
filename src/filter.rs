//! Filter engine: AND-combined criteria over a lead slice.
//!
//! Text criteria use case-insensitive substring matching on trimmed input.
//! Blank text criteria are inactive. Size bounds are inclusive.

use crate::models::{FilterCriteria, Lead};

/// Returns the leads matching every active criterion, in their original order.
pub fn filter_leads(leads: &[Lead], criteria: &FilterCriteria) -> Vec<Lead> {
    let industry_q = normalize_query(criteria.industry.as_deref());
    let location_q = normalize_query(criteria.location.as_deref());

    let matched: Vec<Lead> = leads
        .iter()
        .filter(|lead| {
            let ok_size = within_bounds(lead.size, criteria.size_min, criteria.size_max);
            let ok_ind = text_matches(&lead.industry, industry_q.as_deref());
            let ok_loc = text_matches(&lead.location, location_q.as_deref());
            ok_size && ok_ind && ok_loc
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Filter matched {} of {} leads (industry={:?}, location={:?}, size={:?}..={:?})",
        matched.len(),
        leads.len(),
        industry_q,
        location_q,
        criteria.size_min,
        criteria.size_max
    );

    matched
}

fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
}

fn text_matches(field: &str, query: Option<&str>) -> bool {
    match query {
        Some(q) => field.to_lowercase().contains(q),
        None => true,
    }
}

fn within_bounds(size: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |min| size >= min) && max.map_or(true, |max| size <= max)
}
