//! Deterministic insight bullets derived from a lead's industry, size and location.

use crate::models::Lead;
use regex::Regex;
use std::sync::LazyLock;

const MAX_BULLETS: usize = 3;
const MID_MARKET_THRESHOLD: u32 = 150;

static SOFTWARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)software").expect("valid software regex"));
static MANUFACTURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)manufact").expect("valid manufacturing regex"));
static LOGISTICS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)logistic").expect("valid logistics regex"));
static INDIA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bIN\b|India").expect("valid location regex"));

/// Insight bullets for a lead, at most three.
pub fn insight_bullets(lead: &Lead) -> Vec<String> {
    let mut bullets: Vec<&str> = Vec::new();

    if SOFTWARE.is_match(&lead.industry) {
        bullets.extend([
            "SaaS roadmap includes AI/ML modules",
            "Active in developer ecosystem; likely uses CI/CD",
        ]);
    } else if MANUFACTURING.is_match(&lead.industry) {
        bullets.extend([
            "Sustainable, lean operations focus",
            "Potential need for shop-floor IoT/SCADA integrations",
        ]);
    } else if LOGISTICS.is_match(&lead.industry) {
        bullets.extend([
            "Fleet optimization & real-time tracking",
            "Likely evaluating warehouse automation",
        ]);
    } else {
        bullets.push("Expanding digital footprint");
    }

    if lead.size > MID_MARKET_THRESHOLD {
        bullets.push("Mid-market team with scaling pains");
    }

    if INDIA.is_match(&lead.location) {
        bullets.push("Operating in India with regional growth");
    }

    bullets
        .into_iter()
        .take(MAX_BULLETS)
        .map(str::to_string)
        .collect()
}

/// Joins bullets into the single-line insight used in emails and exports.
pub fn summarize(bullets: &[String]) -> String {
    bullets.join("; ")
}

/// Single-line insight for a lead.
pub fn generate_insight(lead: &Lead) -> String {
    summarize(&insight_bullets(lead))
}
