//! Immutable in-memory lead dataset.
//!
//! Built once at startup and shared read-only between requests.

use crate::models::Lead;

/// Fixed, ordered collection of leads.
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
}

impl LeadStore {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads }
    }

    /// The mock seed companies.
    pub fn seed() -> Self {
        Self::new(vec![
            Lead::new("TechNova Solutions", "Software", "Bengaluru, IN", 120)
                .with_website("https://technova.example"),
            Lead::new(
                "GreenMakers Manufacturing",
                "Manufacturing",
                "Pune, IN",
                80,
            )
            .with_website("https://greenmakers.example"),
            Lead::new("AeroLogix Systems", "Logistics", "Hyderabad, IN", 210)
                .with_website("https://aerologix.example"),
        ])
    }

    /// All leads in insertion order.
    pub fn all_leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order_is_stable() {
        let store = LeadStore::seed();
        let first: Vec<&str> = store.all_leads().iter().map(|l| l.name.as_str()).collect();
        let second: Vec<&str> = store.all_leads().iter().map(|l| l.name.as_str()).collect();

        assert_eq!(
            first,
            vec![
                "TechNova Solutions",
                "GreenMakers Manufacturing",
                "AeroLogix Systems"
            ]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_carries_websites() {
        let store = LeadStore::seed();
        assert_eq!(store.len(), 3);
        assert!(store.all_leads().iter().all(|l| l.website.is_some()));
    }
}
