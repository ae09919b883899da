/// Lead generation workflow shared by the HTML and JSON handlers
///
/// 1. Filter the lead store
/// 2. Derive insights per matching lead
/// 3. Generate an outreach email per matching lead
///
/// Leads are processed one at a time, in store order.
use crate::email_generator::EmailGenerator;
use crate::filter::filter_leads;
use crate::insights::{insight_bullets, summarize};
use crate::lead_store::LeadStore;
use crate::models::{EmailSource, EnrichedLead, FilterCriteria};
use uuid::Uuid;

/// Runs the full pipeline for one query.
pub async fn run_pipeline(
    store: &LeadStore,
    criteria: &FilterCriteria,
    generator: &EmailGenerator,
) -> Vec<EnrichedLead> {
    let run_id = Uuid::new_v4();
    run_pipeline_with_id(run_id, store, criteria, generator).await
}

/// Same as [`run_pipeline`] but with a caller-supplied run id for log correlation.
pub async fn run_pipeline_with_id(
    run_id: Uuid,
    store: &LeadStore,
    criteria: &FilterCriteria,
    generator: &EmailGenerator,
) -> Vec<EnrichedLead> {
    tracing::info!("Starting lead pipeline run_id={} criteria={:?}", run_id, criteria);

    // Step 1: Filter
    let matched = filter_leads(store.all_leads(), criteria);
    if matched.is_empty() {
        tracing::info!("run_id={}: no leads matched", run_id);
        return Vec::new();
    }

    // Steps 2-3: Insight, then email, per lead
    let mut enriched = Vec::with_capacity(matched.len());
    for lead in matched {
        let insights = insight_bullets(&lead);
        let insight = summarize(&insights);
        let email = generator.generate(&lead, &insights).await;
        enriched.push(EnrichedLead {
            lead,
            insights,
            insight,
            email,
        });
    }

    let from_llm = enriched
        .iter()
        .filter(|e| e.email.source == EmailSource::Groq)
        .count();
    tracing::info!(
        "run_id={}: enriched {} lead(s), {} via Groq, {} via template",
        run_id,
        enriched.len(),
        from_llm,
        enriched.len() - from_llm
    );

    enriched
}
