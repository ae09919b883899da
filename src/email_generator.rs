//! Outreach email generation.
//!
//! Two paths, no state kept between calls:
//! 1. LLM attempt: one Groq call, only when a credential is configured
//! 2. Template: deterministic fill-in, taken when no credential is configured
//!    or when the attempt fails for any reason
//!
//! Callers always get an [`OutreachEmail`] back. LLM failures are logged and
//! recorded on the email, never returned.

use crate::config::Config;
use crate::errors::AppError;
use crate::groq_client::{parse_email_content, truncate, GroqClient, LlmEmail};
use crate::models::{EmailSource, Lead, OutreachEmail};
use serde_json::Value;
use std::time::Duration;

const MAX_FIELD_CHARS: usize = 200;
const DEFAULT_SUBJECT: &str = "Exploring a tailored approach";
const DEFAULT_TONE: &str = "consultative";

const SYSTEM_PROMPT: &str = "You are a professional B2B sales assistant. \
Return output as strict JSON only (no prose, no backticks). \
Schema: {\"company\":\"string\",\"subject\":\"string\",\"body\":\"string\",\"tone\":\"string\",\"wordCount\":number} \
All fields must always be present. Ensure body has 80-120 words.";

/// Signature block appended to every email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub sign_off: String,
    pub name: String,
    pub company: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            sign_off: "Warm Regards,".to_string(),
            name: name.into(),
            company: company.into(),
        }
    }

    fn block(&self) -> String {
        format!("{}\n{}\n{}", self.sign_off, self.name, self.company)
    }
}

#[derive(Clone)]
pub struct EmailGenerator {
    llm: Option<GroqClient>,
    signature: Signature,
}

impl EmailGenerator {
    /// Template-only generator.
    pub fn template_only(signature: Signature) -> Self {
        Self {
            llm: None,
            signature,
        }
    }

    pub fn with_client(client: GroqClient, signature: Signature) -> Self {
        Self {
            llm: Some(client),
            signature,
        }
    }

    /// Builds the generator from configuration.
    ///
    /// A missing credential, or a client that cannot be constructed, yields a
    /// template-only generator.
    pub fn from_config(config: &Config) -> Self {
        let signature = Signature::new(&config.sender_name, &config.sender_company);

        let Some(api_key) = config.groq_api_key.clone() else {
            tracing::info!("Email generator running in template-only mode");
            return Self::template_only(signature);
        };

        match GroqClient::new(
            config.groq_base_url.clone(),
            api_key,
            config.groq_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        ) {
            Ok(client) => {
                tracing::info!(
                    "✓ Groq client initialized: {} (model {})",
                    config.groq_base_url,
                    config.groq_model
                );
                Self::with_client(client, signature)
            }
            Err(e) => {
                tracing::error!("Failed to initialize Groq client: {}", e);
                Self::template_only(signature)
            }
        }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Generates an email for `lead`. Never fails.
    pub async fn generate(&self, lead: &Lead, insights: &[String]) -> OutreachEmail {
        let Some(client) = &self.llm else {
            return template_email(lead, insights, &self.signature);
        };

        match self.attempt_llm(client, lead, insights).await {
            Ok(email) => {
                tracing::info!("✓ Groq email generated for {}", lead.name);
                email
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Groq email failed for {}, using template: {}",
                    lead.name,
                    e
                );
                let mut email = template_email(lead, insights, &self.signature);
                email.error = Some(e.to_string());
                email
            }
        }
    }

    async fn attempt_llm(
        &self,
        client: &GroqClient,
        lead: &Lead,
        insights: &[String],
    ) -> Result<OutreachEmail, AppError> {
        let prompt = user_prompt(lead, insights, &self.signature);
        let content = client.chat_completion(SYSTEM_PROMPT, &prompt).await?;
        let parsed = parse_email_content(&content)?;
        llm_email_to_outreach(parsed, lead)
    }
}

fn user_prompt(lead: &Lead, insights: &[String], signature: &Signature) -> String {
    format!(
        "Company: {}\n\
         Website: {}\n\
         Industry: {}\n\
         Employees: {}\n\
         Insights:\n{}\n\n\
         Write a concise outreach email (80-120 words) in a consultative and professional tone. \
         The email should naturally reference the provided insights and be structured as a clear, \
         personalized message to the company. \
         Conclude the email with the following signature block:\n\n{}",
        lead.name,
        lead.website.as_deref().unwrap_or("n/a"),
        lead.industry,
        lead.size,
        insights.join("\n"),
        signature.block()
    )
}

fn llm_email_to_outreach(parsed: LlmEmail, lead: &Lead) -> Result<OutreachEmail, AppError> {
    let body = parsed
        .body
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::ExternalApiError("Groq email body was empty".to_string()))?;

    Ok(OutreachEmail {
        company: non_empty(parsed.company).unwrap_or_else(|| lead.name.clone()),
        subject: non_empty(parsed.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        body,
        tone: non_empty(parsed.tone).unwrap_or_else(|| DEFAULT_TONE.to_string()),
        word_count: parsed.word_count.as_ref().and_then(word_count_value),
        source: EmailSource::Groq,
        error: None,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn word_count_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        truncate(trimmed, MAX_FIELD_CHARS)
    }
}

/// Deterministic template email. Performs no I/O and cannot fail.
pub fn template_email(lead: &Lead, insights: &[String], signature: &Signature) -> OutreachEmail {
    let greeting_name = field_or(&lead.name, "there");
    let company = field_or(&lead.name, "your company");
    let industry = field_or(&lead.industry, "your industry");
    let bullets = crate::insights::summarize(insights);
    let noticed = if bullets.trim().is_empty() {
        "a growing team".to_string()
    } else {
        bullets
    };

    let body = format!(
        "Hi {greeting_name},\n\n\
         I came across your work at {company} and noticed: {noticed}. \
         We help teams like yours turn these priorities into measurable outcomes with a \
         lightweight rollout and clear ROI within a few weeks. \
         If it's useful, I can share a brief walkthrough tailored to {industry} and your \
         current team size of {size}.\n\n\
         {signature}",
        size = lead.size,
        signature = signature.block(),
    );

    let word_count = u32::try_from(body.split_whitespace().count()).ok();

    OutreachEmail {
        company: company.clone(),
        subject: format!(
            "{}: quick idea to accelerate {} goals",
            company,
            industry.to_lowercase()
        ),
        body,
        tone: DEFAULT_TONE.to_string(),
        word_count,
        source: EmailSource::Template,
        error: None,
    }
}
