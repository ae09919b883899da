use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// ============ Lead Models ============

/// A prospective company subject to filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    /// Company name.
    #[serde(rename = "companyName")]
    pub name: String,
    /// Company website, carried through unchanged.
    #[serde(default)]
    pub website: Option<String>,
    /// Employee count.
    #[serde(rename = "employeeCount")]
    pub size: u32,
    /// Industry sector (e.g. "Software").
    pub industry: String,
    /// Free-form location (e.g. "Pune, IN").
    pub location: String,
}

impl Lead {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        location: impl Into<String>,
        size: u32,
    ) -> Self {
        Self {
            name: name.into(),
            website: None,
            size,
            industry: industry.into(),
            location: location.into(),
        }
    }

    /// Sets the website. A blank value leaves it unset.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        let website = website.into();
        self.website = (!website.trim().is_empty()).then_some(website);
        self
    }
}

// ============ Filter Models ============

/// One user query, already normalized.
///
/// Absent fields are unconstrained. Text matching is case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub industry: Option<String>,
    pub location: Option<String>,
    pub size_min: Option<u32>,
    pub size_max: Option<u32>,
}

impl FilterCriteria {
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn size_between(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.size_min = min;
        self.size_max = max;
        self
    }
}

/// Raw filter input from the HTML form (query string) or the JSON API.
///
/// Built from loose JSON so that no input shape is rejected. Size bounds accept
/// numbers or strings, text fields accept strings only. Anything else is ignored.
#[derive(Debug, Clone, Default, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FilterForm {
    pub industry: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = Option<u32>)]
    pub size_min: Option<u32>,
    #[schema(value_type = Option<u32>)]
    pub size_max: Option<u32>,
}

impl From<&Value> for FilterForm {
    fn from(raw: &Value) -> Self {
        Self {
            industry: first_field(raw, &["industry"]).and_then(text_field),
            location: first_field(raw, &["location"]).and_then(text_field),
            size_min: first_field(raw, &["sizeMin", "size_min"]).and_then(parse_bound),
            size_max: first_field(raw, &["sizeMax", "size_max"]).and_then(parse_bound),
        }
    }
}

impl FilterForm {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            industry: non_blank(self.industry),
            location: non_blank(self.location),
            size_min: self.size_min,
            size_max: self.size_max,
        }
    }

    /// Re-encodes the form as a query string, used for the CSV download link.
    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(industry) = self.industry.as_deref().filter(|s| !s.trim().is_empty()) {
            query.append_pair("industry", industry);
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.trim().is_empty()) {
            query.append_pair("location", location);
        }
        if let Some(min) = self.size_min {
            query.append_pair("size_min", &min.to_string());
        }
        if let Some(max) = self.size_max {
            query.append_pair("size_max", &max.to_string());
        }
        query.finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| raw.get(*key))
}

fn text_field(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Parses a size bound from a JSON number or string.
///
/// Blank and non-numeric input yields `None`. Negatives clamp to 0, values past
/// `u32::MAX` clamp to `u32::MAX`, fractions truncate.
pub fn parse_bound(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }

    Some(number.trunc().clamp(0.0, u32::MAX as f64) as u32)
}

// ============ Email Models ============

/// Which path produced an outreach email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmailSource {
    Groq,
    Template,
}

impl EmailSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailSource::Groq => "groq",
            EmailSource::Template => "template",
        }
    }
}

/// Outreach email generated for one lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutreachEmail {
    pub company: String,
    pub subject: String,
    pub body: String,
    pub tone: String,
    pub word_count: Option<u32>,
    pub source: EmailSource,
    /// Swallowed LLM failure, if the template path was taken after an attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============ Pipeline Models ============

/// A lead plus its generated insight and email. Never stored.
#[derive(Debug, Clone)]
pub struct EnrichedLead {
    pub lead: Lead,
    pub insights: Vec<String>,
    /// Insight bullets joined into one line.
    pub insight: String,
    pub email: OutreachEmail,
}

/// Response payload for the JSON generate endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Identifier of this pipeline run, for log correlation.
    #[schema(value_type = String)]
    pub run_id: uuid::Uuid,
    pub count: usize,
    pub results: Vec<crate::export::ResultRow>,
    /// First result as a key/value object, if any.
    #[schema(value_type = Option<Object>)]
    pub sample: Option<Value>,
}
