//! LeadGen AI Flow Library
//!
//! Filters a fixed set of mock company leads, attaches deterministic insights,
//! writes an outreach email per lead (Groq LLM with a template fallback) and
//! renders the results as HTML, CSV and JSON.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `email_generator`: LLM-or-template outreach emails.
//! - `errors`: Error handling types.
//! - `export`: Result rows, CSV export and JSON preview.
//! - `filter`: Filter engine.
//! - `groq_client`: Groq chat completions client.
//! - `handlers`: HTTP request handlers.
//! - `insights`: Insight generator.
//! - `lead_store`: Immutable lead dataset.
//! - `models`: Core data models.
//! - `openapi`: OpenAPI document and Swagger UI page.
//! - `pages`: Server-rendered HTML.
//! - `pipeline`: Filter → insight → email workflow.
//! - `routes`: Router assembly.

pub mod config;
pub mod email_generator;
pub mod errors;
pub mod export;
pub mod filter;
pub mod groq_client;
pub mod handlers;
pub mod insights;
pub mod lead_store;
pub mod models;
pub mod openapi;
pub mod pages;
pub mod pipeline;
pub mod routes;
