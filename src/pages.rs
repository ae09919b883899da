//! Server-rendered HTML for the interactive form and results.

use crate::export::ResultRow;
use crate::models::{FilterForm, Lead};
use serde_json::Value;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; display: flex; }
    aside { width: 260px; padding: 1.5rem; background: #f4f5f7; min-height: 100vh; }
    main { flex: 1; padding: 1.5rem; overflow-x: auto; }
    label { display: block; margin-top: .75rem; font-size: .9rem; }
    input { width: 100%; padding: .35rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: .5rem 1rem; }
    table { border-collapse: collapse; font-size: .85rem; }
    th, td { border: 1px solid #d0d4da; padding: .4rem; vertical-align: top; text-align: left; }
    td { white-space: pre-wrap; }
    .ok { color: #1b7f3b; } .warn { color: #a35b00; }
    pre { background: #f4f5f7; padding: 1rem; }
"#;

/// Escapes text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(sidebar: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LeadGen AI Flow</title>
    <style>{STYLE}</style>
</head>
<body>
<aside>{sidebar}</aside>
<main>
<h1>📧 LeadGen AI Flow</h1>
{content}
</main>
</body>
</html>"#
    )
}

fn sidebar(form: &FilterForm, llm_enabled: bool) -> String {
    let value = |v: &Option<String>| escape_html(v.as_deref().unwrap_or(""));
    let number = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();

    let status = if llm_enabled {
        r#"<p class="ok">🔑 GROQ_API_KEY loaded</p>"#
    } else {
        r#"<p class="warn">⚠️ No GROQ_API_KEY found, template fallback will be used</p>"#
    };

    format!(
        r#"<h2>Filters</h2>
<form method="get" action="/results">
    <label>Industry contains <input name="industry" value="{industry}"></label>
    <label>Location contains <input name="location" value="{location}"></label>
    <label>Min employees <input name="size_min" inputmode="numeric" value="{size_min}"></label>
    <label>Max employees <input name="size_max" inputmode="numeric" value="{size_max}"></label>
    <button type="submit">Run</button>
</form>
<hr>
<h2>Status</h2>
{status}"#,
        industry = value(&form.industry),
        location = value(&form.location),
        size_min = number(form.size_min),
        size_max = number(form.size_max),
    )
}

fn table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn seed_table(leads: &[Lead]) -> String {
    table(
        &["companyName", "website", "employeeCount", "industry", "location"],
        leads.iter().map(|lead| {
            vec![
                lead.name.clone(),
                lead.website.clone().unwrap_or_default(),
                lead.size.to_string(),
                lead.industry.clone(),
                lead.location.clone(),
            ]
        }),
    )
}

/// Landing page: form, key status and the seed companies.
pub fn render_index(form: &FilterForm, llm_enabled: bool, seed: &[Lead]) -> String {
    let content = format!("<h2>Seed Companies</h2>\n{}", seed_table(seed));
    layout(&sidebar(form, llm_enabled), &content)
}

/// Results page: results table, CSV link and the sample JSON.
pub fn render_results(
    form: &FilterForm,
    llm_enabled: bool,
    seed: &[Lead],
    rows: &[ResultRow],
    sample: Option<&Value>,
) -> String {
    let mut content = format!("<h2>Seed Companies</h2>\n{}\n", seed_table(seed));

    if rows.is_empty() {
        content.push_str(
            r#"<p class="warn">No companies matched your filters. Try loosening them.</p>"#,
        );
        return layout(&sidebar(form, llm_enabled), &content);
    }

    content.push_str("<h2>Results</h2>\n");
    content.push_str(&table(
        &ResultRow::HEADERS,
        rows.iter().map(|row| row.cells().to_vec()),
    ));

    let query = form.to_query_string();
    let href = if query.is_empty() {
        "/api/v1/leads/export.csv".to_string()
    } else {
        format!("/api/v1/leads/export.csv?{}", query)
    };
    content.push_str(&format!(
        "\n<p><a href=\"{}\" download>⬇️ Download CSV</a></p>\n",
        escape_html(&href)
    ));

    if let Some(sample) = sample {
        let pretty = serde_json::to_string_pretty(sample).unwrap_or_default();
        content.push_str(&format!(
            "<p><strong>Sample JSON (first item)</strong></p>\n<pre><code>{}</code></pre>\n",
            escape_html(&pretty)
        ));
    }

    layout(&sidebar(form, llm_enabled), &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_index_shows_template_warning_and_seed() {
        let seed = vec![Lead::new("Acme <Corp>", "Software", "NY", 50)];
        let html = render_index(&FilterForm::default(), false, &seed);

        assert!(html.contains("template fallback will be used"));
        assert!(html.contains("Acme &lt;Corp&gt;"));
        assert!(!html.contains("Acme <Corp>"));
    }

    #[test]
    fn test_results_without_rows_shows_notice() {
        let html = render_results(&FilterForm::default(), true, &[], &[], None);
        assert!(html.contains("No companies matched your filters"));
        assert!(html.contains("GROQ_API_KEY loaded"));
        assert!(!html.contains("Download CSV"));
    }

    #[test]
    fn test_form_values_are_echoed() {
        let form = FilterForm {
            industry: Some("soft\"ware".to_string()),
            location: None,
            size_min: Some(10),
            size_max: None,
        };
        let html = render_index(&form, false, &[]);
        assert!(html.contains(r#"name="industry" value="soft&quot;ware""#));
        assert!(html.contains(r#"name="size_min" inputmode="numeric" value="10""#));
    }
}
