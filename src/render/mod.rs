//! HTML pages for the browser-facing routes.
//!
//! Rendering is a pure function of the query, the result sequence, and
//! the configured field mapping. Every piece of record text goes
//! through [`escape_html`].

use crate::models::{DisplayField, FieldNames, Record};
use crate::search::SearchOutcome;

const TITLE: &str = "Natlas";

const STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: ui-serif, Georgia, Cambria, 'Times New Roman', serif; \
background: linear-gradient(25deg, #1e1e1e 0%, #ababab 100%); min-height: 100vh; padding: 40px 20px; }
.container { max-width: 900px; margin: 0 auto; background: white; border-radius: 20px; padding: 40px; }
.header { text-align: center; color: white; margin-bottom: 30px; }
.subtitle, .info { color: #949494; }
input[type='text'] { width: 100%; padding: 18px 24px; font-size: 1.1em; border: 2px solid #e2e8f0; border-radius: 12px; margin: 20px 0; }
button { width: 100%; padding: 18px; font-size: 1.1em; color: white; background: #1e1e1e; border: none; border-radius: 12px; cursor: pointer; }
.country-name { font-size: 2em; margin-bottom: 20px; padding-bottom: 15px; border-bottom: 3px solid #4c4c4c; }
.field { margin-bottom: 15px; padding: 15px; background: #f7fafc; border-radius: 8px; border-left: 4px solid #a6a6a6; }
.field-label { font-weight: 600; font-size: 0.9em; text-transform: uppercase; letter-spacing: 0.5px; }
.field-value { color: #434343; line-height: 1.6; white-space: pre-line; }
.all-data { display: none; margin-top: 20px; padding-top: 20px; border-top: 2px dashed #e1e1e1; }
.all-data.visible { display: block; }
.back-link { color: white; font-weight: 600; }
.no-results { text-align: center; padding: 60px 20px; }
.result-link { display: block; padding: 18px 24px; margin-bottom: 12px; background: #f7fafc; color: #404040; \
text-decoration: none; border-radius: 10px; border-left: 4px solid #989898; }
";

const TOGGLE_SCRIPT: &str = "\
function toggleAllData() {
  const allData = document.getElementById('allData');
  const btn = document.getElementById('toggleBtn');
  allData.classList.toggle('visible');
  btn.textContent = allData.classList.contains('visible') ? 'Hide All Data' : 'Show All Data';
}
";

/// Escape text for inclusion in HTML element content or a quoted
/// attribute value.
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

/// Landing page with the search form.
pub fn home_page(record_count: usize) -> String {
    let body = format!(
        "<div class='container'>\n\
         <h1>National Atlas</h1>\n\
         <p class='subtitle'>Explore detailed information about any country, region, or territory.</p>\n\
         <form action='/search' method='GET'>\n\
         <input type='text' name='q' placeholder='Enter country name...' required autofocus>\n\
         <button type='submit'>Search</button>\n\
         </form>\n\
         <p class='info'>Try searching: United States, Germany, Japan; or a fragment like ger, united, or braz.</p>\n\
         <p class='info'>{record_count} countries, regions, or territories currently loaded.</p>\n\
         </div>\n"
    );
    page(TITLE, &body, None)
}

/// Results page for `query`.
///
/// No results, a single result, and several results render as a
/// "nothing found" notice, a full detail card, and a list of links
/// back into `/search` respectively.
pub fn results_page(
    query: &str,
    results: Vec<&Record>,
    fields: &FieldNames,
    display: &[DisplayField],
) -> String {
    let escaped_query = escape_html(query);

    let mut body = String::new();
    body.push_str("<div class='header'>\n<a href='/' class='back-link'>Back to Search</a>\n");
    body.push_str("<h1>Search Results</h1>\n");
    body.push_str(&format!(
        "<p class='subtitle'>Alias Searched: &quot;{escaped_query}&quot;</p>\n</div>\n"
    ));
    body.push_str("<div class='container'>\n");

    let mut script = None;
    match SearchOutcome::from(results) {
        SearchOutcome::Empty => {
            body.push_str("<div class='no-results'>\n<h2>No countries found...</h2>\n");
            body.push_str(
                "<p>Try searching for &quot;United States&quot;, &quot;Germany&quot;, or &quot;Japan&quot;</p>\n</div>\n",
            );
        }
        SearchOutcome::Single(record) => {
            body.push_str(&detail_card(record, fields, display));
            script = Some(TOGGLE_SCRIPT);
        }
        SearchOutcome::Multiple(records) => {
            body.push_str(&result_list(&records, fields));
        }
    }

    body.push_str("</div>\n");

    page(&format!("{TITLE} - {escaped_query}"), &body, script)
}

fn detail_card(record: &Record, fields: &FieldNames, display: &[DisplayField]) -> String {
    let mut card = String::from("<div class='country-card'>\n");

    let name = record.get(&fields.short_name).unwrap_or("Unknown");
    card.push_str(&format!(
        "<h2 class='country-name'>{}</h2>\n",
        escape_html(name)
    ));

    for field in display {
        if field.key == fields.short_name {
            continue;
        }
        let value = record.value_or_empty(&field.key).trim();
        if value.is_empty() || (field.key == fields.long_name && value == "none") {
            continue;
        }
        card.push_str(&field_block(&field.label, value));
    }

    card.push_str(
        "<div class='toggle-container'>\n\
         <button class='toggle-button' onclick='toggleAllData()' id='toggleBtn'>Show All Data</button>\n\
         </div>\n",
    );
    card.push_str("<div class='all-data' id='allData'>\n<h3>Complete Database Information</h3>\n");

    for (name, value) in record.iter() {
        if display.iter().any(|field| field.key == name) {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        card.push_str(&field_block(name, value));
    }

    card.push_str("</div>\n</div>\n");
    card
}

fn result_list(records: &[&Record], fields: &FieldNames) -> String {
    let mut list = String::from("<div class='multiple-results'>\n");
    list.push_str(&format!("<h2>Found {} matches</h2>\n", records.len()));

    for record in records {
        let name = record.get(&fields.short_name).unwrap_or("Unknown");
        let href: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
        list.push_str(&format!(
            "<a href='/search?q={href}' class='result-link'>{}</a>\n",
            escape_html(&fields.display_name(record))
        ));
    }

    list.push_str("</div>\n");
    list
}

fn field_block(label: &str, value: &str) -> String {
    format!(
        "<div class='field'>\n<div class='field-label'>{}</div>\n<div class='field-value'>{}</div>\n</div>\n",
        escape_html(label),
        escape_html(value)
    )
}

fn page(title: &str, body: &str, script: Option<&str>) -> String {
    let script = script
        .map(|s| format!("<script>\n{s}</script>\n"))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang='en'>\n<head>\n<meta charset='UTF-8'>\n\
         <meta name='viewport' content='width=device-width, initial-scale=1.0'>\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n{body}{script}</body>\n</html>\n"
    )
}
