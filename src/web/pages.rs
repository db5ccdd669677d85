use crate::handlers::prediction::LOW_CONFIDENCE_LINES;
use crate::models::diagnosis_form::DIAGNOSIS_FIELDS;
use crate::models::{DiagnosisForm, RecommendationQuery, SubmitStatus, UploadTask};

/// Minimal HTML escaping for text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;background:#fffbeb;color:#451a03;margin:0;padding:2rem}\
main{max-width:42rem;margin:0 auto;background:#fff;border:2px solid #92400e;border-radius:1rem;padding:2rem}\
h1{text-align:center}.error{color:#dc2626;text-align:center;font-weight:600}\
.advisory{color:#ea580c;text-align:center;font-weight:600}\
.result{background:#f3f4f6;border-radius:.75rem;padding:1rem;text-align:center}\
.breed{font-size:2.25rem;font-weight:800}ul.suggestions{list-style:none;padding:0;margin:0;border:1px solid #fcd34d}\
ul.suggestions li{padding:.5rem 1rem;cursor:pointer}ul.suggestions li:hover{background:#fde68a}\
pre{background:#fef3c7;padding:1rem;border-radius:.5rem;overflow-x:auto}\
label{display:block;font-weight:500;margin-top:.5rem}nav{text-align:center;margin-top:1.5rem}";

/// Disables every submit button of a form once it is sent.
const DISABLE_ON_SUBMIT: &str = "<script>document.querySelectorAll('form[data-single-flight]').forEach(function(f){\
f.addEventListener('submit',function(){f.querySelectorAll('button[type=submit]').forEach(function(b){\
b.disabled=true;if(b.dataset.busy){b.textContent=b.dataset.busy;}});});});</script>";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{style}</style></head>\
         <body><main>{body}</main>{script}</body></html>",
        title = escape_html(title),
        style = STYLE,
        body = body,
        script = DISABLE_ON_SUBMIT,
    )
}

fn back_home() -> &'static str {
    "<nav><a href=\"/\">&larr; Back to Home</a></nav>"
}

fn disabled_attr(status: SubmitStatus) -> &'static str {
    if status == SubmitStatus::Pending {
        " disabled"
    } else {
        ""
    }
}

pub fn landing_page() -> String {
    layout(
        "AI-Powered Indian Bovine Breed Identifier",
        "<h1>AI-Powered Indian Bovine Breed Identifier</h1>\
         <p>Leveraging advanced deep learning to accurately identify breeds of cattle and buffalo from a single image.</p>\
         <p>This tool provides instant, data-driven breed suggestions to support Field Level Workers, \
         ensuring data integrity for India's national livestock programs and the Bharat Pashudhan database.</p>\
         <nav><a href=\"/predict\">Go to Prediction Tool &rarr;</a> | \
         <a href=\"/nutrition\">Nutritional Recommendations</a> | \
         <a href=\"/disease\">Cattle Health Diagnosis Form</a></nav>",
    )
}

pub fn predict_page(task: &UploadTask) -> String {
    let mut body = String::from(
        "<h1>Breed Identification Tool</h1><p style=\"text-align:center\">Upload an image to identify the bovine breed.</p>",
    );

    if let Some(preview) = task.preview_data_uri() {
        body.push_str(&format!(
            "<p style=\"text-align:center\"><img src=\"{}\" alt=\"Image preview\" style=\"max-height:18rem;border-radius:.75rem\"></p>\
             <nav><a href=\"/predict\">Choose Different Image</a></nav>",
            escape_html(preview)
        ));
    } else {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/predict\" enctype=\"multipart/form-data\" data-single-flight>\
             <p>Drag &amp; drop an image here, or click to select a file</p>\
             <input type=\"file\" name=\"file\" accept=\"image/*\">\
             <button type=\"submit\" data-busy=\"Analyzing...\"{}>Identify Breed</button></form>",
            disabled_attr(task.status())
        ));
    }

    if let Some(error) = task.error() {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape_html(error)));
    }

    if task.low_confidence_flag() {
        let lines: Vec<String> = LOW_CONFIDENCE_LINES.iter().map(|l| escape_html(l)).collect();
        body.push_str(&format!("<p class=\"advisory\">{}</p>", lines.join("<br />")));
    }

    if let Some(prediction) = task.prediction() {
        body.push_str(&format!(
            "<div class=\"result\"><h2>Prediction Result</h2><p class=\"breed\">{}</p><p>Confidence: {}</p></div>",
            escape_html(&prediction.breed),
            escape_html(&prediction.confidence_text)
        ));
    }

    body.push_str(back_home());
    layout("Breed Identification Tool", &body)
}

const SUGGEST_SCRIPT: &str = "<script>(function(){var input=document.getElementById('breed');\
var list=document.getElementById('suggestions');\
function render(items){list.innerHTML='';items.forEach(function(name){var li=document.createElement('li');\
li.textContent=name;li.addEventListener('click',function(){input.value=name;list.innerHTML='';});list.appendChild(li);});}\
input.addEventListener('input',function(){var q=input.value;if(!q){render([]);return;}\
fetch('/api/breeds/suggestions?q='+encodeURIComponent(q)).then(function(r){return r.json();})\
.then(function(d){if(input.value===q){render(d.suggestions||[]);}}).catch(function(){render([]);});});})();</script>";

pub fn nutrition_page(query: &RecommendationQuery) -> String {
    let suggestions: String = query
        .suggestions()
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect();

    let mut body = format!(
        "<h1>Nutritional Recommendations</h1>\
         <p style=\"text-align:center\">Find expert nutritional advice for any bovine breed.</p>\
         <form method=\"post\" action=\"/nutrition\" autocomplete=\"off\" data-single-flight>\
         <input type=\"text\" id=\"breed\" name=\"breed\" placeholder=\"e.g., Sahiwal, Gir, Kankrej...\" value=\"{}\">\
         <ul id=\"suggestions\" class=\"suggestions\">{}</ul>\
         <button type=\"submit\" data-busy=\"Generating...\"{}>Find Advice</button></form>",
        escape_html(query.input()),
        suggestions,
        disabled_attr(query.status())
    );

    if let Some(error) = query.error() {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape_html(error)));
    }

    if let (Some(heading), Some(recommendations)) = (query.heading(), query.recommendations()) {
        body.push_str(&format!("<div class=\"result\"><h2>{}:</h2>", escape_html(&heading)));
        for rec in recommendations {
            body.push_str(&format!(
                "<p style=\"text-align:left\" data-icon=\"{}\">{} <strong>{}:</strong> {}</p>",
                rec.icon,
                rec.icon.glyph(),
                escape_html(&rec.heading),
                escape_html(&rec.text)
            ));
        }
        body.push_str("</div>");
    }

    body.push_str(back_home());
    body.push_str(SUGGEST_SCRIPT);
    layout("Nutritional Recommendations", &body)
}

pub fn disease_page(form: Option<&DiagnosisForm>) -> String {
    let mut body = String::from(
        "<h1>Cattle Health Diagnosis Form</h1>\
         <p style=\"text-align:center\">Fill in the form for disease prediction based on symptoms.</p>\
         <form method=\"post\" action=\"/disease\">",
    );

    for field in DIAGNOSIS_FIELDS {
        let selected = form.and_then(|f| f.get(field.label));
        let label = escape_html(field.label);
        body.push_str(&format!(
            "<label>{label}<select name=\"{label}\"><option value=\"\">Select {label}</option>",
            label = label
        ));
        for option in field.options {
            let marker = if selected == Some(*option) { " selected" } else { "" };
            body.push_str(&format!(
                "<option value=\"{value}\"{marker}>{value}</option>",
                value = escape_html(option),
                marker = marker
            ));
        }
        body.push_str("</select></label>");
    }

    body.push_str("<button type=\"submit\">Generate JSON</button></form>");

    if let Some(form) = form {
        body.push_str(&format!("<pre>{}</pre>", escape_html(&form.to_display_text())));
    }

    body.push_str(back_home());
    layout("Cattle Health Diagnosis Form", &body)
}
