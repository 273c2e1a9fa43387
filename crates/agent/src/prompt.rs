//! Prompt text for the tariff arbitrator.

use std::fmt::Write as _;

use tariffy_core::ArbitrationRequest;

pub const DESCRIPTION_LIMIT: usize = 500;

const RULES: &str = "\
You are a customs classification assistant. Assign tariff codes to the product below.

Rules:
- Only answer with codes that appear in the reference list. Never invent a code.
- `hs6` must have the form NNNN.NN.
- Return at most 3 candidates, most likely first.
- Confidence is one of high, medium or low.
- If the product looks like a vehicle part, prefer the automotive chapter over generic materials.";

const RESPONSE_FORMAT: &str = r#"Respond with JSON only, in this shape:
{"candidates": [{"hs6": "6109.10", "hts": "6109.10.0012", "jp_hs": "6109.10.900", "category": "...", "material": "...", "usage": "...", "chapter": "Chapter 61", "reason": "...", "confidence": "high"}]}"#;

pub fn system_prompt(request: &ArbitrationRequest) -> String {
    let mut prompt = String::from(RULES);

    prompt.push_str("\n\nTarget chapters: ");
    let chapters: Vec<String> = request.chapters.iter().map(ToString::to_string).collect();
    prompt.push_str(&chapters.join(", "));

    prompt.push_str("\n\nReference codes:\n");
    for reference in &request.reference_codes {
        let _ = writeln!(prompt, "- {} [{}] {}", reference.code, reference.chapter, reference.description);
    }

    prompt.push('\n');
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

pub fn user_message(request: &ArbitrationRequest) -> String {
    let mut lines = vec![format!("Product: {}", request.name.trim())];

    let description = truncate_chars(request.description.trim(), DESCRIPTION_LIMIT);
    if !description.is_empty() {
        lines.push(format!("Description: {description}"));
    }

    let attributes: Vec<String> = request
        .attributes
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    if !attributes.is_empty() {
        lines.push(format!("Attributes: {}", attributes.join(" | ")));
    }

    if !request.category_path.trim().is_empty() {
        lines.push(format!("Category: {}", request.category_path.trim()));
    }

    lines.join("\n")
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
