//! FAQ question/answer extraction
//!
//! Real-world FAQ markup is inconsistent, so extraction runs three tiers in
//! order of trustworthiness: schema.org microdata attributes, JSON-LD script
//! blocks, then a heading heuristic over plain HTML. The first tier that
//! yields at least one item wins outright; tiers are never merged, which
//! keeps heuristic false positives out of well-structured pages.

use super::normalized_text;
use crate::types::FaqItem;
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Interrogative/modal words that mark a heading as a question
const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "does", "do", "can", "is", "are", "should",
    "will", "could",
];

/// Extract FAQ items from one page's HTML
///
/// Tries microdata, then JSON-LD, then the heading heuristic; the first
/// tier producing any item short-circuits the rest. Returns an empty list
/// when no tier finds anything.
pub fn extract_faq_items(html: &str) -> Vec<FaqItem> {
    let document = Html::parse_document(html);

    let items = microdata_items(&document);
    if !items.is_empty() {
        debug!(count = items.len(), "FAQ items from microdata");
        return items;
    }

    let items = json_ld_items(&document);
    if !items.is_empty() {
        debug!(count = items.len(), "FAQ items from JSON-LD");
        return items;
    }

    let items = heading_items(&document);
    debug!(count = items.len(), "FAQ items from heading heuristic");
    items
}

/// Tier 1: schema.org microdata attributes
///
/// Within each `FAQPage`-typed element, entities are selected by
/// `itemprop="mainEntity"`; only if that matches nothing is the
/// `mainEntityOfPage` relation consulted. The relations are ordered
/// alternatives, not independent queries.
fn microdata_items(document: &Html) -> Vec<FaqItem> {
    let faq_page = Selector::parse(r#"[itemtype*="FAQPage"]"#).unwrap();
    let main_entity = Selector::parse(r#"[itemprop="mainEntity"]"#).unwrap();
    let main_entity_of_page = Selector::parse(r#"[itemprop="mainEntityOfPage"]"#).unwrap();
    let name = Selector::parse(r#"[itemprop="name"]"#).unwrap();
    let text = Selector::parse(r#"[itemprop="text"]"#).unwrap();

    let mut items = Vec::new();
    for page in document.select(&faq_page) {
        let mut entities: Vec<ElementRef> = page.select(&main_entity).collect();
        if entities.is_empty() {
            entities = page.select(&main_entity_of_page).collect();
        }

        for entity in entities {
            let question = entity
                .select(&name)
                .next()
                .map(|e| normalized_text(&e))
                .unwrap_or_default();
            let answer = entity
                .select(&text)
                .next()
                .map(|e| normalized_text(&e))
                .unwrap_or_default();
            if !question.is_empty() && !answer.is_empty() {
                items.push(FaqItem::new(question, answer));
            }
        }
    }
    items
}

/// Tier 2: JSON-LD script blocks
///
/// Every `application/ld+json` script is parsed (invalid JSON skipped
/// silently) and walked recursively, so Question nodes are found at any
/// nesting depth. Results are deduplicated by exact question/answer pair.
fn json_ld_items(document: &Html) -> Vec<FaqItem> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    let mut items = Vec::new();
    for script in document.select(&selector) {
        let json_text = script.text().collect::<String>();
        match serde_json::from_str::<Value>(&json_text) {
            Ok(value) => walk_json_ld(&value, &mut items),
            Err(e) => {
                debug!(error = %e, "Skipping invalid JSON-LD block");
            }
        }
    }

    dedup_items(items)
}

/// Recursive walk over a JSON-LD value collecting Q/A pairs
fn walk_json_ld(value: &Value, out: &mut Vec<FaqItem>) {
    match value {
        Value::Array(values) => {
            for v in values {
                walk_json_ld(v, out);
            }
        }
        Value::Object(map) => {
            if has_type(map, "faqpage") {
                if let Some(main) = map.get("mainEntity") {
                    for entity in as_values(main) {
                        if let Value::Object(entity) = entity {
                            if has_type(entity, "question") {
                                collect_question(entity, out);
                            }
                        }
                    }
                }
            }

            if has_type(map, "question") {
                collect_question(map, out);
            }

            // Child values are walked regardless of tag, so Question
            // nodes nested under @graph or unknown wrappers are found.
            for child in map.values() {
                walk_json_ld(child, out);
            }
        }
        _ => {}
    }
}

/// Case-insensitive substring match on an object's `@type`
///
/// Accepts both singular and array-valued types.
fn has_type(map: &serde_json::Map<String, Value>, needle: &str) -> bool {
    match map.get("@type") {
        Some(Value::String(s)) => s.to_lowercase().contains(needle),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains(needle)),
        _ => false,
    }
}

/// View a JSON value as a slice: arrays element-wise, anything else as one
fn as_values(value: &Value) -> &[Value] {
    match value {
        Value::Array(values) => values,
        other => std::slice::from_ref(other),
    }
}

/// Collect Q/A pairs from an object tagged as a Question
///
/// Question text comes from `name` (or `headline`); the answer property is
/// the first present of `acceptedAnswer`, `suggestedAnswer`, `answer`, and
/// may hold one answer object or an array of them.
fn collect_question(map: &serde_json::Map<String, Value>, out: &mut Vec<FaqItem>) {
    let question = map
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| map.get("headline").and_then(Value::as_str))
        .map(str::trim)
        .filter(|q| !q.is_empty());
    let Some(question) = question else {
        return;
    };

    let answers = ["acceptedAnswer", "suggestedAnswer", "answer"]
        .iter()
        .find_map(|prop| map.get(*prop));
    let Some(answers) = answers else {
        return;
    };

    for answer in as_values(answers) {
        let Value::Object(answer) = answer else {
            continue;
        };
        let text = answer
            .get("text")
            .and_then(Value::as_str)
            .or_else(|| answer.get("description").and_then(Value::as_str))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(text) = text {
            out.push(FaqItem::new(question, text));
        }
    }
}

/// Drop duplicate (question, answer) pairs preserving first-seen order
fn dedup_items(items: Vec<FaqItem>) -> Vec<FaqItem> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.question.clone(), item.answer.clone())))
        .collect()
}

/// Tier 3: heading heuristic over plain HTML
///
/// Scans h2/h3/h4 in document order; for each question-like heading the
/// answer is accumulated from following sibling nodes until the next
/// h1-h4, taking text from p/div/li/section/article elements and bare
/// text nodes, joined with blank lines.
fn heading_items(document: &Html) -> Vec<FaqItem> {
    let headings = Selector::parse("h2, h3, h4").unwrap();

    let mut items = Vec::new();
    for heading in document.select(&headings) {
        let question = normalized_text(&heading);
        if !is_question(&question) {
            continue;
        }

        let mut fragments: Vec<String> = Vec::new();
        for sibling in heading.next_siblings() {
            match sibling.value() {
                Node::Element(element) => {
                    let tag = element.name();
                    if matches!(tag, "h1" | "h2" | "h3" | "h4") {
                        break;
                    }
                    if matches!(tag, "p" | "div" | "li" | "section" | "article") {
                        if let Some(element) = ElementRef::wrap(sibling) {
                            let text = normalized_text(&element);
                            if !text.is_empty() {
                                fragments.push(text);
                            }
                        }
                    }
                }
                Node::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        fragments.push(text.to_string());
                    }
                }
                _ => {}
            }
        }

        let answer = fragments.join("\n\n");
        if !answer.is_empty() {
            items.push(FaqItem::new(question, answer));
        }
    }
    items
}

/// True if heading text reads as a question
fn is_question(text: &str) -> bool {
    let text = text.trim();
    if text.contains('?') {
        return true;
    }
    let lower = text.to_lowercase();
    QUESTION_WORDS.iter().any(|word| {
        lower
            .strip_prefix(word)
            .is_some_and(|rest| rest.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICRODATA_PAGE: &str = r#"<html><body>
        <div itemscope itemtype="https://schema.org/FAQPage">
            <div itemprop="mainEntity" itemscope itemtype="https://schema.org/Question">
                <h3 itemprop="name">What is sitellms?</h3>
                <div itemscope itemtype="https://schema.org/Answer">
                    <div itemprop="text">A sitemap-driven llms.txt generator.</div>
                </div>
            </div>
            <div itemprop="mainEntity" itemscope itemtype="https://schema.org/Question">
                <h3 itemprop="name">Is it fast?</h3>
                <div itemprop="text">Fast enough.</div>
            </div>
        </div>
    </body></html>"#;

    #[test]
    fn test_microdata_tier() {
        let items = extract_faq_items(MICRODATA_PAGE);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "What is sitellms?");
        assert_eq!(items[0].answer, "A sitemap-driven llms.txt generator.");
        assert_eq!(items[1].question, "Is it fast?");
    }

    #[test]
    fn test_microdata_main_entity_of_page_fallback() {
        let html = r#"<div itemscope itemtype="https://schema.org/FAQPage">
            <div itemprop="mainEntityOfPage" itemscope>
                <span itemprop="name">How does fallback work?</span>
                <span itemprop="text">Secondary relation is used only when the primary matches nothing.</span>
            </div>
        </div>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "How does fallback work?");
    }

    #[test]
    fn test_microdata_skips_incomplete_pairs() {
        let html = r#"<div itemtype="https://schema.org/FAQPage">
            <div itemprop="mainEntity"><span itemprop="name">Question only?</span></div>
        </div>"#;
        // Microdata yields nothing, and no other tier applies either.
        assert!(extract_faq_items(html).is_empty());
    }

    #[test]
    fn test_microdata_wins_over_headings() {
        let html = format!(
            "{}{}",
            MICRODATA_PAGE, "<h2>What about headings?</h2><p>Should be ignored.</p>"
        );
        let items = extract_faq_items(&html);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.question != "What about headings?"));
    }

    #[test]
    fn test_json_ld_faq_page() {
        let html = r#"<script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": [
                {
                    "@type": "Question",
                    "name": "What is this?",
                    "acceptedAnswer": {"@type": "Answer", "text": "A generator."}
                },
                {
                    "@type": "Question",
                    "name": "Who is it for?",
                    "acceptedAnswer": {"@type": "Answer", "text": "LLM agents."}
                }
            ]
        }
        </script>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "What is this?");
        assert_eq!(items[0].answer, "A generator.");
    }

    #[test]
    fn test_json_ld_array_root_dedup() {
        let html = r#"<script type="application/ld+json">
        [
            {
                "@type": "FAQPage",
                "mainEntity": {
                    "@type": "Question",
                    "name": "Shared?",
                    "acceptedAnswer": {"text": "Yes."}
                }
            },
            {
                "@type": "FAQPage",
                "mainEntity": [
                    {"@type": "Question", "name": "Shared?", "acceptedAnswer": {"text": "Yes."}},
                    {"@type": "Question", "name": "Unique?", "acceptedAnswer": {"text": "Also yes."}}
                ]
            }
        ]
        </script>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "Shared?");
        assert_eq!(items[1].question, "Unique?");
    }

    #[test]
    fn test_json_ld_nested_question_outside_faq_page() {
        let html = r#"<script type="application/ld+json">
        {
            "@type": "WebPage",
            "about": {
                "wrapper": {
                    "@type": "Question",
                    "headline": "Found deep down?",
                    "suggestedAnswer": [{"text": "First."}, {"description": "Second."}]
                }
            }
        }
        </script>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "Found deep down?");
        assert_eq!(items[0].answer, "First.");
        assert_eq!(items[1].answer, "Second.");
    }

    #[test]
    fn test_json_ld_invalid_block_skipped() {
        let html = r#"
        <script type="application/ld+json">{not json at all</script>
        <script type="application/ld+json">
        {"@type": "Question", "name": "Still works?", "answer": {"text": "Yes."}}
        </script>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Still works?");
    }

    #[test]
    fn test_heading_tier() {
        let html = r#"<html><body>
            <h2>What is the purpose?</h2>
            <p>First part.</p>
            <div>Second part.</div>
            <h2>Not a question heading</h2>
            <p>Unrelated.</p>
            <h3>Can it nest?</h3>
            <p>It stops at the next heading.</p>
            <h4>Plain statement here</h4>
            <p>Ignored.</p>
        </body></html>"#;
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "What is the purpose?");
        assert_eq!(items[0].answer, "First part.\n\nSecond part.");
        assert_eq!(items[1].question, "Can it nest?");
        assert_eq!(items[1].answer, "It stops at the next heading.");
    }

    #[test]
    fn test_heading_without_answer_dropped() {
        let html = "<h2>Why no answer?</h2><h2>Does it matter?</h2><p>Only this one.</p>";
        let items = extract_faq_items(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Does it matter?");
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("What is this"));
        assert!(is_question("Pricing?"));
        assert!(is_question("CAN I cancel anytime"));
        assert!(is_question("does it work"));
        assert!(!is_question("Doesnt start right"));
        assert!(!is_question("Whatever you say"));
        assert!(!is_question("Getting started"));
    }

    #[test]
    fn test_no_faq_content() {
        assert!(extract_faq_items("<html><body><p>Nothing here</p></body></html>").is_empty());
    }
}
