use serde_json::json;

use super::*;

fn record(id: &str, title: &str) -> CaseStudyRecord {
    CaseStudyRecord {
        id: id.to_owned(),
        title: title.to_owned(),
        overview: "Overview text.".to_owned(),
        features: vec!["First".to_owned(), "Second".to_owned()],
        technologies: vec![Technology { label: "Frontend".to_owned(), value: "Leptos".to_owned() }],
        results: "Shipped.".to_owned(),
    }
}

// =============================================================
// Builtin content
// =============================================================

#[test]
fn builtin_registry_loads_all_six_studies() {
    let registry = CaseStudyRegistry::builtin().expect("builtin content should load");
    assert_eq!(registry.len(), 6);
    assert_eq!(
        registry.ids(),
        vec!["fittrack", "intellichat", "propertyhub", "quickeats", "securebank", "techstore"]
    );
}

#[test]
fn techstore_title_matches_portfolio_card() {
    let registry = CaseStudyRegistry::builtin().expect("builtin content should load");
    let study = registry.get("techstore").expect("techstore present");
    assert_eq!(study.title, "TechStore Pro - E-Commerce Platform");
}

#[test]
fn builtin_fragment_has_every_section() {
    let registry = CaseStudyRegistry::builtin().expect("builtin content should load");
    let html = &registry.get("securebank").expect("securebank present").content_html;
    assert!(html.contains("<h3>Project Overview</h3>"));
    assert!(html.contains("<h3>Key Features</h3>"));
    assert!(html.contains("<li>Accessibility compliance (WCAG 2.1)</li>"));
    assert!(html.contains("<h3>Technologies Used</h3>"));
    assert!(html.contains("<strong>Frontend:</strong> Vue.js, Vuex, D3.js"));
    assert!(html.contains("<h3>Results</h3>"));
}

#[test]
fn unknown_id_is_absent() {
    let registry = CaseStudyRegistry::builtin().expect("builtin content should load");
    assert!(registry.get("nonexistent").is_none());
    assert!(!registry.contains("TechStore"));
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_content_emits_sections_in_order() {
    let html = render_content(&record("a", "A"));
    let overview = html.find("Project Overview").expect("overview");
    let features = html.find("Key Features").expect("features");
    let tech = html.find("Technologies Used").expect("tech");
    let results = html.find("Results").expect("results");
    assert!(overview < features && features < tech && tech < results);
    assert!(html.contains("<ul>\n<li>First</li>\n<li>Second</li>\n</ul>"));
}

#[test]
fn render_content_skips_empty_lists() {
    let mut bare = record("a", "A");
    bare.features.clear();
    bare.technologies.clear();
    let html = render_content(&bare);
    assert!(!html.contains("Key Features"));
    assert!(!html.contains("Technologies Used"));
    assert!(html.contains("<p>Shipped.</p>"));
}

#[test]
fn markup_in_text_is_escaped_not_interpreted() {
    let mut tricky = record("a", "A");
    tricky.overview = "Uses <script> and *stars* and [links](x)".to_owned();
    let html = render_content(&tricky);
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("*stars*"));
    assert!(!html.contains("<em>"));
    assert!(!html.contains("<a href"));
}

#[test]
fn line_leading_markers_stay_literal_text() {
    let mut tricky = record("a", "A");
    tricky.features = vec!["1. First".to_owned(), "+ plus".to_owned(), "- dash".to_owned()];
    tricky.overview = "Heading-ish\n===".to_owned();
    tricky.results = "2024. A year".to_owned();
    let html = render_content(&tricky);

    assert!(html.contains("<li>1. First</li>"));
    assert!(html.contains("<li>+ plus</li>"));
    assert!(html.contains("<li>- dash</li>"));
    assert!(html.contains("<p>2024. A year</p>"));
    assert!(!html.contains("<ol"));
    assert!(!html.contains("<h1>"));
    assert_eq!(html.matches("<ul>").count(), 1);
}

// =============================================================
// Loading errors
// =============================================================

#[test]
fn duplicate_ids_are_rejected() {
    let err = CaseStudyRegistry::from_records(&[record("dup", "One"), record("dup", "Two")]).expect_err("duplicate");
    assert!(matches!(err, SiteError::Content(msg) if msg.contains("dup")));
}

#[test]
fn empty_id_or_title_is_rejected() {
    assert!(matches!(CaseStudyRegistry::from_records(&[record(" ", "T")]), Err(SiteError::Content(_))));
    assert!(matches!(CaseStudyRegistry::from_records(&[record("id", "")]), Err(SiteError::Content(_))));
}

#[test]
fn unknown_json_fields_are_rejected() {
    let raw = json!([{
        "id": "x", "title": "X", "overview": "o", "results": "r", "html": "<p>raw</p>"
    }])
    .to_string();
    assert!(matches!(CaseStudyRegistry::from_json(&raw), Err(SiteError::Json(_))));
}

#[test]
fn lists_default_to_empty_in_json() {
    let raw = json!([{ "id": "x", "title": "X", "overview": "o", "results": "r" }]).to_string();
    let registry = CaseStudyRegistry::from_json(&raw).expect("minimal record");
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}
