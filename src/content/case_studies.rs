//! Case-study registry for the portfolio modal.
//!
//! Studies are authored as structured records in
//! `content/case_studies.json` and rendered once, at load time, into the
//! HTML fragment the modal shows. The fragment is built as a Markdown event
//! stream, so record text is only ever a text event and is HTML-escaped,
//! never parsed as Markdown.

#[cfg(test)]
#[path = "case_studies_test.rs"]
mod case_studies_test;

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd, html};
use serde::Deserialize;

use crate::error::{Result, SiteError};

const BUILTIN_CASE_STUDIES: &str = include_str!("../../content/case_studies.json");

/// One label/value line of a study's technology stack.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Technology {
    pub label: String,
    pub value: String,
}

/// A case study as authored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CaseStudyRecord {
    pub id: String,
    pub title: String,
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    pub results: String,
}

/// A case study ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub content_html: String,
}

impl From<&CaseStudyRecord> for CaseStudy {
    fn from(record: &CaseStudyRecord) -> Self {
        Self { id: record.id.clone(), title: record.title.clone(), content_html: render_content(record) }
    }
}

/// Immutable id → case study mapping.
#[derive(Clone, Debug, Default)]
pub struct CaseStudyRegistry {
    studies: HashMap<String, CaseStudy>,
}

impl CaseStudyRegistry {
    /// Studies shipped with the site.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CASE_STUDIES)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<CaseStudyRecord> = serde_json::from_str(raw)?;
        Self::from_records(&records)
    }

    pub fn from_records(records: &[CaseStudyRecord]) -> Result<Self> {
        let mut studies = HashMap::with_capacity(records.len());
        for record in records {
            if record.id.trim().is_empty() {
                return Err(SiteError::Content(format!("study titled {:?} has an empty id", record.title)));
            }
            if record.title.trim().is_empty() {
                return Err(SiteError::Content(format!("study {:?} has an empty title", record.id)));
            }
            if studies.insert(record.id.clone(), CaseStudy::from(record)).is_some() {
                return Err(SiteError::Content(format!("duplicate study id {:?}", record.id)));
            }
        }
        Ok(Self { studies })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CaseStudy> {
        self.studies.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.studies.contains_key(id)
    }

    /// Known ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.studies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.studies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }
}

/// Render a record's body (everything but the title) to an HTML fragment.
#[must_use]
pub fn render_content(record: &CaseStudyRecord) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    section(&mut events, "Project Overview");
    paragraph(&mut events, &record.overview);

    if !record.features.is_empty() {
        section(&mut events, "Key Features");
        events.push(Event::Start(Tag::List(None)));
        for feature in &record.features {
            events.push(Event::Start(Tag::Item));
            events.push(Event::Text(feature.as_str().into()));
            events.push(Event::End(TagEnd::Item));
        }
        events.push(Event::End(TagEnd::List(false)));
    }

    if !record.technologies.is_empty() {
        section(&mut events, "Technologies Used");
        for tech in &record.technologies {
            events.push(Event::Start(Tag::Paragraph));
            events.push(Event::Start(Tag::Strong));
            events.push(Event::Text(format!("{}:", tech.label).into()));
            events.push(Event::End(TagEnd::Strong));
            events.push(Event::Text(format!(" {}", tech.value).into()));
            events.push(Event::End(TagEnd::Paragraph));
        }
    }

    section(&mut events, "Results");
    paragraph(&mut events, &record.results);

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn section<'a>(events: &mut Vec<Event<'a>>, heading: &'a str) {
    let level = HeadingLevel::H3;
    events.push(Event::Start(Tag::Heading { level, id: None, classes: Vec::new(), attrs: Vec::new() }));
    events.push(Event::Text(heading.into()));
    events.push(Event::End(TagEnd::Heading(level)));
}

fn paragraph<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    events.push(Event::Start(Tag::Paragraph));
    events.push(Event::Text(text.into()));
    events.push(Event::End(TagEnd::Paragraph));
}
