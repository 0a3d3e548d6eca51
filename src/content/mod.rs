//! Static site content: case studies and the careers notice.

pub mod careers;
pub mod case_studies;

pub use case_studies::{CaseStudy, CaseStudyRegistry};
