//! Careers section: the "apply" notice shown for a job card.

#[cfg(test)]
#[path = "careers_test.rs"]
mod careers_test;

pub const CAREERS_EMAIL: &str = "careers@fusionfronts.com";

/// Notice for an application click on the card titled `job_title`.
#[must_use]
pub fn application_notice(job_title: &str) -> String {
    let title = job_title.trim();
    if title.is_empty() {
        format!("Thank you for your interest! Please email your resume to {CAREERS_EMAIL}")
    } else {
        format!("Thank you for your interest in the {title} position! Please email your resume to {CAREERS_EMAIL}")
    }
}
