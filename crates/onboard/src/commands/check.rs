use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use color_eyre::Result;
use forms::{is_page_valid, FormSession, Transition, ValidationIssue};

use super::{attach_all, read_form_data};
use crate::target::FormTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatus {
    pub page: u32,
    pub title: String,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub pages: Vec<PageStatus>,
    /// Furthest page reachable with `Next` from page 1.
    pub reachable: u32,
    pub review_page: u32,
    pub issue: Option<ValidationIssue>,
}

impl CheckReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for status in &self.pages {
            let mark = if status.valid { "ok" } else { "incomplete" };
            let _ = writeln!(out, "page {} {:<32} {mark}", status.page, status.title);
        }
        if self.reachable == self.review_page {
            let _ = writeln!(out, "review reachable");
        } else {
            let _ = writeln!(out, "navigation stops on page {}", self.reachable);
        }
        match &self.issue {
            Some(issue) => {
                let _ = writeln!(out, "first issue ({}): {issue}", issue.field());
            }
            None => {
                let _ = writeln!(out, "form complete");
            }
        }
        out
    }
}

pub fn run(target: &FormTarget, data: &Path, attachments: &[String]) -> Result<CheckReport> {
    let schema = Arc::new(target.schema()?);
    let mut session = FormSession::new(Arc::clone(&schema));
    session.restore(read_form_data(data)?, 1);
    attach_all(&mut session, attachments)?;
    Ok(inspect(target, session))
}

/// Page validity, how far navigation gets, and the first whole-form issue.
pub fn inspect(target: &FormTarget, mut session: FormSession) -> CheckReport {
    let schema = session.schema().clone();
    let pages = schema
        .review_pages()
        .into_iter()
        .map(|page| PageStatus {
            page,
            title: target.section_title(&schema, page),
            valid: is_page_valid(schema.page_fields(page), session.data(), session.documents()),
        })
        .collect();

    while let Transition::Moved { .. } = session.next_page() {}
    let reachable = session.current_page();

    CheckReport {
        pages,
        reachable,
        review_page: schema.review_page(),
        issue: session.validate_form().err(),
    }
}
