use crate::domain::error::DomainError;
use crate::domain::validation::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One fundraising effort. `end_date` is always strictly after `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub details: String,
    pub target: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Raw answers collected for a new project.
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub title: String,
    pub details: String,
    pub target: String,
    pub start_date: String,
    pub end_date: String,
}

/// Raw answers collected while editing. An empty field keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: String,
    pub details: String,
    pub target: String,
    pub start_date: String,
    pub end_date: String,
}

impl Project {
    pub fn create(req: CreateProject) -> Result<Self, DomainError> {
        let target = parse_target(&req.target)?;
        let (start_date, end_date) = parse_window(&req.start_date, &req.end_date)?;

        Ok(Project {
            title: req.title,
            details: req.details,
            target,
            start_date,
            end_date,
        })
    }

    /// Applies an edit all-or-nothing: on error no field has changed.
    pub fn apply_update(&mut self, req: UpdateProject) -> Result<(), DomainError> {
        let target = if req.target.is_empty() {
            self.target
        } else {
            parse_target(&req.target)?
        };

        let start_date = keep_or_parse_date(&req.start_date, self.start_date)?;
        let end_date = keep_or_parse_date(&req.end_date, self.end_date)?;
        check_window(start_date, end_date)?;

        if !req.title.is_empty() {
            self.title = req.title;
        }
        if !req.details.is_empty() {
            self.details = req.details;
        }
        self.target = target;
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Details: {}", self.details)?;
        writeln!(f, "Target: {} EGP", format_target(self.target))?;
        writeln!(f, "Start Date: {}", self.start_date)?;
        write!(f, "End Date: {}", self.end_date)
    }
}

/// Removes the project at a 1-based `position`, shifting later ones down.
pub fn remove_project(projects: &mut Vec<Project>, position: usize) -> Result<Project, DomainError> {
    let index = position_to_index(position, projects.len())?;
    Ok(projects.remove(index))
}

/// Maps a 1-based position onto a slice index.
pub fn position_to_index(position: usize, len: usize) -> Result<usize, DomainError> {
    if position == 0 || position > len {
        return Err(DomainError::InvalidProjectNumber);
    }
    Ok(position - 1)
}

/// Renders an amount with at least one fractional digit, e.g. `5000.0`.
pub fn format_target(target: f64) -> String {
    format!("{target:?}")
}

/// Reads a 1-based project number.
///
/// `None` means the text is not an integer. Integers that are negative or too
/// large for `usize` map to position 0, which no project has.
pub fn parse_position(text: &str) -> Option<usize> {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.starts_with('-') {
        return Some(0);
    }
    Some(digits.parse::<usize>().unwrap_or(0))
}

/// Zero and negative amounts pass; only unparseable or non-finite text is rejected.
pub fn parse_target(text: &str) -> Result<f64, DomainError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DomainError::InvalidTarget),
    }
}

fn parse_window(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), DomainError> {
    let (Some(start_date), Some(end_date)) = (parse_date(start), parse_date(end)) else {
        return Err(DomainError::InvalidDateFormat);
    };
    check_window(start_date, end_date)?;
    Ok((start_date, end_date))
}

fn keep_or_parse_date(text: &str, current: NaiveDate) -> Result<NaiveDate, DomainError> {
    if text.is_empty() {
        return Ok(current);
    }
    parse_date(text).ok_or(DomainError::InvalidDateFormat)
}

fn check_window(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::InvalidDateOrder);
    }
    Ok(())
}
