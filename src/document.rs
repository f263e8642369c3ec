//! The résumé document model.
//!
//! A [`Document`] is plain data: named, ordered sections whose insertion
//! order is preserved verbatim through every render. The only behavior here
//! is JSON (de)serialization and [`Document::validate`], the structural check
//! the renderer runs before handing a document to a template.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name shown when `fullName` is blank
pub const NAME_FALLBACK: &str = "YOUR NAME";

/// The résumé aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
}

/// Contact and identity block at the top of every template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    pub technologies: Vec<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub language: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    #[default]
    Intermediate,
    Beginner,
}

impl Proficiency {
    /// Capitalized display label
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Beginner => "Beginner",
        }
    }
}

/// A stored résumé: the document plus its template and font selections.
///
/// Persistence is owned elsewhere; this only mirrors the shape of a stored
/// row so callers can hand the renderer everything it needs at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub title: String,
    pub template_id: String,
    /// Stored rows name this column `fontFamily`
    #[serde(alias = "fontFamily")]
    pub font_id: String,
    pub data: Document,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            title: "Untitled Resume".to_string(),
            template_id: crate::templates::TemplateId::default().id().to_string(),
            font_id: crate::typography::FontId::default().id().to_string(),
            data: Document::empty(),
        }
    }
}

impl Document {
    /// A fresh document: every section empty, personal info blank
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when no section has entries and no personal field is filled
    pub fn is_empty(&self) -> bool {
        self.personal_info == PersonalInfo::default()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
            && self.languages.is_empty()
    }

    /// Check the structural invariants templates rely on.
    ///
    /// Ids must be non-empty and unique within their section, and every
    /// date must be blank or `YYYY-MM`. An `endDate` on a `current` entry is
    /// void and is not inspected.
    pub fn validate(&self) -> Result<()> {
        check_ids("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        check_ids("education", self.education.iter().map(|e| e.id.as_str()))?;
        check_ids("skills", self.skills.iter().map(|e| e.id.as_str()))?;
        check_ids("projects", self.projects.iter().map(|e| e.id.as_str()))?;
        check_ids("certifications", self.certifications.iter().map(|e| e.id.as_str()))?;
        check_ids("languages", self.languages.iter().map(|e| e.id.as_str()))?;

        for e in &self.experience {
            check_range("experience", &e.id, &e.start_date, e.end_date.as_deref(), e.current)?;
        }
        for e in &self.education {
            check_range("education", &e.id, &e.start_date, e.end_date.as_deref(), e.current)?;
        }
        for p in &self.projects {
            check_range("projects", &p.id, &p.start_date, p.end_date.as_deref(), p.current)?;
        }
        for c in &self.certifications {
            check_date("certifications", &c.id, "date", &c.date)?;
        }
        Ok(())
    }
}

fn check_ids<'a>(section: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(Error::InvalidDocument(format!("{} entry without an id", section)));
        }
        if !seen.insert(id) {
            return Err(Error::InvalidDocument(format!("duplicate {} id '{}'", section, id)));
        }
    }
    Ok(())
}

fn check_range(section: &str, id: &str, start: &str, end: Option<&str>, current: bool) -> Result<()> {
    check_date(section, id, "startDate", start)?;
    if !current {
        check_date(section, id, "endDate", end.unwrap_or(""))?;
    }
    Ok(())
}

fn check_date(section: &str, id: &str, field: &str, value: &str) -> Result<()> {
    if value.is_empty() || parse_year_month(value).is_some() {
        Ok(())
    } else {
        Err(Error::InvalidDocument(format!(
            "{} '{}': {} '{}' is not YYYY-MM",
            section, id, field, value
        )))
    }
}

/// Parse a `YYYY-MM` string into (year, month 1..=12)
pub fn parse_year_month(value: &str) -> Option<(u32, u32)> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    if !year.bytes().all(|b| b.is_ascii_digit()) || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}
