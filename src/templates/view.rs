//! Display projection of a [`Document`] shared by every template.
//!
//! Both backends of a template read the same `ResumeView`, so date text,
//! link targets and labels are computed once and cannot diverge between
//! the preview and the printed document.

use super::format::{
    ensure_href, format_date, format_range, MonthStyle, CREDENTIAL_LABEL, GITHUB_LABEL, LINKEDIN_LABEL,
    PORTFOLIO_LABEL, PROJECT_LINK_LABEL,
};
use crate::document::{Document, NAME_FALLBACK};

/// A clickable link with a fixed label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub href: String,
}

impl LinkView {
    fn from_raw(label: &'static str, raw: &str) -> Option<Self> {
        let href = ensure_href(raw);
        (!href.is_empty()).then_some(Self { label, href })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactView {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<LinkView>,
}

impl ContactView {
    /// Plain text contact items in display order
    pub fn plain(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.location.is_none() && self.links.is_empty()
    }
}

/// Experience, education and project entries share one display shape
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryView {
    /// Position, degree line or project name
    pub title: String,
    /// Company, institution or project organization
    pub subtitle: Option<String>,
    pub location: Option<String>,
    /// Formatted date range, empty when the entry has no dates
    pub dates: String,
    pub description: Option<String>,
    pub gpa: Option<String>,
    pub technologies: Vec<String>,
    pub link: Option<LinkView>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillView {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationView {
    pub name: String,
    pub issuer: Option<String>,
    pub date: String,
    pub link: Option<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageView {
    pub language: String,
    pub proficiency: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeView {
    pub name: String,
    pub contact: ContactView,
    pub summary: Option<String>,
    pub experience: Vec<EntryView>,
    pub education: Vec<EntryView>,
    pub skills: Vec<SkillView>,
    pub projects: Vec<EntryView>,
    pub certifications: Vec<CertificationView>,
    pub languages: Vec<LanguageView>,
}

fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn present_opt(value: Option<&String>) -> Option<String> {
    value.and_then(|v| present(v))
}

impl ResumeView {
    pub fn new(doc: &Document, months: MonthStyle) -> Self {
        let info = &doc.personal_info;
        let links = [
            (PORTFOLIO_LABEL, &info.website),
            (LINKEDIN_LABEL, &info.linkedin),
            (GITHUB_LABEL, &info.github),
        ]
        .into_iter()
        .filter_map(|(label, raw)| LinkView::from_raw(label, raw))
        .collect();

        let experience = doc
            .experience
            .iter()
            .map(|e| EntryView {
                title: e.position.clone(),
                subtitle: present(&e.company),
                location: present_opt(e.location.as_ref()),
                dates: format_range(&e.start_date, e.end_date.as_deref(), e.current, months),
                description: present(&e.description),
                highlights: e.highlights.clone(),
                ..EntryView::default()
            })
            .collect();

        let education = doc
            .education
            .iter()
            .map(|e| EntryView {
                title: degree_line(&e.degree, &e.field),
                subtitle: present(&e.institution),
                location: present_opt(e.location.as_ref()),
                dates: format_range(&e.start_date, e.end_date.as_deref(), e.current, months),
                gpa: present_opt(e.gpa.as_ref()),
                highlights: e.highlights.clone(),
                ..EntryView::default()
            })
            .collect();

        let projects = doc
            .projects
            .iter()
            .map(|p| EntryView {
                title: p.name.clone(),
                subtitle: present_opt(p.organization.as_ref()),
                location: present_opt(p.location.as_ref()),
                dates: format_range(&p.start_date, p.end_date.as_deref(), p.current, months),
                description: present(&p.description),
                technologies: p.technologies.clone(),
                link: p.url.as_deref().and_then(|u| LinkView::from_raw(PROJECT_LINK_LABEL, u)),
                highlights: p.highlights.clone(),
                ..EntryView::default()
            })
            .collect();

        Self {
            name: present(&info.full_name).unwrap_or_else(|| NAME_FALLBACK.to_string()),
            contact: ContactView {
                email: present(&info.email),
                phone: present(&info.phone),
                location: present(&info.location),
                links,
            },
            summary: present(&info.summary),
            experience,
            education,
            skills: doc
                .skills
                .iter()
                .map(|s| SkillView { category: s.category.clone(), items: s.items.clone() })
                .collect(),
            projects,
            certifications: doc
                .certifications
                .iter()
                .map(|c| CertificationView {
                    name: c.name.clone(),
                    issuer: present(&c.issuer),
                    date: format_date(&c.date, months),
                    link: c.url.as_deref().and_then(|u| LinkView::from_raw(CREDENTIAL_LABEL, u)),
                })
                .collect(),
            languages: doc
                .languages
                .iter()
                .map(|l| LanguageView { language: l.language.clone(), proficiency: l.proficiency.label() })
                .collect(),
        }
    }
}

/// `{degree} in {field}`, or whichever half is present
fn degree_line(degree: &str, field: &str) -> String {
    match (degree.trim(), field.trim()) {
        ("", field) => field.to_string(),
        (degree, "") => degree.to_string(),
        (degree, field) => format!("{} in {}", degree, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Experience, Project};

    #[test]
    fn blank_name_falls_back() {
        let view = ResumeView::new(&Document::empty(), MonthStyle::Short);
        assert_eq!(view.name, NAME_FALLBACK);
        assert!(view.contact.is_empty());
        assert!(view.summary.is_none());
    }

    #[test]
    fn links_are_independent_and_labelled() {
        let mut doc = Document::empty();
        doc.personal_info.github = "github.com/ada".into();
        doc.personal_info.email = "ada@example.com".into();
        let view = ResumeView::new(&doc, MonthStyle::Short);
        assert_eq!(view.contact.links, vec![LinkView { label: "GitHub", href: "https://github.com/ada".into() }]);
        assert_eq!(view.contact.plain(), vec!["ada@example.com"]);
    }

    #[test]
    fn current_entries_hide_end_date() {
        let mut doc = Document::empty();
        doc.experience.push(Experience {
            id: "e1".into(),
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2020-01".into(),
            end_date: Some("2022-02".into()),
            current: true,
            ..Default::default()
        });
        let view = ResumeView::new(&doc, MonthStyle::Short);
        assert_eq!(view.experience[0].dates, "Jan 2020 \u{2013} Present");
    }

    #[test]
    fn project_url_becomes_link() {
        let mut doc = Document::empty();
        doc.projects.push(Project { id: "p".into(), name: "X".into(), url: Some("x.dev".into()), ..Default::default() });
        let view = ResumeView::new(&doc, MonthStyle::Short);
        assert_eq!(view.projects[0].link.as_ref().map(|l| (l.label, l.href.as_str())), Some(("Link", "https://x.dev")));
        assert_eq!(view.projects[0].dates, "");
    }

    #[test]
    fn degree_line_handles_missing_halves() {
        assert_eq!(degree_line("BSc", "Physics"), "BSc in Physics");
        assert_eq!(degree_line("", "Physics"), "Physics");
        assert_eq!(degree_line("BSc", ""), "BSc");
    }
}
