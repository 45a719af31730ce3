use crate::dispatch::types::Section;
use crate::roster::{Roster, StudentRecord};

use std::fmt::Write;

const TEMPLATE: &str = include_str!("index.html");

/// Renders the whole page: navigation, status banners, the action forms with
/// `section` visible, and the roster table.
pub fn render(
    roster: &Roster,
    message: Option<&str>,
    result: Option<&str>,
    section: Section,
) -> String {
    fill_template(
        TEMPLATE,
        &[
            ("{{nav}}", render_nav(section)),
            ("{{status}}", render_status(message, result)),
            ("{{panels}}", render_panels(section)),
            ("{{roster}}", render_roster(roster)),
        ],
    )
}

/// Substitutes each placeholder once, in order. Inserted values are never
/// rescanned, so user text that looks like a placeholder stays literal.
fn fill_template(template: &str, slots: &[(&str, String)]) -> String {
    let extra: usize = slots.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    for (marker, value) in slots {
        match rest.find(marker) {
            Some(idx) => {
                out.push_str(&rest[..idx]);
                out.push_str(value);
                rest = &rest[idx + marker.len()..];
            }
            None => tracing::warn!("Template marker {} not found", marker),
        }
    }
    out.push_str(rest);
    out
}

fn render_nav(active: Section) -> String {
    let mut nav = String::new();
    for section in Section::ALL {
        let class = if section == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"/?section={}\"{}>{}</a>",
            section.as_str(),
            class,
            section.title()
        );
    }
    nav
}

fn render_status(message: Option<&str>, result: Option<&str>) -> String {
    let mut status = String::new();
    if let Some(message) = message {
        let _ = write!(status, "<div class=\"message\">{}</div>", escape_html(message));
    }
    if let Some(result) = result {
        let _ = write!(status, "<div class=\"result\">{}</div>", escape_html(result));
    }
    status
}

fn render_panels(active: Section) -> String {
    Section::ALL
        .into_iter()
        .map(|section| {
            let class = if section == active { "panel active" } else { "panel" };
            format!(
                "<div id=\"{id}\" class=\"{class}\">\
                 <h2>{title}</h2>\
                 <form method=\"post\" action=\"/?section={id}\">\
                 <input type=\"hidden\" name=\"action\" value=\"{action}\">\
                 {fields}\
                 <button type=\"submit\">{title}</button>\
                 </form></div>",
                id = section.as_str(),
                class = class,
                title = section.title(),
                action = section.action_name(),
                fields = panel_fields(section),
            )
        })
        .collect()
}

fn panel_fields(section: Section) -> String {
    let fields: &[(&str, &str, bool)] = match section {
        Section::AddStudent => &[
            ("sid", "Student ID", true),
            ("first", "First name", true),
            ("last", "Last name", true),
            ("dob", "Date of birth", true),
        ],
        Section::EditStudent => &[
            ("edit_sid", "Student ID", true),
            ("edit_first", "New first name", false),
            ("edit_last", "New last name", false),
            ("edit_dob", "New date of birth", false),
        ],
        Section::DeleteStudent => &[("delete_sid", "Student ID", true)],
        Section::AddGrade => &[
            ("grade_sid", "Student ID", true),
            ("grade_value", "Grade (0-100)", true),
        ],
        Section::EditGrade => &[
            ("edit_grade_sid", "Student ID", true),
            ("grade_index", "Grade index", true),
            ("new_grade", "New grade (0-100)", true),
        ],
        Section::DeleteGrade => &[
            ("delete_grade_sid", "Student ID", true),
            ("delete_grade_index", "Grade index", true),
        ],
        Section::ViewAverage => &[("avg_sid", "Student ID", true)],
        Section::HighestScorer | Section::LowestScorer => &[],
    };

    fields
        .iter()
        .map(|(name, label, required)| {
            format!(
                "<label for=\"{name}\">{label}</label><input id=\"{name}\" name=\"{name}\"{req}>",
                req = if *required { " required" } else { "" },
            )
        })
        .collect()
}

fn render_roster(roster: &Roster) -> String {
    if roster.is_empty() {
        return "<p>No students yet.</p>".to_string();
    }

    let mut table = String::from(
        "<table><thead><tr><th>ID</th><th>Name</th><th>Date of birth</th>\
         <th>Grades</th><th>Average</th></tr></thead><tbody>",
    );
    for student in roster.iter() {
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&student.id),
            escape_html(&student.full_name()),
            escape_html(&student.dob),
            render_grades(student),
            student
                .average()
                .map(|avg| format!("{:.2}", avg))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }
    table.push_str("</tbody></table>");
    table
}

fn render_grades(student: &StudentRecord) -> String {
    if student.grades.is_empty() {
        return "&mdash;".to_string();
    }
    student
        .grades
        .iter()
        .enumerate()
        .map(|(idx, grade)| {
            format!(
                "<span class=\"grade\"><small>[{}]</small> {}</span>",
                idx, grade
            )
        })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
