use serde::Serialize;
use tera::{Context, Tera};

use personapath_core::models::profile::UserProfile;
use personapath_core::models::report::PersonalityReport;

use crate::error::ExportError;

/// Markdown layout of a report as shown on the results page.
pub const DEFAULT_TEMPLATE: &str = r#"# {{ profile.name }}'s Personality Report

## {{ report.personality_type.title }}

{{ report.personality_type.description }}

## Strengths
{% for s in report.strengths %}
- **{{ s.name }}**: {{ s.description }}
{%- endfor %}

## Career Suggestions
{% for c in report.career_suggestions %}
- **{{ c.role }}**: {{ c.why_fit }}
{%- endfor %}

## Fictional Match

**{{ report.fictional_match.character }}** ({{ report.fictional_match.universe }})

{{ report.fictional_match.reason }}
"#;

#[derive(Serialize)]
struct RenderContext<'a> {
    profile: ProfileContext<'a>,
    report: &'a PersonalityReport,
}

#[derive(Serialize)]
struct ProfileContext<'a> {
    name: &'a str,
    age: u8,
    gender: &'a str,
}

/// Render a report with [`DEFAULT_TEMPLATE`].
pub fn render_markdown(
    profile: &UserProfile,
    report: &PersonalityReport,
) -> Result<String, ExportError> {
    render_template("report.md", DEFAULT_TEMPLATE, profile, report)
}

/// Render a report with a caller-supplied Tera template.
///
/// `profile` (`name`, `age`, `gender`) and `report` are the template
/// context variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    profile: &UserProfile,
    report: &PersonalityReport,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(RenderContext {
        profile: ProfileContext {
            name: &profile.name,
            age: profile.age,
            gender: profile.gender.as_str(),
        },
        report,
    })?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
