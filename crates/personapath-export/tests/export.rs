use personapath_core::models::feedback::Feedback;
use personapath_core::models::profile::{Gender, UserProfile};
use personapath_core::models::report::{
    CareerSuggestion, FictionalMatch, PersonalityReport, PersonalityType, Strength,
};
use personapath_core::models::saved_report::SavedReport;
use personapath_export::csv_export::{HEADERS, export_csv};
use personapath_export::render::{render_markdown, render_template};

fn profile() -> UserProfile {
    UserProfile {
        name: "Ada".to_string(),
        age: 29,
        gender: Gender::Female,
    }
}

fn report() -> PersonalityReport {
    PersonalityReport {
        personality_type: PersonalityType {
            title: "The Architect".to_string(),
            description: "Builds systems in her head.".to_string(),
        },
        strengths: vec![
            Strength {
                name: "Analysis".to_string(),
                description: "Breaks problems down.".to_string(),
            },
            Strength {
                name: "Vision".to_string(),
                description: "Sees where things are heading.".to_string(),
            },
        ],
        career_suggestions: vec![CareerSuggestion {
            role: "Engineer".to_string(),
            why_fit: "Likes structure.".to_string(),
        }],
        fictional_match: FictionalMatch {
            character: "Tony Stark".to_string(),
            universe: "Marvel".to_string(),
            reason: "Tinkers, relentlessly.".to_string(),
        },
    }
}

fn saved(id: &str, feedback: Option<Feedback>) -> SavedReport {
    SavedReport {
        id: id.to_string(),
        created_at: "2025-03-14T09:26:53Z".parse().unwrap(),
        user_profile: profile(),
        report: report(),
        feedback,
    }
}

#[test]
fn csv_has_fixed_header_and_one_row_per_report() {
    let mut rated = saved("r1", None);
    rated.feedback = Some(Feedback {
        rating: 4,
        comment: "Mostly right, \"scarily\" so".to_string(),
        created_at: "2025-03-15T00:00:00Z".parse().unwrap(),
    });
    let unrated = saved("r2", None);

    let bytes = export_csv(&[rated, unrated]).unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].iter().collect::<Vec<_>>(),
        [
            "2025-03-14",
            "Ada",
            "29",
            "Female",
            "The Architect",
            "Tony Stark",
            "4",
            "Mostly right, \"scarily\" so"
        ]
    );
    assert_eq!(&rows[1][6], "");
    assert_eq!(&rows[1][7], "");
}

#[test]
fn empty_export_is_header_only() {
    let bytes = export_csv(&[]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "Date,Name,Age,Gender,Personality,Character,Rating,Comment\n");
}

#[test]
fn markdown_contains_every_section() {
    let text = render_markdown(&profile(), &report()).unwrap();
    assert!(text.starts_with("# Ada's Personality Report"));
    assert!(text.contains("## The Architect"));
    assert!(text.contains("- **Analysis**: Breaks problems down."));
    assert!(text.contains("- **Vision**: Sees where things are heading."));
    assert!(text.contains("- **Engineer**: Likes structure."));
    assert!(text.contains("**Tony Stark** (Marvel)"));
}

#[test]
fn custom_template_sees_profile_fields() {
    let text = render_template(
        "summary.txt",
        "{{ profile.name }} ({{ profile.age }}, {{ profile.gender }}): {{ report.personality_type.title }}",
        &profile(),
        &report(),
    )
    .unwrap();
    assert_eq!(text, "Ada (29, Female): The Architect");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad", "{% for %}", &profile(), &report()).unwrap_err();
    assert!(matches!(
        err,
        personapath_export::error::ExportError::TemplateParse(_)
    ));
}
