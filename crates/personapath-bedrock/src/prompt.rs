//! Prompt assembly for report generation.
//!
//! The system instruction sets the analyst persona and tone; the user
//! content carries the profile and the full quiz transcript in order.

use personapath_core::models::answer::Answer;
use personapath_core::models::profile::UserProfile;

/// Build the system instruction, tailored to the person's age and gender.
pub fn system_instruction(profile: &UserProfile) -> String {
    format!(
        "You are an expert personality analyst and career psychologist.\n\
         Your job is to generate a personalized personality report based on a user's \
         answers to a quiz and their demographic details.\n\
         \n\
         TONE & STYLE:\n\
         Friendly, motivational, modern, and easy to understand.\n\
         Address the user by name occasionally.\n\
         Tailor the career advice and personality description specifically for a \
         {age}-year-old {gender}.\n\
         Avoid technical jargon.\n\
         \n\
         Analyze the user responses to determine their personality type, strengths, \
         ideal careers, and a fictional character match. \
         Give at least one strength and at least one career suggestion.",
        age = profile.age,
        gender = profile.gender,
    )
}

/// Build the user message: profile block followed by the numbered transcript.
pub fn user_content(answers: &[Answer], profile: &UserProfile) -> String {
    let mut content = String::from("USER PROFILE:\n");
    content.push_str(&format!("Name: {}\n", profile.name));
    content.push_str(&format!("Age: {}\n", profile.age));
    content.push_str(&format!("Gender: {}\n", profile.gender));
    content.push_str("\nQUIZ RESPONSES:\n");

    for (i, answer) in answers.iter().enumerate() {
        content.push_str(&format!("Q{}: {}\n", i + 1, answer.question_prompt));
        match &answer.trait_value {
            Some(t) => content.push_str(&format!("A: {} (trait: {t})\n", answer.answer_text)),
            None => content.push_str(&format!("A: {}\n", answer.answer_text)),
        }
    }

    content
}
