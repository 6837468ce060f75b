use std::sync::LazyLock;

use personapath_core::models::question::{AnswerOption, Question};

/// The question bank, in presentation order. Built once, never mutated.
pub fn question_bank() -> &'static [Question] {
    static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
        vec![
            question(
                1,
                "How do you recharge after a long, busy week?",
                [
                    ("Going out with friends or attending a social event", "Extrovert"),
                    ("Curling up with a book, movie, or solo hobby", "Introvert"),
                    ("Spending time in nature or doing physical activity", "Active"),
                    ("Working on a personal passion project", "Creative"),
                ],
            ),
            question(
                2,
                "When faced with a complex problem, what's your first instinct?",
                [
                    ("Break it down logically and analyze the data", "Analytical"),
                    ("Trust my gut feeling and intuition", "Intuitive"),
                    ("Ask others for their opinions and collaborate", "Collaborative"),
                    ("Look for a creative, out-of-the-box solution", "Innovative"),
                ],
            ),
            question(
                3,
                "How do you prefer to organize your daily tasks?",
                [
                    ("Strict to-do lists and time-blocking", "Structured"),
                    ("Rough goals, but I keep things flexible", "Flexible"),
                    ("I prioritize whatever feels most urgent in the moment", "Spontaneous"),
                    ("I often multitask and juggle several things at once", "Dynamic"),
                ],
            ),
            question(
                4,
                "In a group project, which role do you naturally gravitate towards?",
                [
                    ("The Leader: delegating tasks and keeping the vision", "Leadership"),
                    ("The Specialist: focusing deeply on one specific part", "Technical"),
                    ("The Mediator: ensuring everyone gets along", "Diplomatic"),
                    ("The Presenter: pitching the final result", "Communication"),
                ],
            ),
            question(
                5,
                "What motivates you most in a career?",
                [
                    ("Financial security and clear advancement", "Ambitious"),
                    ("Helping others and making a social impact", "Altruistic"),
                    ("Creative freedom and self-expression", "Artistic"),
                    ("Solving difficult challenges and learning new things", "Intellectual"),
                ],
            ),
            question(
                6,
                "How do you handle unexpected changes or surprises?",
                [
                    ("I get stressed initially but create a new plan", "Planner"),
                    ("I adapt quickly; change is exciting", "Adaptable"),
                    ("I analyze the risks before moving forward", "Cautious"),
                    ("I look for the hidden opportunity in the chaos", "Optimistic"),
                ],
            ),
            question(
                7,
                "When making a decision, what weighs more?",
                [
                    ("Objective facts and logic", "Thinking"),
                    ("How it affects people and feelings", "Feeling"),
                    ("Past experiences and traditions", "Traditional"),
                    ("Future possibilities and potential", "Visionary"),
                ],
            ),
            question(
                8,
                "Which fictional world would you survive best in?",
                [
                    ("A high-tech cyberpunk future", "Tech-savvy"),
                    ("A magical fantasy kingdom", "Imaginative"),
                    ("A post-apocalyptic survival scenario", "Resilient"),
                    ("A high-stakes political drama", "Strategic"),
                ],
            ),
        ]
    });
    &QUESTIONS
}

/// Options are lettered `a`, `b`, `c`, ... in the order given.
fn question(id: u32, prompt: &str, options: [(&str, &str); 4]) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        options: options
            .iter()
            .zip('a'..)
            .map(|((text, trait_value), letter)| AnswerOption {
                id: letter.to_string(),
                text: text.to_string(),
                trait_value: trait_value.to_string(),
            })
            .collect(),
    }
}
