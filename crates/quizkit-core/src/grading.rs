//! Answer grading.
//!
//! Every function here is total: a missing or mismatched answer counts as
//! unanswered or incorrect, never as an error, so grading can run on partial
//! state in the middle of a quiz.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answer::{Answer, Answers};
use crate::model::{Question, QuestionType, Quiz};

/// Result of grading a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Points earned from correct questions.
    pub score: u64,
    /// Correct questions over total questions, in percent, two decimals.
    pub percentage: f64,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// Grade `answers` against `quiz`.
///
/// Pass/fail is decided on `percentage`, which counts questions rather than
/// points; `score` is informational.
pub fn score(quiz: &Quiz, answers: &Answers) -> ScoreSummary {
    let mut correct_count = 0usize;
    let mut points = 0u64;

    for question in &quiz.questions {
        let Some(answer) = answers.get(&question.id).filter(|a| a.is_present()) else {
            continue;
        };
        if is_correct(question, answer) {
            correct_count += 1;
            points += u64::from(question.points);
        }
    }

    let total_questions = quiz.questions.len();
    let percentage = if total_questions == 0 {
        0.0
    } else {
        round2(correct_count as f64 / total_questions as f64 * 100.0)
    };

    ScoreSummary {
        score: points,
        percentage,
        correct_count,
        total_questions,
    }
}

/// Whether a single answer is correct for its question.
pub fn is_correct(question: &Question, answer: &Answer) -> bool {
    match (question.question_type, answer) {
        (
            QuestionType::SingleChoice | QuestionType::TrueFalse | QuestionType::ImageChoice,
            Answer::Choice(id),
        ) => question.options.iter().any(|o| o.is_correct && &o.id == id),
        (QuestionType::MultipleSelect, Answer::Selection(ids)) => {
            let correct: Vec<&str> = question.correct_option_ids().collect();
            correct.len() == ids.len()
                && correct
                    .iter()
                    .all(|c| ids.iter().any(|id| id.as_str() == *c))
        }
        (QuestionType::FillBlank, Answer::Text(text)) => question
            .correct_answer
            .as_ref()
            .and_then(|c| c.as_text())
            .is_some_and(|expected| expected.trim().to_lowercase() == text.trim().to_lowercase()),
        (QuestionType::RatingScale, Answer::Rating(_)) => true,
        // Exact structural match; ordering is significant.
        (QuestionType::DragDrop, Answer::Match(value)) => question
            .correct_answer
            .as_ref()
            .is_some_and(|c| &c.to_json() == value),
        _ => false,
    }
}

/// Whether `percentage` reaches the quiz's passing threshold.
pub fn is_passed(quiz: &Quiz, percentage: f64) -> bool {
    percentage >= quiz.passing_score
}

/// Shape check on a raw answer value, independent of correctness.
///
/// Used to decide whether the current question can be submitted.
pub fn validate_answer(question: &Question, raw: &Value) -> bool {
    Answer::accept(question, raw).is_ok()
}

fn is_answered(question: &Question, answers: &Answers) -> bool {
    match answers.get(&question.id) {
        Some(Answer::Selection(ids)) => !ids.is_empty(),
        Some(_) if question.question_type == QuestionType::MultipleSelect => false,
        Some(answer) => answer.is_present(),
        None => false,
    }
}

/// Whether every question in the quiz has an answer.
pub fn all_answered(quiz: &Quiz, answers: &Answers) -> bool {
    quiz.questions.iter().all(|q| is_answered(q, answers))
}

/// Questions still lacking an answer, in quiz order.
pub fn unanswered<'a>(quiz: &'a Quiz, answers: &Answers) -> Vec<&'a Question> {
    quiz.questions
        .iter()
        .filter(|q| !is_answered(q, answers))
        .collect()
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{answers, quiz_with};
    use crate::model::{CorrectAnswer, Difficulty, QuizOption};
    use serde_json::json;

    fn option(id: &str, is_correct: bool) -> QuizOption {
        QuizOption {
            id: id.into(),
            text: id.to_uppercase(),
            is_correct,
            explanation: None,
        }
    }

    fn question(id: &str, question_type: QuestionType, points: u32) -> Question {
        Question {
            id: id.into(),
            question_type,
            prompt: format!("prompt {id}"),
            options: vec![],
            correct_answer: None,
            explanation: None,
            image_url: None,
            points,
            time_limit: None,
            difficulty: Difficulty::Medium,
            tags: vec![],
        }
    }

    fn multi_select() -> Question {
        let mut q = question("ms", QuestionType::MultipleSelect, 20);
        q.options = vec![
            option("a", true),
            option("b", false),
            option("c", true),
            option("d", false),
        ];
        q
    }

    fn fill_blank(expected: &str) -> Question {
        let mut q = question("fb", QuestionType::FillBlank, 15);
        q.correct_answer = Some(CorrectAnswer::Text(expected.into()));
        q
    }

    fn single_choice() -> Question {
        let mut q = question("sc", QuestionType::SingleChoice, 10);
        q.options = vec![option("a", false), option("b", true)];
        q
    }

    #[test]
    fn multiple_select_requires_exact_set() {
        let q = multi_select();
        let pick = |ids: &[&str]| Answer::Selection(ids.iter().map(|s| s.to_string()).collect());
        assert!(is_correct(&q, &pick(&["a", "c"])));
        assert!(is_correct(&q, &pick(&["c", "a"])));
        assert!(!is_correct(&q, &pick(&["a"])));
        assert!(!is_correct(&q, &pick(&["a", "c", "d"])));
        assert!(!is_correct(&q, &pick(&["a", "a"])));
    }

    #[test]
    fn fill_blank_ignores_case_and_whitespace() {
        let q = fill_blank("Rhodes");
        assert!(is_correct(&q, &Answer::Text(" rhodes ".into())));
        assert!(!is_correct(&q, &Answer::Text("Athens".into())));
    }

    #[test]
    fn fill_blank_with_list_answer_is_never_correct() {
        let mut q = fill_blank("x");
        q.correct_answer = Some(CorrectAnswer::List(vec!["x".into()]));
        assert!(!is_correct(&q, &Answer::Text("x".into())));
    }

    #[test]
    fn rating_scale_is_always_correct() {
        let q = question("r", QuestionType::RatingScale, 10);
        assert!(is_correct(&q, &Answer::Rating("1".into())));
    }

    #[test]
    fn drag_drop_is_order_sensitive() {
        let mut q = question("dd", QuestionType::DragDrop, 10);
        q.correct_answer = Some(CorrectAnswer::List(vec!["x".into(), "y".into()]));
        assert!(is_correct(&q, &Answer::Match(json!(["x", "y"]))));
        assert!(!is_correct(&q, &Answer::Match(json!(["y", "x"]))));
        assert!(!is_correct(&q, &Answer::Match(json!({"x": "y"}))));
    }

    #[test]
    fn mismatched_variant_is_incorrect() {
        let q = single_choice();
        assert!(is_correct(&q, &Answer::Choice("b".into())));
        assert!(!is_correct(&q, &Answer::Text("b".into())));
        assert!(!is_correct(&q, &Answer::Choice("z".into())));
    }

    #[test]
    fn empty_answers_score_zero() {
        let quiz = quiz_with(vec![single_choice(), multi_select(), fill_blank("5")], 70.0);
        let summary = score(&quiz, &Answers::new());
        assert_eq!(summary.correct_count, 0);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.total_questions, 3);
    }

    #[test]
    fn all_correct_scores_hundred() {
        let quiz = quiz_with(vec![single_choice(), multi_select(), fill_blank("5")], 70.0);
        let given = answers(&[
            ("sc", Answer::Choice("b".into())),
            ("ms", Answer::Selection(vec!["a".into(), "c".into()])),
            ("fb", Answer::Text("5".into())),
        ]);
        let summary = score(&quiz, &given);
        assert_eq!(summary.correct_count, 3);
        assert_eq!(summary.percentage, 100.0);
        assert_eq!(summary.score, 45);
    }

    #[test]
    fn percentage_counts_questions_not_points() {
        let quiz = quiz_with(vec![single_choice(), multi_select(), fill_blank("5")], 70.0);
        let given = answers(&[("ms", Answer::Selection(vec!["a".into(), "c".into()]))]);
        let summary = score(&quiz, &given);
        assert_eq!(summary.score, 20);
        assert_eq!(summary.percentage, 33.33);
    }

    #[test]
    fn empty_quiz_has_zero_percentage() {
        let quiz = quiz_with(vec![], 50.0);
        assert_eq!(score(&quiz, &Answers::new()).percentage, 0.0);
    }

    #[test]
    fn score_sums_large_points_without_overflow() {
        let mut first = fill_blank("a");
        first.id = "fb1".into();
        first.points = u32::MAX;
        let mut second = fill_blank("b");
        second.id = "fb2".into();
        second.points = u32::MAX;
        let quiz = quiz_with(vec![first, second], 50.0);
        assert_eq!(quiz.question_points(), 2 * u64::from(u32::MAX));

        let given = answers(&[
            ("fb1", Answer::Text("a".into())),
            ("fb2", Answer::Text("b".into())),
        ]);
        let summary = score(&quiz, &given);
        assert_eq!(summary.score, 2 * u64::from(u32::MAX));
        assert_eq!(summary.percentage, 100.0);
    }

    #[test]
    fn passing_boundary_is_inclusive() {
        let quiz = quiz_with(vec![], 70.0);
        assert!(is_passed(&quiz, 70.0));
        assert!(!is_passed(&quiz, 69.99));
        assert!(is_passed(&quiz, 100.0));
    }

    #[test]
    fn percentage_stays_in_range_with_two_decimals() {
        let questions: Vec<Question> = (0..7)
            .map(|i| {
                let mut q = single_choice();
                q.id = format!("q{i}");
                q
            })
            .collect();
        let quiz = quiz_with(questions, 50.0);
        for n in 0..=7 {
            let given: Answers = (0..n)
                .map(|i| (format!("q{i}"), Answer::Choice("b".into())))
                .collect();
            let p = score(&quiz, &given).percentage;
            assert!((0.0..=100.0).contains(&p));
            assert!(((p * 100.0).round() - p * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn validate_answer_checks_shape_only() {
        let q = single_choice();
        assert!(validate_answer(&q, &json!("z")));
        assert!(!validate_answer(&q, &json!("")));
        assert!(!validate_answer(&q, &Value::Null));
        assert!(validate_answer(&multi_select(), &json!(["d"])));
        assert!(!validate_answer(&multi_select(), &json!([])));
    }

    #[test]
    fn all_answered_matches_unanswered() {
        let quiz = quiz_with(vec![single_choice(), multi_select()], 70.0);

        let partial = answers(&[("sc", Answer::Choice("a".into()))]);
        assert!(!all_answered(&quiz, &partial));
        let missing: Vec<&str> = unanswered(&quiz, &partial)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(missing, vec!["ms"]);

        let empty_selection = answers(&[
            ("sc", Answer::Choice("a".into())),
            ("ms", Answer::Selection(vec![])),
        ]);
        assert!(!all_answered(&quiz, &empty_selection));
        assert_eq!(unanswered(&quiz, &empty_selection).len(), 1);

        let full = answers(&[
            ("sc", Answer::Choice("a".into())),
            ("ms", Answer::Selection(vec!["b".into()])),
        ]);
        assert!(all_answered(&quiz, &full));
        assert!(unanswered(&quiz, &full).is_empty());
    }
}
