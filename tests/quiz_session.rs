//! Quiz sessions over the built-in question bank.

use cvti_scorer::questions::{QuestionBank, QuizSession};
use cvti_scorer::{Axis, CvtiError, CvtiScorer, QuestionBankError, ScamCategory};
use std::fs;
use tempfile::TempDir;

/// Index of the first choice on `question` whose impact satisfies `pred`.
fn find_choice(
    bank: &QuestionBank,
    index: usize,
    pred: impl Fn(&cvti_scorer::AnswerImpact) -> bool,
) -> usize {
    bank.questions[index]
        .choices
        .iter()
        .position(|c| pred(&c.impact))
        .unwrap()
}

#[test]
fn test_builtin_bank_order_and_coverage() {
    let bank = QuestionBank::builtin().unwrap();
    let ids: Vec<u32> = bank.questions.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 7, 2, 12, 13, 15, 8, 9, 10, 14, 5, 6, 11, 16]);

    for question in &bank.questions {
        assert!(!question.situation.is_empty());
        assert!(question.choices.iter().all(|c| !c.impact.is_empty()));
    }
}

#[test]
fn test_right_leaning_session() {
    let bank = QuestionBank::builtin().unwrap();
    let mut session = QuizSession::new(&bank);

    for index in 0..bank.len() {
        let axis = bank.questions[index].axis.unwrap();
        let choice = find_choice(&bank, index, |impact| match axis {
            Axis::Tq => impact.q > 0,
            Axis::Sn => impact.n > 0,
            Axis::Pg => impact.g > 0,
            Axis::Jp => impact.j > 0,
        });
        session.choose(choice).unwrap();
    }

    let result = session.finish(&mut CvtiScorer::seeded(4)).unwrap();
    assert_eq!(result.cvti.to_string(), "QNGJ");
    assert_eq!(result.scam_type, ScamCategory::InfoOverconfident);
}

#[test]
fn test_apathy_on_one_axis_only() {
    let bank = QuestionBank::builtin().unwrap();
    let mut session = QuizSession::new(&bank);

    for index in 0..bank.len() {
        let question = &bank.questions[index];
        let choice = if question.axis == Some(Axis::Sn) {
            find_choice(&bank, index, |impact| impact.osn > 0)
        } else {
            0
        };
        session.choose(choice).unwrap();
    }

    // four OSN answers are past the certain threshold
    let result = session.finish(&mut CvtiScorer::seeded(4)).unwrap();
    assert_eq!(result.cvti.to_string(), "TOPP");
    assert_eq!(result.o_axes_count, 1);
    assert_eq!(result.scam_type, ScamCategory::ProceduralFaith);
}

#[test]
fn test_progress_reporting() {
    let bank = QuestionBank::builtin().unwrap();
    let mut session = QuizSession::new(&bank);
    assert_eq!(session.progress_percent(), 100.0 / 16.0);

    session.skip().unwrap();
    session.choose(1).unwrap();
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.progress_percent(), 3.0 / 16.0 * 100.0);
    assert!(session.answers()[0].is_none());
    assert_eq!(session.answers()[1].unwrap().q, 1);
}

#[test]
fn test_invalid_choice_is_input_error() {
    let bank = QuestionBank::builtin().unwrap();
    let mut session = QuizSession::new(&bank);
    let err = session.choose(42).unwrap_err();
    assert!(matches!(err, CvtiError::InvalidInput(_)));
    assert!(err.user_message().contains("question 1"));
}

#[test]
fn test_custom_bank_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bank.json");
    fs::write(
        &path,
        r#"{"questions": [
            {"id": 100, "axis": "PG", "situation": "택배 문자",
             "choices": [{"text": "링크", "impact": {"G": 2}}, {"text": "무시", "impact": {"OPG": 3}}]}
        ]}"#,
    )
    .unwrap();

    let bank = QuestionBank::load_from_file(&path).unwrap();
    let mut session = QuizSession::new(&bank);
    session.choose(1).unwrap();
    let result = session.finish(&mut CvtiScorer::seeded(0)).unwrap();
    assert_eq!(result.cvti.to_string(), "QSOJ");
    assert_eq!(result.scam_type, ScamCategory::EmotionalEmpathy);

    fs::write(&path, r#"{"questions": []}"#).unwrap();
    assert!(matches!(
        QuestionBank::load_from_file(&path),
        Err(QuestionBankError::ValidationFailed(_))
    ));
}
