//! Ranking and selection of questions and answers.
//!
//! Questions without answers are dropped before counting, so they never use
//! up a slot. Both sorts are stable and descending: equal scores keep the
//! order the providers returned them in.

use crate::config::SelectionLimits;
use crate::types::{Answer, Question};
use std::cmp::Reverse;

/// Keep the best questions, each with its best answers.
///
/// ```rust
/// use soq_core::{Question, SelectionLimits, ranking::select};
///
/// let unanswered = Question::new(1, "Nobody knows", "https://stackoverflow.com/q/1", 99);
/// let picked = select(vec![unanswered], SelectionLimits::new(3, 3)?);
/// assert!(picked.is_empty());
/// # Ok::<(), soq_core::Error>(())
/// ```
pub fn select(questions: Vec<Question>, limits: SelectionLimits) -> Vec<Question> {
    let mut kept: Vec<Question> = questions
        .into_iter()
        .filter(|question| !question.answers.is_empty())
        .collect();

    kept.sort_by_key(|question| Reverse(question.upvotes));
    kept.truncate(limits.questions());

    for question in &mut kept {
        rank_answers(&mut question.answers, limits.answers());
    }

    kept
}

/// Sort answers by score, highest first, and keep at most `limit`.
pub fn rank_answers(answers: &mut Vec<Answer>, limit: usize) {
    answers.sort_by_key(|answer| Reverse(answer.score));
    answers.truncate(limit);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answer(author: &str, score: i64) -> Answer {
        Answer {
            title: "t".into(),
            author: author.into(),
            score,
            body: String::new(),
            link: format!("https://stackoverflow.com/a/{author}"),
            accepted: false,
            date: None,
        }
    }

    fn question(id: u64, upvotes: i64, scores: &[i64]) -> Question {
        let mut q = Question::new(id, format!("q{id}"), format!("https://stackoverflow.com/q/{id}"), upvotes);
        q.answers = scores
            .iter()
            .enumerate()
            .map(|(i, s)| answer(&format!("{id}-{i}"), *s))
            .collect();
        q
    }

    fn ids(questions: &[Question]) -> Vec<u64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let input = vec![
            question(1, 5, &[1]),
            question(2, 5, &[1]),
            question(3, 3, &[1]),
            question(4, 5, &[1]),
        ];
        let picked = select(input, SelectionLimits::new(3, 3).unwrap());
        assert_eq!(ids(&picked), vec![1, 2, 4]);
    }

    #[test]
    fn test_unanswered_questions_do_not_use_a_slot() {
        let input = vec![
            question(1, 100, &[]),
            question(2, 1, &[4]),
            question(3, 50, &[]),
            question(4, 2, &[9]),
        ];
        let picked = select(input, SelectionLimits::new(2, 1).unwrap());
        assert_eq!(ids(&picked), vec![4, 2]);
    }

    #[test]
    fn test_answers_are_ranked_and_truncated() {
        let input = vec![question(7, 1, &[3, -1, 10, 3])];
        let picked = select(input, SelectionLimits::new(1, 3).unwrap());
        let scores: Vec<i64> = picked[0].answers.iter().map(|a| a.score).collect();
        assert_eq!(scores, vec![10, 3, 3]);
        // Equal scores keep their original order.
        assert_eq!(picked[0].answers[1].author, "7-0");
        assert_eq!(picked[0].answers[2].author, "7-3");
    }

    #[test]
    fn test_single_slot_takes_the_top_question() {
        let input = vec![question(1, -3, &[1]), question(2, 0, &[1])];
        let picked = select(input, SelectionLimits::new(1, 1).unwrap());
        assert_eq!(ids(&picked), vec![2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(select(Vec::new(), SelectionLimits::new(10, 10).unwrap()).is_empty());
    }

    proptest! {
        #[test]
        fn test_selection_respects_bounds_and_order(
            upvotes in prop::collection::vec(-50i64..50, 0..20),
            answer_counts in prop::collection::vec(0usize..6, 20),
            q in 1i64..=10,
            a in 1i64..=10,
        ) {
            let input: Vec<Question> = upvotes
                .iter()
                .enumerate()
                .map(|(i, up)| {
                    let scores: Vec<i64> = (0..answer_counts[i]).map(|s| s as i64 - 2).collect();
                    question(i as u64, *up, &scores)
                })
                .collect();
            let answered = input.iter().filter(|q| !q.answers.is_empty()).count();

            let picked = select(input, SelectionLimits::new(q, a).unwrap());

            prop_assert_eq!(picked.len(), answered.min(q as usize));
            for pair in picked.windows(2) {
                prop_assert!(pair[0].upvotes >= pair[1].upvotes);
                if pair[0].upvotes == pair[1].upvotes {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
            for question in &picked {
                prop_assert!(!question.answers.is_empty());
                prop_assert!(question.answers.len() <= a as usize);
                for pair in question.answers.windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }
    }
}
