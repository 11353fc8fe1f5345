//! Filtering of question records and quiz question selection.
//!
//! Everything here works over an already loaded table, so the same rules apply
//! whatever storage engine produced the rows.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Conjunction of optional predicates over [`Question`] records.
#[derive(Debug, Default, Clone)]
pub struct QuestionFilter {
    category: Option<i64>,
    // stored lowercased
    search_term: Option<String>,
    excluded: HashSet<i64>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category = Some(category_id);
        self
    }

    /// Case-insensitive substring match on the question text.
    pub fn containing(mut self, term: &str) -> Self {
        self.search_term = Some(term.to_lowercase());
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.excluded.extend(ids);
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        if self.excluded.contains(&question.id) {
            return false;
        }
        if self.category.is_some_and(|category| category != question.category) {
            return false;
        }
        match &self.search_term {
            Some(term) => question.question.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    /// Keeps the matching questions, preserving their order.
    pub fn apply(&self, mut questions: Vec<Question>) -> Vec<Question> {
        questions.retain(|question| self.matches(question));
        questions
    }
}

pub fn search_questions(questions: Vec<Question>, term: &str) -> Vec<Question> {
    QuestionFilter::new().containing(term).apply(questions)
}

/// Picks one question uniformly at random among those not yet seen.
///
/// A `category_id` of `None` or `Some(0)` draws from every category. Returns
/// `None` once every candidate has been excluded.
pub fn select_quiz_question<R>(
    questions: Vec<Question>,
    previous_ids: &HashSet<i64>,
    category_id: Option<i64>,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let mut filter = QuestionFilter::new().excluding(previous_ids.iter().copied());
    if let Some(category_id) = category_id.filter(|id| *id != 0) {
        filter = filter.in_category(category_id);
    }
    let candidates = filter.apply(questions);
    candidates.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;

    fn question(id: i64, text: &str, category: i64) -> Question {
        Question {
            id,
            question: text.to_owned(),
            answer: format!("answer {id}"),
            category,
            difficulty: 1,
        }
    }

    fn table() -> Vec<Question> {
        vec![
            question(1, "The Title of the book", 1),
            question(2, "no match", 1),
            question(3, "Which planet is red?", 2),
            question(4, "What TITLE did he hold?", 2),
            question(5, "Largest ocean", 3),
        ]
    }

    fn ids(questions: &[Question]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let found = search_questions(
            vec![question(1, "The Title", 1), question(2, "no match", 1)],
            "title",
        );

        assert_eq!(found, vec![question(1, "The Title", 1)]);
    }

    #[rstest]
    #[case("title", vec![1, 4])]
    #[case("TITLE", vec![1, 4])]
    #[case("planet", vec![3])]
    #[case("", vec![1, 2, 3, 4, 5])]
    #[case("zebra", vec![])]
    fn search_keeps_table_order(#[case] term: &str, #[case] expected: Vec<i64>) {
        assert_eq!(ids(&search_questions(table(), term)), expected);
    }

    #[test]
    fn filters_combine() {
        let filter = QuestionFilter::new()
            .in_category(2)
            .containing("what")
            .excluding([3]);

        assert_eq!(ids(&filter.apply(table())), vec![4]);
    }

    #[test]
    fn quiz_never_returns_a_previous_question() {
        let previous: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let picked = select_quiz_question(table(), &previous, None, &mut rng).unwrap();
            assert!(!previous.contains(&picked.id));
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn quiz_respects_category(#[case] category: i64) {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let picked =
                select_quiz_question(table(), &HashSet::new(), Some(category), &mut rng).unwrap();
            assert_eq!(picked.category, category);
        }
    }

    #[test]
    fn zero_category_means_all_categories() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let picked = select_quiz_question(table(), &HashSet::new(), Some(0), &mut rng).unwrap();
            seen.insert(picked.category);
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn quiz_returns_none_when_everything_was_seen() {
        let previous: HashSet<i64> = ids(&table()).into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(select_quiz_question(table(), &previous, None, &mut rng), None);
    }

    #[test]
    fn quiz_returns_none_for_exhausted_category() {
        let previous: HashSet<i64> = [5].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            select_quiz_question(table(), &previous, Some(3), &mut rng),
            None
        );
    }

    #[test]
    fn quiz_returns_none_for_empty_table() {
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            select_quiz_question(Vec::new(), &HashSet::new(), None, &mut rng),
            None
        );
    }
}
