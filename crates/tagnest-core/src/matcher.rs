//! Per-token partner lookup.
//!
//! [`find_partner`] is a local search from one token; [`match_results`]
//! pairs every token in a single pass. Neither consults the validator. The two can disagree on malformed input: in
//! `<a><b></a></b>` every token has a partner here, while the validator
//! reports a mismatch and an unclosed tag.

use std::collections::HashMap;

use serde::Serialize;
use strum_macros::Display;

use crate::tokenizer::TagToken;

/// Highlighting status of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    /// The token has a partner.
    Matched,
    /// A closing tag with no opening partner.
    Unmatched,
    /// An opening tag with no closing partner.
    Unclosed,
}

/// Partner lookup result for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Index of the token.
    pub index: usize,
    /// Index of its partner, if any.
    pub partner: Option<usize>,
    /// Status derived from the partner and the token's direction.
    pub status: TagStatus,
}

impl MatchResult {
    fn new(index: usize, partner: Option<usize>, is_closing: bool) -> Self {
        let status = match (partner, is_closing) {
            (Some(_), _) => TagStatus::Matched,
            (None, true) => TagStatus::Unmatched,
            (None, false) => TagStatus::Unclosed,
        };
        Self {
            index,
            partner,
            status,
        }
    }

    /// Returns true if a partner was found.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.partner.is_some()
    }
}

/// Find the partner of the token at `index`.
///
/// A closing tag searches backward and an opening tag forward. Only tokens
/// with the same name count. Same-name tokens pointing the same way as the
/// target nest one level deeper; a same-name token pointing the other way is
/// the partner at depth zero and closes one level otherwise.
///
/// Returns `None` when no partner exists or `index` is out of range.
#[must_use]
pub fn find_partner(tokens: &[TagToken], index: usize) -> Option<usize> {
    let target = tokens.get(index)?;
    let same_name = |&(_, token): &(usize, &TagToken)| token.name == target.name;

    let mut depth = 0usize;
    let mut visit = |(i, token): (usize, &TagToken)| {
        if token.is_closing == target.is_closing {
            depth += 1;
            None
        } else if depth == 0 {
            Some(i)
        } else {
            depth -= 1;
            None
        }
    };

    if target.is_closing {
        tokens[..index]
            .iter()
            .enumerate()
            .rev()
            .filter(same_name)
            .find_map(&mut visit)
    } else {
        tokens
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(same_name)
            .find_map(&mut visit)
    }
}

/// Look up the partner of the token at `index` and derive its status.
///
/// Returns `None` if `index` is out of range.
#[must_use]
pub fn match_at(tokens: &[TagToken], index: usize) -> Option<MatchResult> {
    let token = tokens.get(index)?;
    Some(MatchResult::new(
        index,
        find_partner(tokens, index),
        token.is_closing,
    ))
}

/// Compute a [`MatchResult`] for every token.
///
/// Same-name tokens pair off like brackets, so one pass with a stack of
/// open indices per name gives the same partners as [`find_partner`] on
/// each index.
#[must_use]
pub fn match_results(tokens: &[TagToken]) -> Vec<MatchResult> {
    let mut partners: Vec<Option<usize>> = vec![None; tokens.len()];
    let mut open: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.is_closing {
            if let Some(opener) = open.get_mut(token.name.as_str()).and_then(Vec::pop) {
                partners[opener] = Some(index);
                partners[index] = Some(opener);
            }
        } else {
            open.entry(token.name.as_str()).or_default().push(index);
        }
    }

    tokens
        .iter()
        .zip(partners)
        .enumerate()
        .map(|(index, (token, partner))| MatchResult::new(index, partner, token.is_closing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn partners(input: &str) -> Vec<Option<usize>> {
        let tokens = tokenize(input);
        (0..tokens.len()).map(|i| find_partner(&tokens, i)).collect()
    }

    #[test]
    fn test_simple_nesting() {
        assert_eq!(
            partners("<a><b></b></a>"),
            vec![Some(3), Some(2), Some(1), Some(0)]
        );
    }

    #[test]
    fn test_same_name_nesting() {
        // <div><div></div></div>
        assert_eq!(
            partners("<div><div></div></div>"),
            vec![Some(3), Some(2), Some(1), Some(0)]
        );
    }

    #[test]
    fn test_unpaired_tokens() {
        assert_eq!(partners("<a></b>"), vec![None, None]);
        assert_eq!(partners("</a><a>"), vec![None, None]);
    }

    #[test]
    fn test_extra_opener_takes_inner_partner() {
        // The inner <p> pairs with </p>; the outer one stays open.
        assert_eq!(partners("<p><p></p>"), vec![None, Some(2), Some(1)]);
    }

    #[test]
    fn test_status_labels() {
        let tokens = tokenize("<a></b></a><c>");
        let statuses: Vec<TagStatus> = match_results(&tokens).iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![
                TagStatus::Matched,
                TagStatus::Unmatched,
                TagStatus::Matched,
                TagStatus::Unclosed
            ]
        );
        assert_eq!(TagStatus::Unclosed.to_string(), "Unclosed");
    }

    #[test]
    fn test_out_of_range_index() {
        let tokens = tokenize("<a></a>");
        assert_eq!(find_partner(&tokens, 7), None);
        assert_eq!(match_at(&tokens, 7), None);
        assert_eq!(match_at(&[], 0), None);
    }

    #[test]
    fn test_match_at_single_index() {
        let tokens = tokenize("<a></b></a>");
        let result = match_at(&tokens, 1).unwrap();
        assert_eq!(result.partner, None);
        assert_eq!(result.status, TagStatus::Unmatched);
        assert_eq!(match_at(&tokens, 2).unwrap().partner, Some(0));
    }

    #[test]
    fn test_one_pass_agrees_with_single_lookups() {
        let mut generated = String::new();
        for i in 0..200 {
            // Mix nesting, stray closers and leftovers across three names.
            match i % 7 {
                0 | 3 => generated.push_str("<a>"),
                1 => generated.push_str("<b><a>"),
                2 | 5 => generated.push_str("</a>"),
                4 => generated.push_str("</b></c>"),
                _ => generated.push_str("<c></b>"),
            }
        }
        let inputs = [
            "<a><b></a></b>",
            "<a></b></a>",
            "<a><b></b></a>",
            "</a><a></a></a><a>",
            "<p><p></p>",
            generated.as_str(),
        ];
        for input in inputs {
            let tokens = tokenize(input);
            let all = match_results(&tokens);
            assert_eq!(all.len(), tokens.len());
            for (i, result) in all.iter().enumerate() {
                assert_eq!(Some(*result), match_at(&tokens, i), "{input} at {i}");
            }
        }
    }

    #[test]
    fn test_long_run_of_openers() {
        let tokens = tokenize(&"<a>".repeat(100_000));
        let all = match_results(&tokens);
        assert!(all.iter().all(|m| m.status == TagStatus::Unclosed));
    }
}
