//! Choosing an output when some of them are not allowed.
//!
//! Game collaborators map each output neuron to a move and reject the ones
//! that are illegal in the current position.

use std::cmp::Ordering;

use crate::error::{NetworkError, Result};

/// Walks `outputs` from the largest value down and returns the first index
/// `is_available` accepts. Ties go to the lower index; NaN ranks last.
///
/// Fails with `NoValidSelection` once every index has been rejected.
pub fn ranked_choice<F>(outputs: &[f64], mut is_available: F) -> Result<usize>
where
    F: FnMut(usize) -> bool,
{
    let mut ranked: Vec<usize> = (0..outputs.len()).collect();
    ranked.sort_by(|&a, &b| descending(outputs[a], outputs[b]));

    ranked
        .into_iter()
        .find(|&i| is_available(i))
        .ok_or(NetworkError::NoValidSelection)
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_best_available() {
        let outputs = [0.2, 0.9, 0.5, 0.7];
        assert_eq!(ranked_choice(&outputs, |_| true).unwrap(), 1);
        assert_eq!(ranked_choice(&outputs, |i| i != 1).unwrap(), 3);
        assert_eq!(ranked_choice(&outputs, |i| i == 0 || i == 2).unwrap(), 2);
    }

    #[test]
    fn ties_prefer_lower_index_and_nan_ranks_last() {
        assert_eq!(ranked_choice(&[0.5, 0.5], |_| true).unwrap(), 0);
        assert_eq!(ranked_choice(&[f64::NAN, -0.9], |_| true).unwrap(), 1);
    }

    #[test]
    fn exhausting_candidates_fails() {
        let mut asked = vec![];
        let err = ranked_choice(&[0.1, 0.3, 0.2], |i| {
            asked.push(i);
            false
        })
        .unwrap_err();

        assert_eq!(err, NetworkError::NoValidSelection);
        assert_eq!(asked, vec![1, 2, 0]);
        assert_eq!(ranked_choice(&[], |_| true).unwrap_err(), NetworkError::NoValidSelection);
    }
}
