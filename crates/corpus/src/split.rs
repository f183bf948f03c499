use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{load, CorpusError, Dataset, Result};

/// Disjoint train/test cover of one dataset.
#[derive(Clone, Debug)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

/// Draws `round(fraction * n)` rows, halves to even, for training with a seeded shuffle;
/// the remaining rows form the test set in their original order. Both
/// halves keep the input's headers and run columns.
pub fn split(dataset: &Dataset, train_fraction: f64, seed: u64) -> Result<Split> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(CorpusError::InvalidFraction(train_fraction));
    }

    let n = dataset.len();
    let n_train = ((n as f64) * train_fraction).round_ties_even() as usize;

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let (train_idx, test_idx) = order.split_at(n_train);
    let mut test_idx = test_idx.to_vec();
    test_idx.sort_unstable();

    let subset = |idx: &[usize]| Dataset {
        headers: dataset.headers.clone(),
        rows: idx.iter().map(|&i| dataset.rows[i].clone()).collect(),
        runs: dataset.runs.clone(),
    };

    Ok(Split {
        train: subset(train_idx),
        test: subset(&test_idx[..]),
    })
}

/// Loads and cleans `path`, then splits it.
pub fn load_and_split(path: &Path, train_fraction: f64, seed: u64) -> Result<Split> {
    let cleaned = load(path)?;
    split(&cleaned.dataset, train_fraction, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CorpusRow;

    fn numbered(n: usize) -> Dataset {
        Dataset::from_pairs((0..n).map(|i| CorpusRow::new(format!("o{i}"), format!("s{i}"))))
    }

    #[test]
    fn test_split_is_disjoint_cover() {
        let ds = numbered(10);
        let s = split(&ds, 0.8, 42).unwrap();
        assert_eq!(s.train.len(), 8);
        assert_eq!(s.test.len(), 2);

        let mut all: Vec<String> = s.train.pairs().chain(s.test.pairs()).map(|p| p.original.clone()).collect();
        all.sort();
        let mut expected: Vec<String> = ds.pairs().map(|p| p.original.clone()).collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_split_deterministic_for_seed() {
        let ds = numbered(25);
        let a = split(&ds, 0.7, 7).unwrap();
        let b = split(&ds, 0.7, 7).unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn test_split_test_keeps_input_order() {
        let s = split(&numbered(20), 0.5, 1).unwrap();
        let idx: Vec<usize> = s.test.pairs().map(|p| p.original[1..].parse().unwrap()).collect();
        let mut sorted = idx.clone();
        sorted.sort();
        assert_eq!(idx, sorted);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(matches!(split(&numbered(3), 1.5, 0), Err(CorpusError::InvalidFraction(_))));
    }

    #[test]
    fn test_split_rounds_half_to_even() {
        let s = split(&numbered(5), 0.5, 9).unwrap();
        assert_eq!((s.train.len(), s.test.len()), (2, 3));
        let s = split(&numbered(3), 0.5, 9).unwrap();
        assert_eq!((s.train.len(), s.test.len()), (2, 1));
    }

    #[test]
    fn test_split_edges() {
        let s = split(&numbered(4), 0.0, 3).unwrap();
        assert_eq!((s.train.len(), s.test.len()), (0, 4));
        let s = split(&numbered(4), 1.0, 3).unwrap();
        assert_eq!((s.train.len(), s.test.len()), (4, 0));
    }
}
