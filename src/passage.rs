use rand::seq::SliceRandom;
use rand::Rng;

/// Candidate passages. Never empty.
pub const PASSAGES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "Typing tests are a great way to improve your speed and accuracy.",
    "Practice makes perfect, so keep typing every day!",
    "JavaScript powers interactive web applications everywhere.",
    "Learning to type faster can boost your productivity significantly.",
];

/// Picks one passage uniformly at random.
pub fn select_passage<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PASSAGES.choose(rng).copied().unwrap_or(PASSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_passages_not_empty() {
        assert!(!PASSAGES.is_empty());
        for passage in PASSAGES {
            assert!(!passage.is_empty());
        }
    }

    #[test]
    fn test_select_passage_is_from_set() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let passage = select_passage(&mut rng);
            assert!(PASSAGES.contains(&passage));
        }
    }

    #[test]
    fn test_select_passage_same_seed_same_choice() {
        let a = select_passage(&mut StdRng::seed_from_u64(7));
        let b = select_passage(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_passage_covers_whole_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<&str> = (0..500).map(|_| select_passage(&mut rng)).collect();
        assert_eq!(seen.len(), PASSAGES.len());
    }
}
