//! Generation of unique constructor arguments for the deployed tokens.

use {
    rand::{Rng, SeedableRng, rngs::StdRng},
    std::{collections::HashSet, fmt},
};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RANDOM_PART_LEN: usize = 5;
const NAME_PREFIX: &str = "Token ";

/// Supply range in whole tokens, upper bound excluded.
const MIN_SUPPLY: u64 = 1_000_000;
const MAX_SUPPLY: u64 = 10_000_000;

/// Constructor arguments of a single token deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    pub name: String,
    pub symbol: String,
    /// Whole tokens as a decimal string. Scaled to 18 decimals on deployment.
    pub supply: String,
}

impl fmt::Display for TokenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// `name|symbol` keys of every spec handed out during a batch run.
#[derive(Debug, Default)]
pub struct UsedTokenSet(HashSet<String>);

impl UsedTokenSet {
    fn key(name: &str, symbol: &str) -> String {
        format!("{name}|{symbol}")
    }

    pub fn contains(&self, name: &str, symbol: &str) -> bool {
        self.0.contains(&Self::key(name, symbol))
    }

    /// Returns `false` if the pair was already taken.
    pub fn insert(&mut self, name: &str, symbol: &str) -> bool {
        self.0.insert(Self::key(name, symbol))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct TokenGenerator<R = StdRng> {
    rng: R,
    used: UsedTokenSet,
}

impl TokenGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TokenGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_used(rng, UsedTokenSet::default())
    }

    pub fn with_used(rng: R, used: UsedTokenSet) -> Self {
        Self { rng, used }
    }

    pub fn used(&self) -> &UsedTokenSet {
        &self.used
    }

    /// Draws a `(name, symbol)` pair that was never returned before by this
    /// generator and a random supply.
    pub fn generate(&mut self) -> TokenSpec {
        let (name, symbol) = loop {
            let name = format!("{NAME_PREFIX}{}", random_letters(&mut self.rng));
            let symbol = random_letters(&mut self.rng);
            if self.used.insert(&name, &symbol) {
                break (name, symbol);
            }
            tracing::debug!(%name, %symbol, "token already used, drawing again");
        };
        let supply = self.rng.gen_range(MIN_SUPPLY..MAX_SUPPLY).to_string();

        TokenSpec {
            name,
            symbol,
            supply,
        }
    }
}

fn random_letters(rng: &mut impl Rng) -> String {
    (0..RANDOM_PART_LEN)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> TokenGenerator {
        TokenGenerator::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn spec_format() {
        let spec = seeded(1).generate();

        let random_part = spec.name.strip_prefix("Token ").unwrap();
        assert_eq!(random_part.len(), 5);
        assert!(random_part.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(spec.symbol.len(), 5);
        assert!(spec.symbol.chars().all(|c| c.is_ascii_uppercase()));

        let supply: u64 = spec.supply.parse().unwrap();
        assert!((MIN_SUPPLY..MAX_SUPPLY).contains(&supply));
    }

    #[test]
    fn generated_keys_are_recorded() {
        let mut generator = seeded(2);
        let spec = generator.generate();
        assert!(generator.used().contains(&spec.name, &spec.symbol));
        assert_eq!(generator.used().len(), 1);
    }

    #[test]
    fn never_repeats_within_a_run() {
        let mut generator = seeded(3);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let spec = generator.generate();
            assert!(seen.insert((spec.name, spec.symbol)));
        }
        assert_eq!(generator.used().len(), 10_000);
    }

    #[test]
    fn redraws_taken_pairs() {
        // Same seed means the first draw reproduces `taken` exactly, so the
        // generator has to go around the loop at least once.
        let taken = seeded(4).generate();
        let mut used = UsedTokenSet::default();
        used.insert(&taken.name, &taken.symbol);

        let mut generator = TokenGenerator::with_used(StdRng::seed_from_u64(4), used);
        let spec = generator.generate();

        assert_ne!((&spec.name, &spec.symbol), (&taken.name, &taken.symbol));
        assert!(generator.used().contains(&taken.name, &taken.symbol));
        assert!(generator.used().contains(&spec.name, &spec.symbol));
        assert_eq!(generator.used().len(), 2);
    }

    #[test]
    fn display() {
        let spec = TokenSpec {
            name: "Token ABCDE".into(),
            symbol: "FGHIJ".into(),
            supply: "1000000".into(),
        };
        assert_eq!(spec.to_string(), "Token ABCDE (FGHIJ)");
    }
}
