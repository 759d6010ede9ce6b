//! Pseudo-random user data for simulated traffic

use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "ana", "bruno", "carla", "daniel", "elena", "felipe", "giulia", "hugo", "ines", "jonas",
    "keiko", "lucas", "marta", "nadia", "oscar", "paula", "quentin", "rosa", "sofia", "tomas",
    "ursula", "victor", "wendy", "yuki", "zoe",
];

const LAST_NAMES: &[&str] = &[
    "almeida", "barros", "castro", "dias", "evans", "ferreira", "garcia", "hayashi", "ito",
    "jensen", "kowalski", "lopes", "martins", "nakamura", "oliveira", "pereira", "rocha",
    "santos", "tanaka", "ueda", "vieira", "walker", "yamamoto", "zimmer",
];

const TLDS: &[&str] = &["com", "net", "org", "info", "biz", "io"];

const WORDS: &[&str] = &[
    "about", "answer", "between", "bring", "change", "class", "common", "country", "develop",
    "during", "early", "enough", "family", "father", "follow", "friend", "garden", "group",
    "history", "house", "idea", "language", "listen", "market", "memory", "morning", "music",
    "nature", "number", "office", "people", "picture", "question", "reason", "school", "second",
    "sentence", "simple", "story", "student", "tutor", "travel", "voice", "water", "window",
    "within", "word", "world", "write", "young",
];

const SPECIAL_CHARS: &[u8] = b"!@#$%^&*()_+";
const DIGITS: &[u8] = b"0123456789";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generator of names, passwords, domains and numbers
///
/// Each simulated user owns one, so seeding it makes a user's whole
/// traffic reproducible.
#[derive(Debug, Clone)]
pub struct FakeData {
    rng: StdRng,
}

impl FakeData {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// The underlying generator, for callers that need their own draws
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn first_name(&mut self) -> &'static str {
        *pick(&mut self.rng, FIRST_NAMES)
    }

    pub fn last_name(&mut self) -> &'static str {
        *pick(&mut self.rng, LAST_NAMES)
    }

    /// A lowercase user name such as `ana.castro`, `tanaka.keiko`, `hugo42` or `rsantos`
    pub fn user_name(&mut self) -> String {
        let first = self.first_name();
        let last = self.last_name();
        match self.rng.random_range(0..4) {
            0 => format!("{}.{}", first, last),
            1 => format!("{}.{}", last, first),
            2 => format!("{}{:02}", first, self.rng.random_range(0..100)),
            _ => {
                let initial = char::from(*pick(&mut self.rng, LOWER));
                format!("{}{}", initial, last)
            }
        }
    }

    /// A password of `length` characters
    ///
    /// Lengths of four or more contain at least one special character,
    /// digit, uppercase and lowercase letter.
    pub fn password(&mut self, length: usize) -> String {
        let classes = [SPECIAL_CHARS, DIGITS, UPPER, LOWER];
        let mut chars: Vec<u8> = Vec::with_capacity(length);

        if length >= classes.len() {
            for class in classes {
                chars.push(*pick(&mut self.rng, class));
            }
        }

        let all: Vec<u8> = classes.concat();
        while chars.len() < length {
            chars.push(*pick(&mut self.rng, &all));
        }

        chars.shuffle(&mut self.rng);
        chars.into_iter().map(char::from).collect()
    }

    /// `len` ASCII letters and digits
    pub fn alphanumeric(&mut self, len: usize) -> String {
        Alphanumeric.sample_string(&mut self.rng, len)
    }

    /// A domain such as `rocha.net`
    pub fn domain_name(&mut self) -> String {
        let word = self.last_name();
        let tld = pick(&mut self.rng, TLDS);
        format!("{}.{}", word, tld)
    }

    /// A random dictionary word
    pub fn word(&mut self) -> &'static str {
        *pick(&mut self.rng, WORDS)
    }

    /// A sentence of `words` words, capitalised and terminated with a period
    pub fn sentence(&mut self, words: usize) -> String {
        let mut text = (0..words.max(1))
            .map(|_| self.word())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = text.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        text.push('.');
        text
    }

    /// A number with exactly `digits` decimal digits (1 to 9)
    pub fn number_with_digits(&mut self, digits: u32) -> u32 {
        let digits = digits.clamp(1, 9);
        let low = if digits == 1 { 0 } else { 10u32.pow(digits - 1) };
        let high = 10u32.pow(digits);
        self.rng.random_range(low..high)
    }

    /// A number in `[low, high]`
    pub fn number_between(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // All tables are non-empty constants
    items
        .choose(rng)
        .unwrap_or_else(|| unreachable!("empty fake data table"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let mut a = FakeData::from_seed(7);
        let mut b = FakeData::from_seed(7);

        assert_eq!(a.user_name(), b.user_name());
        assert_eq!(a.password(10), b.password(10));
        assert_eq!(a.domain_name(), b.domain_name());
    }

    #[test]
    fn test_names_and_words_come_from_tables() {
        let mut fake = FakeData::from_seed(6);
        for _ in 0..50 {
            let first: &'static str = fake.first_name();
            let last: &'static str = fake.last_name();
            let word: &'static str = fake.word();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
            assert!(WORDS.contains(&word));
        }
    }

    #[test]
    fn test_password_character_classes() {
        let mut fake = FakeData::from_seed(1);
        for _ in 0..200 {
            let password = fake.password(10);
            assert_eq!(password.chars().count(), 10);
            assert!(password.bytes().any(|c| SPECIAL_CHARS.contains(&c)));
            assert!(password.bytes().any(|c| c.is_ascii_digit()));
            assert!(password.bytes().any(|c| c.is_ascii_uppercase()));
            assert!(password.bytes().any(|c| c.is_ascii_lowercase()));
        }

        assert_eq!(fake.password(2).len(), 2);
        assert!(fake.password(0).is_empty());
    }

    #[test]
    fn test_alphanumeric_and_domain_shape() {
        let mut fake = FakeData::from_seed(2);
        for _ in 0..100 {
            let local = fake.alphanumeric(10);
            assert_eq!(local.len(), 10);
            assert!(local.chars().all(|c| c.is_ascii_alphanumeric()));

            let domain = fake.domain_name();
            let (name, tld) = domain.split_once('.').unwrap();
            assert!(!name.is_empty());
            assert!(TLDS.contains(&tld));
        }
    }

    #[test]
    fn test_number_with_digits_range() {
        let mut fake = FakeData::from_seed(3);
        for _ in 0..500 {
            let two = fake.number_with_digits(2);
            assert!((10..100).contains(&two), "{} is not two digits", two);

            let four = fake.number_with_digits(4);
            assert!((1000..10000).contains(&four), "{} is not four digits", four);

            assert!(fake.number_with_digits(1) < 10);
        }
    }

    #[test]
    fn test_user_names_and_sentences() {
        let mut fake = FakeData::from_seed(4);
        for _ in 0..100 {
            let name = fake.user_name();
            assert!(!name.is_empty());
            assert_eq!(name, name.to_lowercase());
        }

        let sentence = fake.sentence(4);
        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
        assert_eq!(sentence.split_whitespace().count(), 4);
    }

    #[test]
    fn test_number_between_bounds() {
        let mut fake = FakeData::from_seed(5);
        for _ in 0..100 {
            let n = fake.number_between(20, 30);
            assert!((20..=30).contains(&n));
        }
        assert_eq!(fake.number_between(8, 8), 8);
        assert_eq!(fake.number_between(9, 3), 9);
    }
}
