//! Random text generation for payload fields.

use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Amelia", "Bianca", "Carlos", "Chen", "Dalia", "Elena", "Farah", "Gustav", "Hana",
    "Ines", "Jonas", "Kavya", "Lars", "Maya", "Nikhil", "Olga", "Pedro", "Quinn", "Rosa",
    "Sanjay", "Tomas", "Uma", "Vera", "Wen", "Yusuf", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bhatt", "Castillo", "Dubois", "Eriksen", "Fischer", "Gupta", "Haddad", "Ivanova",
    "Jensen", "Kowalski", "Lopez", "Mehta", "Nakamura", "Okafor", "Patel", "Quintero", "Rossi",
    "Singh", "Tanaka", "Urban", "Varga", "Walsh", "Yilmaz", "Zhou",
];

const WORDS: &[&str] = &[
    "alias", "amet", "aperiam", "beatae", "blanditiis", "cogito", "corporis", "cupiditate",
    "debitis", "deleniti", "dolor", "eius", "eligendi", "error", "facilis", "fugiat", "harum",
    "illum", "incidunt", "ipsum", "iusto", "labore", "laudantium", "lorem", "magnam", "minima",
    "molestiae", "nemo", "nostrum", "officia", "omnis", "pariatur", "placeat", "quaerat",
    "quibusdam", "ratione", "recusandae", "sapiente", "similique", "sint", "tempora", "totam",
    "ullam", "velit", "veniam", "voluptas",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or("lorem")
}

/// Returns a random "First Last" name.
pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// Returns a practically unique email address.
///
/// Uniqueness comes from the millisecond timestamp plus a random suffix, never
/// from a shared counter.
pub fn unique_email(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}@example.com",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..12]
    )
}

/// Returns a capitalised sentence of 4 to 10 words ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.random_range(4..=10);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, WORDS)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(..1) {
        let upper = first.to_uppercase();
        sentence.replace_range(..1, &upper);
    }
    sentence.push('.');
    sentence
}

/// Returns a paragraph of 3 to 6 sentences.
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.random_range(3..=6);
    (0..count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `count` paragraphs separated by blank lines.
pub fn paragraphs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| paragraph(rng))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_has_two_parts() {
        let name = full_name(&mut rand::rng());
        assert_eq!(name.split(' ').count(), 2);
    }

    #[test]
    fn test_unique_email_shape() {
        let a = unique_email("testuser");
        let b = unique_email("testuser");
        assert!(a.starts_with("testuser_"));
        assert!(a.ends_with("@example.com"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sentence_is_capitalised() {
        let s = sentence(&mut rand::rng());
        assert!(s.ends_with('.'));
        assert!(s.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_paragraphs_count() {
        let text = paragraphs(&mut rand::rng(), 2);
        assert_eq!(text.split("\n\n").count(), 2);
    }
}
