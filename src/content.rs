//! Content generation: lorem ipsum text for document formats and
//! realistic fake rows for spreadsheets.
//!
//! Everything draws from a caller-supplied RNG so whole runs are
//! reproducible under a fixed seed.

use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::{Rng, RngCore, SeedableRng};

/// Lorem ipsum word pool for text generation
const LOREM_WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
    "duis",
    "aute",
    "irure",
    "in",
    "reprehenderit",
    "voluptate",
    "velit",
    "esse",
    "cillum",
    "fugiat",
    "nulla",
    "pariatur",
    "excepteur",
    "sint",
    "occaecat",
    "cupidatat",
    "non",
    "proident",
    "sunt",
    "culpa",
    "qui",
    "officia",
    "deserunt",
    "mollit",
    "anim",
    "id",
    "est",
    "laborum",
];

/// Build one lorem line of exactly `chars` characters.
pub fn lorem_line<R: Rng>(rng: &mut R, chars: u32) -> String {
    let chars = chars.max(1) as usize;
    let mut line = String::with_capacity(chars + 16);
    while line.len() < chars {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(LOREM_WORDS[rng.random_range(0..LOREM_WORDS.len())]);
    }
    line.truncate(chars);
    line
}

/// Build one lorem paragraph of roughly `chars` characters, sentence-cased.
pub fn lorem_paragraph<R: Rng>(rng: &mut R, chars: u32) -> String {
    let mut paragraph = lorem_line(rng, chars);
    if let Some(first) = paragraph.get(0..1) {
        let upper = first.to_uppercase();
        paragraph.replace_range(0..1, &upper);
    }
    paragraph.push('.');
    paragraph
}

/// One realistic spreadsheet row.
#[derive(Debug, Clone)]
pub struct RowRecord {
    pub name: String,
    pub email: String,
    pub company: String,
    pub city: String,
    pub phone: String,
    pub amount: f64,
    pub date: String,
}

impl RowRecord {
    pub const HEADERS: &'static [&'static str] =
        &["name", "email", "company", "city", "phone", "amount", "date"];
}

/// Generator for realistic rows, wrapping the `fake` crate.
///
/// The locale is carried from configuration; generation currently uses the
/// `en` fakers for every locale.
#[derive(Debug, Clone)]
pub struct RowGenerator {
    locale: String,
}

impl RowGenerator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Generate one row from the caller's RNG stream.
    pub fn row(&self, rng: &mut dyn RngCore) -> RowRecord {
        // Re-seed a StdRng from the caller's stream for fake crate compatibility
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let mut fake_rng = rand::rngs::StdRng::from_seed(seed);

        let year = fake_rng.random_range(2015..2026);
        let month = fake_rng.random_range(1..=12u32);
        let day = fake_rng.random_range(1..=28u32);

        RowRecord {
            name: Name().fake_with_rng(&mut fake_rng),
            email: SafeEmail().fake_with_rng(&mut fake_rng),
            company: CompanyName().fake_with_rng(&mut fake_rng),
            city: CityName().fake_with_rng(&mut fake_rng),
            phone: PhoneNumber().fake_with_rng(&mut fake_rng),
            amount: (fake_rng.random_range(100..1_000_000) as f64) / 100.0,
            date: format!("{:04}-{:02}-{:02}", year, month, day),
        }
    }
}
