//! Random, always-valid posts for seeding a store.

use rand::{distributions::Alphanumeric, seq::SliceRandom, Rng};

use crate::models::{Author, NewPost};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn name(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(3..10);
    let raw: String = (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_lowercase(),
        None => raw,
    }
}

fn words(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn new_post(rng: &mut impl Rng) -> NewPost {
    let title_len = rng.gen_range(2..7);
    let content_len = rng.gen_range(20..60);
    NewPost {
        author: Author::new(name(rng), name(rng)),
        title: words(rng, title_len),
        content: words(rng, content_len),
    }
}

pub fn new_posts(rng: &mut impl Rng, count: usize) -> Vec<NewPost> {
    (0..count).map(|_| new_post(rng)).collect()
}
