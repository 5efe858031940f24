//! Random strings, UUIDs and shuffles.
//!
//! Randomness comes from a [`RandomSource`]. The plain functions use the
//! per-thread `fastrand` generator; the `_with` variants take any source, so
//! callers can pass a seeded `fastrand::Rng` for reproducible output. None of
//! this is suitable for secrets.

use rhai::Engine;
use std::sync::{Arc, Mutex, PoisonError};

use crate::chars::clamp_len;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX_DIGITS: &[u8] = b"0123456789abcdef";
const UUID_VARIANT_DIGITS: &[u8] = b"89ab";

/// A source of uniformly distributed indices
pub trait RandomSource {
    /// Value in `0..bound`. Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.usize(..bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// The calling thread's global `fastrand` generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        fastrand::usize(..bound)
    }
}

/// Adapts a closure into a [`RandomSource`]
pub struct FnRandom<F>(pub F);

impl<F: FnMut(usize) -> usize> RandomSource for FnRandom<F> {
    fn next_index(&mut self, bound: usize) -> usize {
        (self.0)(bound) % bound
    }
}

fn pick(rng: &mut impl RandomSource, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.next_index(alphabet.len())])
}

fn random_from_alphabet(rng: &mut impl RandomSource, length: i64, alphabet: &[u8]) -> String {
    (0..clamp_len(length)).map(|_| pick(rng, alphabet)).collect()
}

/// `length` chars from `A-Z a-z 0-9`; zero or negative gives `""`
pub fn random_string(length: i64) -> String {
    random_string_with(&mut ThreadRandom, length)
}

pub fn random_string_with(rng: &mut impl RandomSource, length: i64) -> String {
    random_from_alphabet(rng, length, ALPHANUMERIC)
}

/// `length` chars from `0-9 a-z`
pub fn random_string_base36(length: i64) -> String {
    random_string_base36_with(&mut ThreadRandom, length)
}

pub fn random_string_base36_with(rng: &mut impl RandomSource, length: i64) -> String {
    random_from_alphabet(rng, length, BASE36)
}

/// Random version-4 UUID in lowercase hex
pub fn generate_uuid() -> String {
    generate_uuid_with(&mut ThreadRandom)
}

pub fn generate_uuid_with(rng: &mut impl RandomSource) -> String {
    "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx"
        .chars()
        .map(|slot| match slot {
            'x' => pick(rng, HEX_DIGITS),
            'y' => pick(rng, UUID_VARIANT_DIGITS),
            other => other,
        })
        .collect()
}

/// Uniform permutation of the chars of `text`
pub fn shuffle_characters(text: &str) -> String {
    shuffle_characters_with(&mut ThreadRandom, text)
}

pub fn shuffle_characters_with(rng: &mut impl RandomSource, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for i in (1..chars.len()).rev() {
        let j = rng.next_index(i + 1);
        chars.swap(i, j);
    }
    chars.into_iter().collect()
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("random_string", random_string);
    engine.register_fn("random_string_base36", random_string_base36);
    engine.register_fn("generate_uuid", generate_uuid);
    engine.register_fn("shuffle_characters", shuffle_characters);
}

/// Register the random family backed by one shared seeded generator
pub fn register_seeded_functions(engine: &mut Engine, seed: u64) {
    let shared = Arc::new(Mutex::new(fastrand::Rng::with_seed(seed)));

    let rng = Arc::clone(&shared);
    engine.register_fn("random_string", move |length: i64| {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        random_string_with(&mut *rng, length)
    });

    let rng = Arc::clone(&shared);
    engine.register_fn("random_string_base36", move |length: i64| {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        random_string_base36_with(&mut *rng, length)
    });

    let rng = Arc::clone(&shared);
    engine.register_fn("generate_uuid", move || {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_uuid_with(&mut *rng)
    });

    let rng = shared;
    engine.register_fn("shuffle_characters", move |text: &str| {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle_characters_with(&mut *rng, text)
    });
}
