//! One pipeline, three sources.
//!
//! Builds a transducer once and drives it over a string slice, a vector of
//! lines and a JSON document, then folds the same words into different
//! reducers.

use serde_json::json;
use std::collections::BTreeSet;
use transfold::{
    Collector, cat, compose, filtering, mapcat, mapping, reducer, taking, transduce,
};

fn words(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn main() -> transfold::Result<()> {
    let text = "The quick brown fox jumps over the lazy dog";

    // Characters of a &str
    let vowels = transduce(
        filtering(|c: &char| "aeiou".contains(c.to_ascii_lowercase())),
        Collector::Count,
        0usize,
        text,
    )?;
    println!("vowels: {vowels}");

    // Lines of a Vec, flattened into words
    let lines = vec![
        "It was the best of times,",
        "it was the worst of times,",
        "it was the age of wisdom...",
    ];
    let distinct = transduce(mapcat(words), Collector::Append, BTreeSet::new(), lines.clone())?;
    println!("distinct words: {distinct:?}");

    let first_long = transduce(
        compose![mapcat(words), filtering(|w: &String| w.len() > 4), taking(2)],
        Collector::Append,
        Vec::new(),
        lines,
    )?;
    println!("first long words: {first_long:?}");

    // A JSON document: an array of arrays of numbers
    let doc = json!([[3, 4], [5], [], [6, 7, 8]]);
    let total = transduce(compose![cat(), taking(4)], Collector::Sum, json!(0), doc)?;
    println!("sum of first four: {total}");

    let lengths = transduce(
        mapping(|w: &str| w.len()),
        reducer(String::new(), |mut acc: String, n: usize| {
            if !acc.is_empty() {
                acc.push(',');
            }
            acc.push_str(&n.to_string());
            acc
        }),
        String::new(),
        text.split(' ').collect::<Vec<_>>(),
    )?;
    println!("word lengths: {lengths}");

    Ok(())
}
