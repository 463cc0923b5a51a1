//! Shared fixtures for oscars-ranker integration tests

#![allow(dead_code)]

pub mod fakes;

use serde_json::{json, Value};

/// OMDb answer for Braveheart, trimmed to the fields the pipeline reads
pub fn braveheart_payload() -> Value {
    json!({
        "Title": "Braveheart",
        "Year": "1995",
        "Runtime": "178 min",
        "imdbRating": "8.3",
        "Metascore": "68",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "8.3/10"},
            {"Source": "Rotten Tomatoes", "Value": "75%"},
            {"Source": "Metacritic", "Value": "68/100"}
        ],
        "Response": "True"
    })
}

pub fn apollo_13_payload() -> Value {
    json!({
        "Title": "Apollo 13",
        "Year": "1995",
        "Runtime": "140 min",
        "imdbRating": "7.7",
        "Metascore": "77",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "7.7/10"},
            {"Source": "Rotten Tomatoes", "Value": "95%"}
        ],
        "Response": "True"
    })
}

/// Movie with no Rotten Tomatoes entry and a non-numeric metascore
pub fn babe_payload() -> Value {
    json!({
        "Title": "Babe",
        "Year": "1995",
        "Runtime": "91 min",
        "imdbRating": "6.9",
        "Metascore": "N/A",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "6.9/10"}
        ],
        "Response": "True"
    })
}

pub fn not_found_payload() -> Value {
    json!({"Response": "False", "Error": "Movie not found!"})
}

pub fn award(year: i64, category: &str, winner: i64, entity: &str) -> Value {
    json!([year, category, winner, entity])
}

/// A small 1995 slice of the nominations table plus rows the enrichment
/// filter must ignore
pub fn sample_awards() -> Vec<Value> {
    vec![
        award(1939, "Best Picture", 1, "Gone with the Wind"),
        award(1995, "Best Picture", 1, "Braveheart"),
        award(1995, "Best Picture", 0, "Apollo 13"),
        award(1995, "Best Picture", 0, "Babe"),
        award(1995, "Actor in a Leading Role", 0, "Mel Gibson"),
        award(1995, "Directing", 1, "Braveheart"),
    ]
}
