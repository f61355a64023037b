//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use dipper::{Dynamic, Reflect};
use serde_json::{json, Value};

pub const MYSTERY: &str = "Fiction genre where the nature of an event, usually a murder or other crime, remains mysterious until the end of the story";
pub const CRIME: &str = "Narratives that centre on criminal acts and especially on the investigation of a crime, often a murder";

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Publication {
    pub isbn: String,
}

/// A calendar date with private parts.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Date { year, month, day }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Author {
    pub name: String,
    pub birth_date: Date,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default, Reflect)]
pub struct Book {
    pub title: String,
    pub year: i64,
    pub author: Author,
    pub genre_names: Vec<String>,
    pub genres: Vec<Genre>,
    pub extra: HashMap<String, Dynamic>,
    pub any: Dynamic,
    pub publication: Publication,
}

pub fn author() -> Author {
    Author {
        name: "Umberto Eco".into(),
        birth_date: Date::new(1932, 7, 5),
    }
}

pub fn genres() -> Vec<Genre> {
    vec![
        Genre {
            id: 0,
            name: "Mystery".into(),
            description: MYSTERY.into(),
        },
        Genre {
            id: 1,
            name: "Crime".into(),
            description: CRIME.into(),
        },
    ]
}

pub fn book() -> Book {
    Book {
        title: "El nombre de la rosa".into(),
        year: 1980,
        author: author(),
        genre_names: vec!["Mystery".into(), "Crime".into()],
        genres: genres(),
        extra: HashMap::from([(
            String::from("foo"),
            Dynamic::new(HashMap::from([(String::from("bar"), 123i64)])),
        )]),
        any: Dynamic::nil(),
        publication: Publication {
            isbn: "1234567890".into(),
        },
    }
}

/// The book as a JSON document.
pub fn book_json() -> Value {
    json!({
        "title": "El nombre de la rosa",
        "year": 1980,
        "author": {"name": "Umberto Eco", "birth_date": "1932-07-05"},
        "genre_names": ["Mystery", "Crime"],
        "genres": [
            {"id": 0, "name": "Mystery", "description": MYSTERY},
            {"id": 1, "name": "Crime", "description": CRIME},
        ],
        "extra": {"foo": {"bar": 123}},
        "any": null,
        "publication": {"isbn": "1234567890"},
    })
}

/// Downcasts a resolved value, panicking with its type name on mismatch.
pub fn cast<T: Reflect>(value: &dyn Reflect) -> &T {
    value
        .downcast_ref::<T>()
        .unwrap_or_else(|| panic!("expected {}, got {}", std::any::type_name::<T>(), value.type_name()))
}
