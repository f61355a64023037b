//! Filter expressions in paths.

mod common;

use common::{book, book_json, Genre, CRIME};
use dipper::{DipperError, Dynamic};
use serde_json::json;

// ============================================================================
// Get
// ============================================================================

#[test]
fn filter_scalar_elements() {
    let root = book();
    assert_eq!(
        dipper::get_as::<String>(&root, "genre_names[='Crime']").unwrap(),
        "Crime"
    );
}

#[test]
fn keyed_filter_on_scalars_finds_nothing() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genre_names[name='Crime']").unwrap_err(),
        DipperError::FilterNotFound
    );
}

#[test]
fn filter_struct_elements() {
    let root = book();
    assert_eq!(
        dipper::get_as::<String>(&root, "genres[name=='Crime'].name").unwrap(),
        "Crime"
    );
    assert_eq!(
        dipper::get_as::<String>(&root, "genres[id==0].name").unwrap(),
        "Mystery"
    );
    assert_eq!(
        dipper::get_as::<String>(&root, "genres[id=0.0].name").unwrap(),
        "Mystery"
    );
    assert_eq!(
        dipper::get_as::<Genre>(&root, "genres[id=1]").map(|genre| genre.id),
        Ok(1)
    );
}

#[test]
fn filter_map_elements() {
    let root = book_json();
    assert_eq!(
        dipper::get_as(&root, "genres[name='Crime'].description"),
        Ok(&json!(CRIME))
    );
}

#[test]
fn numbers_compare_across_types() {
    let root = vec![
        Dynamic::new(0i32),
        Dynamic::new(1.0f64),
        Dynamic::new(1.5f64),
        Dynamic::new(2i32),
        Dynamic::new(3u32),
    ];
    assert_eq!(dipper::get_as::<f64>(&root, "[=1.5]"), Ok(&1.5));
    assert_eq!(dipper::get_as::<u32>(&root, "[=3]"), Ok(&3));
    assert_eq!(dipper::get_as::<f64>(&root, "[=1]"), Ok(&1.0));
}

#[test]
fn booleans_and_null() {
    let root = vec![
        Dynamic::new(0.0f64),
        Dynamic::new(1i32),
        Dynamic::new(true),
        Dynamic::new(false),
        Dynamic::nil(),
    ];
    assert_eq!(dipper::get_as::<bool>(&root, "[=true]"), Ok(&true));
    assert_eq!(dipper::get_as::<bool>(&root, "[=false]"), Ok(&false));

    let null = dipper::get(&root, "[=null]").unwrap();
    assert!(null.is_nil());
}

#[test]
fn bracketed_text_without_equals_is_an_index() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genre_names['Mystery']").unwrap_err(),
        DipperError::InvalidIndex
    );
}

#[test]
fn invalid_filter_value() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genres[id={}]").unwrap_err(),
        DipperError::InvalidFilterValue
    );
}

#[test]
fn invalid_filter_expression() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genre_names[*==]").unwrap_err(),
        DipperError::InvalidFilterExpression
    );
}

#[test]
fn separator_before_filter() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genres.[id=0].name").unwrap_err(),
        DipperError::InvalidIndex
    );
}

#[test]
fn no_match() {
    let root = book();
    assert_eq!(
        dipper::get(&root, "genres[id=9].name").unwrap_err(),
        DipperError::FilterNotFound
    );
}

#[test]
fn filter_literal_may_contain_separator() {
    let root = json!([{"v": "1.0"}, {"v": "2.0"}]);
    assert_eq!(dipper::get_as(&root, "[v='2.0'].v"), Ok(&json!("2.0")));
}

#[test]
fn leading_bracket_on_map_reads_empty_key() {
    // A leading bracket splits off an empty first segment, read as a key on maps.
    let root = json!({"[id=1]": "literal"});
    assert_eq!(dipper::get(&root, "[id=1]").unwrap_err(), DipperError::NotFound);

    let root = json!({"": {"[id=1]": "nested"}});
    assert_eq!(dipper::get_as(&root, "[id=1]"), Ok(&json!("nested")));
}

// ============================================================================
// Set
// ============================================================================

#[test]
fn set_scalar_element() {
    let mut root = book();
    assert_eq!(
        dipper::set(&mut root, "genre_names[='Mystery']", String::from("Romance")),
        Ok(())
    );
    assert_eq!(root.genre_names, ["Romance", "Crime"]);
}

#[test]
fn set_struct_field_through_filter() {
    let mut root = book();
    assert_eq!(
        dipper::set(&mut root, "genres[name='Mystery'].name", String::from("Romance")),
        Ok(())
    );
    assert_eq!(root.genres[0].name, "Romance");

    assert_eq!(
        dipper::set(&mut root, "genres[id=1.0].name", String::from("Noir")),
        Ok(())
    );
    assert_eq!(root.genres[1].name, "Noir");
}

#[test]
fn set_map_value_through_filter() {
    let mut root = book_json();
    assert_eq!(dipper::set(&mut root, "genres[id=0].name", "Romance"), Ok(()));
    assert_eq!(root["genres"][0]["name"], json!("Romance"));

    assert_eq!(dipper::set(&mut root, "genres[id=0.0].name", "Gothic"), Ok(()));
    assert_eq!(root["genres"][0]["name"], json!("Gothic"));
}

#[test]
fn set_without_match_changes_nothing() {
    let mut root = book();
    assert_eq!(
        dipper::set(&mut root, "genres[id=7].name", String::from("Romance")),
        Err(DipperError::FilterNotFound)
    );
    assert_eq!(root.genres, common::genres());
}
