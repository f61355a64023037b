//! Command execution.
//!
//! Each command loads its document, runs one or more path operations through
//! a [`Dipper`] configured from the command line and returns the text to
//! print. Nothing here writes to stdout, which keeps commands testable.

use std::path::Path;

use anyhow::{Context, Result};
use dipper::{to_json, Dipper, DipperError, Options};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::document::Document;

/// Runs the parsed command line and returns its output.
///
/// In-place edits return an empty string.
pub fn execute(cli: &Cli) -> Result<String> {
    let dipper = Dipper::new(Options::new().separator(cli.separator.as_str()));

    match &cli.command {
        Command::Get { file, paths } => {
            let document = load(file)?;
            let values = get(&dipper, &document.root, paths)?;
            let format = cli.output.unwrap_or(document.format);
            let rendered = values
                .iter()
                .map(|value| format.render(value))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rendered.join("\n"))
        }
        Command::Set {
            file,
            path,
            value,
            in_place,
        } => edit(cli, file, *in_place, |root| {
            dipper
                .set(root, path, parse_value(value))
                .with_context(|| format!("cannot set '{}'", path))
        }),
        Command::Zero {
            file,
            path,
            in_place,
        } => edit(cli, file, *in_place, |root| {
            dipper
                .set_zero(root, path)
                .with_context(|| format!("cannot zero '{}'", path))
        }),
        Command::Delete {
            file,
            path,
            in_place,
        } => edit(cli, file, *in_place, |root| {
            dipper
                .delete(root, path)
                .with_context(|| format!("cannot delete '{}'", path))
        }),
    }
}

/// Resolves every path, failing on the first one that does not resolve.
pub fn get(dipper: &Dipper, root: &Value, paths: &[String]) -> Result<Vec<Value>> {
    let fields = dipper.get_many(root, paths);
    let mut values = Vec::with_capacity(paths.len());

    for (path, result) in fields.iter() {
        let found = (*result).with_context(|| format!("cannot resolve '{}'", path))?;
        let value = to_json(found)
            .ok_or(DipperError::TypesDoNotMatch)
            .with_context(|| format!("'{}' is not representable as JSON", path))?;
        values.push(value);
    }
    Ok(values)
}

/// Interprets a command-line value as JSON, or as a plain string when it is
/// not valid JSON.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn load(file: &Path) -> Result<Document> {
    Document::load(file).with_context(|| format!("cannot load {}", file.display()))
}

fn edit<F>(cli: &Cli, file: &Path, in_place: bool, apply: F) -> Result<String>
where
    F: FnOnce(&mut Value) -> Result<()>,
{
    let mut document = load(file)?;
    apply(&mut document.root)?;

    if in_place {
        document
            .save()
            .with_context(|| format!("cannot write {}", file.display()))?;
        return Ok(String::new());
    }

    let format = cli.output.unwrap_or(document.format);
    Ok(format.render(&document.root)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("{\"a\": null}"), json!({"a": null}));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("Noir"), json!("Noir"));
        assert_eq!(parse_value(""), json!(""));
    }

    #[test]
    fn test_get_in_request_order() {
        let root = json!({"a": {"b": [1, 2]}, "c": "x"});
        let values = get(
            &Dipper::default(),
            &root,
            &["c".to_string(), "a.b[1]".to_string()],
        )
        .unwrap();
        assert_eq!(values, [json!("x"), json!(2)]);
    }

    #[test]
    fn test_get_reports_the_failing_path() {
        let root = json!({"a": 1});
        let err = get(&Dipper::default(), &root, &["a".to_string(), "b".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "cannot resolve 'b'");
        assert_eq!(
            err.downcast_ref::<DipperError>(),
            Some(&DipperError::NotFound)
        );
    }
}
