//! Raw argument mapping and typed extraction helpers.
//!
//! GitHub Actions hands the action a flat list of string inputs. This
//! module turns that list into a named mapping and offers the typed
//! lookups the data model is built from. A mistyped context expression
//! (e.g. `github.non_existent`) expands to an empty string, so an
//! absent key and an empty value are treated the same way.

use std::collections::HashMap;

use crate::error::{EmbedError, Result};

/// Positional argument names, in the order the action declares them.
pub const ARGUMENT_NAMES: [&str; 14] = [
    "workflow_name",
    "run_id",
    "run_number",
    "status",
    "repository",
    "actor",
    "ref",
    "sha",
    "webhook_id",
    "webhook_token",
    "pr_author_login",
    "pr_number",
    "pr_title",
    "pr_source",
];

/// The raw field-name -> string mapping supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: HashMap<String, String>,
}

impl Arguments {
    /// Zip the positional argument list with the declared field names.
    /// Trailing fields without a matching argument (the four optional
    /// pull-request fields, typically) enter the map as empty strings.
    pub fn from_argv<I>(argv: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut argv = argv.into_iter();
        let values = ARGUMENT_NAMES
            .iter()
            .map(|name| (name.to_string(), argv.next().unwrap_or_default()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// Look up a required string field. Absent and empty are the same
    /// failure: GitHub Actions yields empty strings for bad context paths.
    pub fn required(&self, name: &str) -> Result<String> {
        match self.get(name) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(EmbedError::MissingArgument(name.to_string())),
        }
    }

    /// Look up a required field and parse it as an integer.
    pub fn required_u64(&self, name: &str) -> Result<u64> {
        let raw = self.required(name)?;
        raw.parse().map_err(|_| EmbedError::InvalidArgument {
            field: name.to_string(),
            value: raw,
        })
    }

    /// Returns true if every named field is absent or empty. Used for
    /// the all-or-nothing optional pull-request group.
    pub fn group_is_absent(&self, names: &[&str]) -> bool {
        names
            .iter()
            .all(|name| self.get(name).is_none_or(str::is_empty))
    }

    /// Overwrite the four pull-request fields from a raw pull-request
    /// event payload. Policy is fail-fast: a payload that does not
    /// parse, or parses but lacks one of the expected paths, is an
    /// InvalidArgument error rather than a silent fallback to the
    /// positional arguments.
    pub fn apply_pull_request_payload(&mut self, raw: &str) -> Result<()> {
        let payload: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            EmbedError::InvalidArgument {
                field: "pull_request_payload".to_string(),
                value: format!("not valid JSON: {e}"),
            }
        })?;

        let missing = |path: &str| EmbedError::InvalidArgument {
            field: "pull_request_payload".to_string(),
            value: format!("missing `{path}`"),
        };

        let pr = payload
            .get("pull_request")
            .ok_or_else(|| missing("pull_request"))?;
        let author = pr
            .get("user")
            .and_then(|user| user.get("login"))
            .and_then(|login| login.as_str())
            .ok_or_else(|| missing("pull_request.user.login"))?;
        let number = pr
            .get("number")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| missing("pull_request.number"))?;
        let title = pr
            .get("title")
            .and_then(|title| title.as_str())
            .ok_or_else(|| missing("pull_request.title"))?;
        let source = pr
            .get("head")
            .and_then(|head| head.get("label"))
            .and_then(|label| label.as_str())
            .ok_or_else(|| missing("pull_request.head.label"))?;

        self.set("pr_author_login", author.to_string());
        self.set("pr_number", number.to_string());
        self.set("pr_title", title.to_string());
        self.set("pr_source", source.to_string());
        Ok(())
    }
}
