//! Placeholder substitution in file and directory names.

use crate::naming::{
    skip_first_and_last_part, skip_first_part, skip_last_part, to_camel_case, to_pascal_case,
};
use crate::processor::TemplateParameters;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches `{{Name}}` and every `{{Name_<Transform>}}` placeholder.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{\{Name(?:_(",
        r"ToPascalCase|ToCamelCase|SkipFirstPart|SkipLastPart|SkipFirstAndLastPart",
        r"))?\}\}",
    ))
    .unwrap()
});

/// Values substituted for each placeholder, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRenamer {
    name: String,
    pascal_case: String,
    camel_case: String,
    skip_first: String,
    skip_last: String,
    skip_first_and_last: String,
}

impl PathRenamer {
    pub fn new(parameters: &TemplateParameters) -> Self {
        let name = parameters.name.as_str();
        Self {
            name: name.to_string(),
            pascal_case: to_pascal_case(name),
            camel_case: to_camel_case(name),
            skip_first: skip_first_part(name),
            skip_last: skip_last_part(name),
            skip_first_and_last: skip_first_and_last_part(name),
        }
    }

    fn value_for(&self, transform: Option<&str>) -> &str {
        match transform {
            Some("ToPascalCase") => &self.pascal_case,
            Some("ToCamelCase") => &self.camel_case,
            Some("SkipFirstPart") => &self.skip_first,
            Some("SkipLastPart") => &self.skip_last,
            Some("SkipFirstAndLastPart") => &self.skip_first_and_last,
            _ => &self.name,
        }
    }

    /// Replaces every placeholder in `path` in a single scan.
    ///
    /// Substituted values are never scanned again, so a project name that
    /// itself looks like a placeholder is inserted literally.
    pub fn rename(&self, path: &str) -> String {
        PLACEHOLDER
            .replace_all(path, |caps: &Captures| {
                self.value_for(caps.get(1).map(|m| m.as_str())).to_string()
            })
            .into_owned()
    }
}

/// Renames `path` for the given parameters.
pub fn rename_path(parameters: &TemplateParameters, path: &str) -> String {
    PathRenamer::new(parameters).rename(path)
}
