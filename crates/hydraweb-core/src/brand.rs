// ABOUTME: Brand type holding the coloured prefix and plain suffix of the project name.
// ABOUTME: Provides derivation of the pair from a CamelCase project name.

use serde::Serialize;

/// The split project name shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub prefix: String,
    pub suffix: String,
}

impl Brand {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Split a CamelCase project name before its first uppercase letter that
    /// is not the leading character, e.g. `HydraExperienceLibrary` becomes
    /// `Hydra` + `ExperienceLibrary`. Names without such a boundary are all prefix.
    pub fn split(project_name: &str) -> Self {
        let boundary = project_name
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_uppercase())
            .map(|(i, _)| i);

        match boundary {
            Some(i) => Self::new(&project_name[..i], &project_name[i..]),
            None => Self::new(project_name, ""),
        }
    }

    /// Full display name, used as the page title.
    pub fn title(&self) -> String {
        format!("{}{}", self.prefix, self.suffix)
    }
}
