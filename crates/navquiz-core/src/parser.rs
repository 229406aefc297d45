//! TOML catalog parser.
//!
//! Loads catalogs from TOML files and directories, and validates them.
//! Structural defects are hard errors (`CatalogError`); content issues that
//! still leave a playable quiz are reported by `validate_catalog`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{AnswerOption, Catalog, ProfileCategory, ProfileDefinition, Question, ThemeToken};

/// The catalog compiled into the binary, used when no catalog path is given.
pub const BUILTIN_CATALOG: &str = include_str!("../catalogs/navegante.toml");

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    profiles: BTreeMap<String, TomlProfile>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    title: String,
    #[serde(default)]
    intro: String,
    #[serde(default)]
    export_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlProfile {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    advice: String,
    #[serde(default)]
    theme: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    id: String,
    #[serde(default)]
    text: String,
    target: String,
}

fn parse_category(raw: &str) -> Result<ProfileCategory, CatalogError> {
    raw.parse()
        .map_err(|_| CatalogError::UnknownCategory(raw.to_string()))
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut profiles = BTreeMap::new();
    for (key, p) in parsed.profiles {
        let category = parse_category(&key)?;
        let definition = ProfileDefinition {
            category,
            name: p.name,
            description: p.description,
            advice: p.advice,
            theme: ThemeToken::new(p.theme),
        };
        if profiles.insert(category, definition).is_some() {
            return Err(CatalogError::DuplicateProfile(category))
                .with_context(|| format!("invalid catalog: {}", source_path.display()));
        }
    }

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let options = q
                .options
                .into_iter()
                .map(|o| {
                    Ok(AnswerOption {
                        target: parse_category(&o.target)?,
                        id: o.id,
                        text: o.text,
                    })
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;
            Ok(Question {
                id: i as u32 + 1,
                prompt: q.prompt,
                options,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    let catalog = Catalog::new(
        parsed.catalog.id,
        parsed.catalog.title,
        parsed.catalog.intro,
        parsed.catalog.export_name,
        questions,
        profiles,
    )
    .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    tracing::debug!(
        catalog = catalog.id(),
        questions = catalog.question_count(),
        "loaded catalog from {}",
        source_path.display()
    );

    Ok(catalog)
}

/// Parse the built-in catalog.
pub fn builtin_catalog() -> Result<Catalog> {
    parse_catalog_str(BUILTIN_CATALOG, Path::new("<builtin>"))
}

/// Load a catalog from `path`, or the built-in catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => parse_catalog(p),
        None => builtin_catalog(),
    }
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Check a catalog for content issues that do not prevent play.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for question in catalog.questions() {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(question.id),
                message: "prompt is empty".into(),
            });
        }
        for option in &question.options {
            if option.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question: Some(question.id),
                    message: format!("option '{}' has no text", option.id),
                });
            }
        }
    }

    for profile in catalog.profiles() {
        let blank_fields: Vec<&str> = [
            ("name", profile.name.as_str()),
            ("description", profile.description.as_str()),
            ("advice", profile.advice.as_str()),
            ("theme", profile.theme.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        for field in blank_fields {
            warnings.push(ValidationWarning {
                question: None,
                message: format!("profile {} has an empty {field}", profile.category),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MINIMAL_TOML: &str = r#"
[catalog]
id = "mini"
title = "Mini quiz"

[profiles.INTUITIVO]
name = "Intuitive"
description = "d"
advice = "a"
theme = "wind"

[profiles.REFLEXIVO]
name = "Reflective"
description = "d"
advice = "a"
theme = "anchor"

[profiles.RESOLUTIVO]
name = "Resolute"
description = "d"
advice = "a"
theme = "compass"

[profiles.resiliente]
name = "Resilient"
description = "d"
advice = "a"
theme = "zap"

[[questions]]
prompt = "First?"

[[questions.options]]
id = "A"
text = "one"
target = "INTUITIVO"

[[questions.options]]
id = "B"
text = "two"
target = "reflexivo"

[[questions]]
prompt = "Second?"

[[questions.options]]
id = "A"
text = "three"
target = "RESOLUTIVO"

[[questions.options]]
id = "B"
text = ""
target = "RESILIENTE"
"#;

    #[test]
    fn parse_builtin_catalog() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.id(), "navegante");
        assert_eq!(catalog.export_name(), "Perfil-Navegante");
        assert_eq!(catalog.question_count(), 5);
        assert!(catalog.questions().iter().all(|q| q.options.len() == 4));
        assert_eq!(
            catalog.profile(ProfileCategory::Reflexivo).name,
            "Capitán Reflexivo"
        );
        assert_eq!(catalog.profile(ProfileCategory::Resiliente).theme.as_str(), "zap");
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn parse_minimal_catalog() {
        let catalog = parse_catalog_str(MINIMAL_TOML, &PathBuf::from("mini.toml")).unwrap();
        assert_eq!(catalog.question_count(), 2);
        assert_eq!(catalog.export_name(), "mini");
        assert_eq!(catalog.questions()[1].id, 2);
        assert_eq!(
            catalog.questions()[0].options[1].target,
            ProfileCategory::Reflexivo
        );
    }

    #[test]
    fn validate_reports_blank_option_text() {
        let catalog = parse_catalog_str(MINIMAL_TOML, &PathBuf::from("mini.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].question, Some(2));
        assert!(warnings[0].message.contains("option 'B'"));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let toml = MINIMAL_TOML.replace("target = \"RESOLUTIVO\"", "target = \"VALIENTE\"");
        let err = parse_catalog_str(&toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("VALIENTE"));
    }

    #[test]
    fn unknown_profile_key_is_rejected() {
        let toml = MINIMAL_TOML.replace("[profiles.REFLEXIVO]", "[profiles.INTUITIVO_DUP]");
        let err = parse_catalog_str(&toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("INTUITIVO_DUP"));
    }

    #[test]
    fn profile_keys_differing_in_case_are_rejected() {
        let toml = format!(
            "{MINIMAL_TOML}\n[profiles.intuitivo]\nname = \"Shadow\"\ntheme = \"wind\"\n"
        );
        let err = parse_catalog_str(&toml, &PathBuf::from("dup.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("more than one definition for INTUITIVO"));
    }

    #[test]
    fn padded_option_ids_stay_selectable() {
        let toml = BUILTIN_CATALOG.replacen("id = \"A\"", "id = \" A \"", 1);
        let catalog = parse_catalog_str(&toml, &PathBuf::from("padded.toml")).unwrap();
        let first = &catalog.questions()[0];
        assert_eq!(first.options[0].id, "A");
        assert_eq!(
            first.option("A").unwrap().target,
            ProfileCategory::Resiliente
        );
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_catalog_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.id(), "navegante");
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), MINIMAL_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[catalog]\nid = 1").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalogs = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].id(), "mini");
    }

    #[test]
    fn load_directory_rejects_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mini.toml");
        std::fs::write(&file, MINIMAL_TOML).unwrap();
        assert!(load_catalog_directory(&file).is_err());
    }
}
