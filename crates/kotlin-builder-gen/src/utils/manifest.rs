use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::symbols::SymbolSnapshot;

/// Reads a symbol manifest and the source files it refers to.
pub struct ManifestLoader {
  file: AsyncMmapFile,
  path: PathBuf,
}

impl ManifestLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open manifest {}", path.display()))?;

    Ok(Self {
      file,
      path: path.to_path_buf(),
    })
  }

  /// Deserializes the manifest as written, without touching referenced sources.
  ///
  /// Errors carry the JSON path of the offending value, e.g. `classes[0].primaryConstructor`.
  pub fn parse(&self) -> anyhow::Result<SymbolSnapshot> {
    let mut deserializer = serde_json::Deserializer::from_slice(self.file.as_slice());
    let snapshot: SymbolSnapshot = serde_path_to_error::deserialize(&mut deserializer)
      .with_context(|| format!("failed to parse manifest {}", self.path.display()))?;
    deserializer
      .end()
      .with_context(|| format!("trailing data after manifest {}", self.path.display()))?;
    Ok(snapshot)
  }

  /// Parses the manifest and reads the text of every source file that was not inlined.
  ///
  /// Relative source paths resolve against the manifest's directory. A source file that does not exist keeps
  /// no text; the generator then reports its defaults as unrecoverable.
  pub async fn load(&self) -> anyhow::Result<SymbolSnapshot> {
    let mut snapshot = self.parse()?;
    let base = self.path.parent().unwrap_or_else(|| Path::new(""));

    for source in snapshot.sources.iter_mut().filter(|source| source.text.is_none()) {
      let path = base.join(&source.path);
      match tokio::fs::read_to_string(&path).await {
        Ok(text) => source.text = Some(text),
        Err(error) if error.kind() == ErrorKind::NotFound => {}
        Err(error) => {
          return Err(error).with_context(|| format!("failed to read source file {}", path.display()));
        }
      }
    }

    Ok(snapshot)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MANIFEST: &str = r#"{
    "options": { "builder.setterPrefix": "with" },
    "sources": [
      { "path": "src/Person.kt", "package": "com.example" },
      { "path": "src/Inline.kt", "package": "com.example", "text": "package com.example\n" },
      { "path": "src/Missing.kt", "package": "com.example" }
    ],
    "classes": [{ "qualifiedName": "com.example.Person", "package": "com.example", "source": "src/Person.kt" }],
    "annotated": [{ "kind": "class", "class": "com.example.Person" }]
  }"#;

  fn write_fixture(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/Person.kt"), "package com.example\n\ndata class Person(val name: String)\n").unwrap();
    let manifest = dir.join("symbols.json");
    std::fs::write(&manifest, MANIFEST).unwrap();
    manifest
  }

  #[tokio::test]
  async fn test_load_reads_sources_relative_to_manifest() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manifest = write_fixture(temp_dir.path());

    let snapshot = ManifestLoader::open(&manifest).await.unwrap().load().await.unwrap();
    assert_eq!(snapshot.options.get("builder.setterPrefix").map(String::as_str), Some("with"));

    let person = snapshot.class("com.example.Person").unwrap();
    let text = snapshot.source_text_for(person).unwrap();
    assert!(text.contains("data class Person"));

    assert_eq!(
      snapshot.source("src/Inline.kt").and_then(|source| source.text.as_deref()),
      Some("package com.example\n")
    );
    assert_eq!(snapshot.source("src/Missing.kt").unwrap().text, None);
  }

  #[tokio::test]
  async fn test_parse_leaves_sources_untouched() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manifest = write_fixture(temp_dir.path());

    let snapshot = ManifestLoader::open(&manifest).await.unwrap().parse().unwrap();
    assert_eq!(snapshot.source("src/Person.kt").unwrap().text, None);
    assert_eq!(snapshot.annotated.len(), 1);
  }

  #[tokio::test]
  async fn test_invalid_manifest_names_the_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let manifest = temp_dir.path().join("broken.json");
    std::fs::write(&manifest, "{ \"classes\": 42 }").unwrap();

    let error = ManifestLoader::open(&manifest).await.unwrap().parse().unwrap_err();
    assert!(error.to_string().starts_with("failed to parse manifest"), "{error}");
    assert!(error.to_string().contains("broken.json"));
    assert!(format!("{error:#}").contains("classes"), "{error:#}");
  }

  #[tokio::test]
  async fn test_missing_manifest_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = ManifestLoader::open(&temp_dir.path().join("absent.json")).await;
    assert!(result.is_err());
  }
}
