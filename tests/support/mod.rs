use anyhow::{Context, Result};
use sddcheck::CorpusLayout;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path of the compiled validator binary.
pub fn validator_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sdd-validate"))
}

/// Temporary corpus laid out the way the validator expects.
pub struct Corpus {
    pub dir: TempDir,
    pub layout: CorpusLayout,
}

impl Corpus {
    /// Seed a corpus with a permissive schema and empty catalogs.
    pub fn empty() -> Result<Self> {
        let corpus = Self {
            dir: TempDir::new().context("failed to allocate corpus dir")?,
            layout: CorpusLayout::default(),
        };
        corpus.write(&corpus.layout.schema, "{}")?;
        corpus.write(&corpus.layout.standards, "standards: []\n")?;
        corpus.write(&corpus.layout.properties, "properties: []\n")?;
        corpus.write(&corpus.layout.tools, "tools: []\n")?;
        corpus.write(&corpus.layout.mappings, "mappings: []\n")?;
        corpus.write(&corpus.layout.verifications, "verifications: []\n")?;
        Ok(corpus)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &Path, contents: &str) -> Result<()> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    pub fn remove(&self, relative: &Path) -> Result<()> {
        let path = self.root().join(relative);
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))
    }
}

/// Run the validator against `corpus` with extra arguments.
pub fn run_validator(corpus: &Corpus, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new(validator_binary());
    cmd.arg("--root").arg(corpus.root()).args(args);
    cmd.env_remove("SDD_SPEC_ROOT");
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}
