//! Stub template loading and substitution.
//!
//! Templates use Tera syntax: `{{ title }}`, `{{ contents_table }}` and so
//! on. Referencing a variable that is not one of [`StubKeywords`] is a
//! render error.

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::config::Config;
use crate::error::{Error, Result};

/// Template compiled into the binary, used when no data model root is set.
pub const BUILTIN_TEMPLATE: &str = include_str!("../etc/template.rst");

// Ends in `.rst` so Tera never autoescapes it.
const TEMPLATE_NAME: &str = "stub.rst";

/// Values substituted into the template for one FITS file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubKeywords {
    /// Document title; the model name.
    pub title: String,
    /// Base name of the FITS file.
    pub filename: String,
    pub filetype: String,
    /// Human-readable size, see [`crate::model::human_file_size`].
    pub filesize: String,
    /// Rendered contents table.
    pub contents_table: String,
    /// All HDU sections, joined by newlines.
    pub hdu_sections: String,
}

impl StubKeywords {
    /// `=` underline/overline as long as the title.
    pub fn title_highlight(&self) -> String {
        "=".repeat(self.title.chars().count())
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("titlehighlight", &self.title_highlight());
        context.insert("filename", &self.filename);
        context.insert("filetype", &self.filetype);
        context.insert("filesize", &self.filesize);
        context.insert("contents_table", &self.contents_table);
        context.insert("hdu_sections", &self.hdu_sections);
        context
    }
}

/// A parsed stub template.
#[derive(Debug, Clone)]
pub struct Template {
    tera: Tera,
    origin: Option<PathBuf>,
}

impl Template {
    /// Parse a template from text.
    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Template { tera, origin: None })
    }

    /// The template shipped with this crate.
    pub fn builtin() -> Result<Self> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    /// Read and parse the template at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut template = Self::from_source(&source)?;
        template.origin = Some(path.to_path_buf());
        Ok(template)
    }

    /// The template selected by `config`: `<root>/etc/template.rst` when a
    /// data model root is configured, otherwise the built-in one.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.template_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!(
                    "{} is not set; using the built-in template",
                    crate::config::TEMPLATE_ROOT_ENV
                );
                Self::builtin()
            }
        }
    }

    /// File the template was loaded from; `None` for in-memory templates.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Substitute `keywords` into the template.
    pub fn render(&self, keywords: &StubKeywords) -> Result<String> {
        Ok(self.tera.render(TEMPLATE_NAME, &keywords.context())?)
    }
}
