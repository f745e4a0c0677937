//! Build the stub document for a FITS file and write it out.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{hdu_label, human_file_size, model_name};
use crate::reader::{self, HduDescription};
use crate::table::Table;
use crate::template::{StubKeywords, Template};

/// Value of the `filetype` placeholder.
pub const FILE_TYPE: &str = "FITS";

/// The type shown for the primary HDU, whatever its header says.
pub const PRIMARY_TYPE: &str = "IMAGE";

const DESCRIPTION_PLACEHOLDER: &str = "*Brief Description*";
const SUMMARY_PLACEHOLDER: &str = "*Summarize the contents of this HDU.*";

/// One row of the contents table: label, EXTNAME, type, description.
pub type ContentsRow = [String; 4];

fn hdu_type(index: usize, hdu: &HduDescription) -> &str {
    if index == 0 {
        PRIMARY_TYPE
    } else {
        hdu.xtension.as_deref().unwrap_or_default()
    }
}

fn hdu_extname(index: usize, hdu: &HduDescription) -> &str {
    if index == 0 {
        ""
    } else {
        hdu.extname.as_deref().unwrap_or_default()
    }
}

/// Contents table with one row per HDU.
pub fn contents_table(hdus: &[HduDescription]) -> Table<4> {
    let mut table = Table::new(["Number", "EXTNAME", "Type", "Contents"]);
    for (index, hdu) in hdus.iter().enumerate() {
        table.push(contents_row(index, hdus.len(), hdu));
    }
    table
}

fn contents_row(index: usize, count: usize, hdu: &HduDescription) -> ContentsRow {
    [
        format!("{}_", hdu_label(index, count)),
        hdu_extname(index, hdu).to_string(),
        hdu_type(index, hdu).to_string(),
        DESCRIPTION_PLACEHOLDER.to_string(),
    ]
}

/// Section lines for every HDU: heading, EXTNAME line, summary placeholder
/// and the rendered header details.
pub fn hdu_sections(hdus: &[HduDescription]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, hdu) in hdus.iter().enumerate() {
        let title = hdu_label(index, hdus.len());
        let underline = "-".repeat(title.len());
        lines.push(title);
        lines.push(underline);
        lines.push(String::new());

        let extname = hdu_extname(index, hdu);
        if !extname.is_empty() {
            lines.push(format!("EXTNAME = {extname}"));
            lines.push(String::new());
        }
        lines.push(SUMMARY_PLACEHOLDER.to_string());
        lines.push(String::new());
        lines.extend(hdu.details.iter().cloned());
    }
    lines
}

/// Template values for a file with base name `filename`.
pub fn stub_keywords(
    filename: &str,
    size_bytes: u64,
    hdus: &[HduDescription],
) -> Result<StubKeywords> {
    Ok(StubKeywords {
        title: model_name(filename)?.to_string(),
        filename: filename.to_string(),
        filetype: FILE_TYPE.to_string(),
        filesize: human_file_size(size_bytes),
        contents_table: contents_table(hdus).render().join("\n"),
        hdu_sections: hdu_sections(hdus).join("\n"),
    })
}

/// A rendered stub, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStub {
    pub model_name: String,
    pub text: String,
}

/// Generates stubs with a fixed template and output directory.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    config: Config,
    template: Template,
}

impl StubGenerator {
    /// Load the template named by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let template = Template::from_config(&config)?;
        match template.origin() {
            Some(path) => log::debug!("using template {}", path.display()),
            None => log::debug!("using the built-in template"),
        }
        Ok(Self::with_template(config, template))
    }

    pub fn with_template(config: Config, template: Template) -> Self {
        StubGenerator { config, template }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render the stub for the FITS file at `path`.
    ///
    /// The model name is checked before the file is opened, so a bad file
    /// name fails without touching the file.
    pub fn render(&self, path: &Path) -> Result<RenderedStub> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidFilename(path.display().to_string()))?;
        let model = model_name(&filename)?.to_string();

        let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
        let hdus = reader::describe_file(path)?;
        let keywords = stub_keywords(&filename, size, &hdus)?;
        let text = self.template.render(&keywords)?;
        Ok(RenderedStub {
            model_name: model,
            text,
        })
    }

    /// Render the stub for `path` and write it to `<output_dir>/<model>.rst`,
    /// replacing any existing file. Returns the path written.
    pub fn generate(&self, path: &Path) -> Result<PathBuf> {
        let stub = self.render(path)?;
        let output = self.config.output_path(&stub.model_name);
        if output.exists() {
            log::debug!("overwriting {}", output.display());
        }
        fs::write(&output, &stub.text).map_err(|e| Error::io(&output, e))?;
        log::info!("wrote {} from {}", output.display(), path.display());
        Ok(output)
    }
}
