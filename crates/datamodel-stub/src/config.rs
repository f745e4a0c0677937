use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the data model root directory.
pub const TEMPLATE_ROOT_ENV: &str = "DESIDATAMODEL";

/// Location of the template relative to the data model root.
pub const TEMPLATE_RELATIVE_PATH: [&str; 2] = ["etc", "template.rst"];

/// Runtime settings for stub generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Data model root; the template lives at `<root>/etc/template.rst`.
    /// When unset the built-in template is used.
    pub template_root: Option<PathBuf>,
    /// Directory that receives the generated `<model>.rst` files.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template_root: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Settings from the process environment, writing to the current
    /// directory. An empty `DESIDATAMODEL` counts as unset.
    pub fn from_env() -> Self {
        let template_root = env::var_os(TEMPLATE_ROOT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Config {
            template_root,
            ..Config::default()
        }
    }

    /// Use `dir` for generated files.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Load the template from under `root`.
    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = Some(root.into());
        self
    }

    /// Full path of the configured template file, if a root is set.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template_root
            .as_deref()
            .map(|root| TEMPLATE_RELATIVE_PATH.iter().fold(root.to_path_buf(), |p, c| p.join(c)))
    }

    /// Path of the stub written for `model_name`.
    pub fn output_path(&self, model_name: &str) -> PathBuf {
        self.output_dir.join(format!("{model_name}.rst"))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
