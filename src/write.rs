//! Renders a remote's tree and pages to disk. Each remote produces
//! `{remotes_directory}/{id}.json` and `{html_directory}/{id}.html`; the run
//! as a whole produces a single index page in `html_directory`.

use crate::tree::Node;
use crate::value::{option_to_value, results_to_value};
use gtmpl::{Template, Value};
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The template for per-remote pages.
pub const PAGE_TEMPLATE: &str = "page.html.template";

/// The template for the index page.
pub const INDEX_TEMPLATE: &str = "index.html.template";

const TEMPLATE_SUFFIX: &str = ".template";

/// Derives an output file name from a template name by stripping its
/// `.template` suffix, e.g. `index.html.template` becomes `index.html`.
pub fn output_file_name(template_name: &str) -> &str {
    template_name.trim_end_matches(TEMPLATE_SUFFIX)
}

/// The outcome of publishing a single remote. These are collected in
/// configuration order and rendered on the index page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteResult {
    /// The identifier naming the remote's output files.
    pub id: String,

    /// The URL the remote was listed from.
    pub remote_url: String,

    /// The configured alias, if any.
    pub remote_alias: Option<String>,
}

/// Responsible for templating and writing a remote's output files.
pub struct Writer<'a> {
    /// The template for per-remote pages.
    pub page_template: &'a Template,

    /// The template for the index page.
    pub index_template: &'a Template,

    /// The file name of the index page within `html_directory`.
    pub index_file_name: &'a str,

    /// The directory the JSON trees are written to.
    pub remotes_directory: &'a Path,

    /// The directory the HTML pages are written to.
    pub html_directory: &'a Path,
}

impl Writer<'_> {
    /// The name of the remotes directory as templates see it. Pages locate a
    /// tree at `../{remotes_dir}/{id}.json`.
    fn remotes_dir_name(&self) -> String {
        match self.remotes_directory.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.remotes_directory.to_string_lossy().into_owned(),
        }
    }

    /// Serializes `tree` as JSON to `{remotes_directory}/{id}.json`.
    pub fn write_tree(&self, id: &str, tree: &[Node]) -> Result<PathBuf> {
        let path = self.remotes_directory.join(format!("{}.json", id));
        let mut w = BufWriter::new(std::fs::File::create(&path)?);
        serde_json::to_writer(&mut w, tree)?;
        w.flush()?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Renders the page template for `result` to `{html_directory}/{id}.html`.
    /// The template receives `id`, `remote_url`, `remote_alias`, and
    /// `remotes_dir`.
    pub fn write_page(&self, result: &RemoteResult) -> Result<PathBuf> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(result.id.clone()));
        m.insert(
            "remote_url".to_owned(),
            Value::String(result.remote_url.clone()),
        );
        m.insert(
            "remote_alias".to_owned(),
            option_to_value(&result.remote_alias),
        );
        m.insert("remotes_dir".to_owned(), Value::String(self.remotes_dir_name()));

        let path = self.html_directory.join(format!("{}.html", result.id));
        render(self.page_template, Value::Object(m), &path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Renders the index template to `{html_directory}/{index_file_name}`. The
    /// template receives `results`, `remotes_dir`, and the `generated`
    /// timestamp.
    pub fn write_index(&self, results: &[RemoteResult], generated: &str) -> Result<PathBuf> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("results".to_owned(), results_to_value(results));
        m.insert("remotes_dir".to_owned(), Value::String(self.remotes_dir_name()));
        m.insert("generated".to_owned(), Value::String(generated.to_owned()));

        let path = self.html_directory.join(self.index_file_name);
        render(self.index_template, Value::Object(m), &path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

fn render(template: &Template, value: Value, path: &Path) -> Result<()> {
    let mut w = BufWriter::new(std::fs::File::create(path)?);
    template.execute(&mut w, &gtmpl::Context::from(value)?)?;
    w.flush()?;
    Ok(())
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error serializing a tree.
    Json(serde_json::Error),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Json(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::build_tree;
    use tempfile::TempDir;

    fn template(text: &str) -> Template {
        let mut template = Template::default();
        template.parse(text).unwrap();
        template
    }

    struct Fixture {
        root: TempDir,
        page: Template,
        index: Template,
    }

    impl Fixture {
        fn new() -> Fixture {
            let root = tempfile::tempdir().unwrap();
            std::fs::create_dir(root.path().join("remotes")).unwrap();
            std::fs::create_dir(root.path().join("html")).unwrap();
            Fixture {
                root,
                page: template(
                    "{{.id}}|{{.remote_url}}|{{if .remote_alias}}{{.remote_alias}}{{else}}-{{end}}|{{.remotes_dir}}",
                ),
                index: template(
                    "{{.generated}}:{{range .results}}[{{.id}} {{.remote_url}}]{{end}}:{{.remotes_dir}}",
                ),
            }
        }

        fn dirs(&self) -> (PathBuf, PathBuf) {
            (self.root.path().join("remotes"), self.root.path().join("html"))
        }
    }

    fn result(id: &str, alias: Option<&str>) -> RemoteResult {
        RemoteResult {
            id: id.to_owned(),
            remote_url: format!("svn://example.org/{}", id),
            remote_alias: alias.map(str::to_owned),
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(INDEX_TEMPLATE), "index.html");
        assert_eq!(output_file_name(PAGE_TEMPLATE), "page.html");
        assert_eq!(output_file_name("index.html"), "index.html");
    }

    #[test]
    fn test_write_tree() -> Result<()> {
        let fixture = Fixture::new();
        let (remotes, html) = fixture.dirs();
        let writer = Writer {
            page_template: &fixture.page,
            index_template: &fixture.index,
            index_file_name: "index.html",
            remotes_directory: &remotes,
            html_directory: &html,
        };

        let path = writer.write_tree("demo", &build_tree(&["ä/b"]))?;
        assert_eq!(path, remotes.join("demo.json"));
        assert_eq!(
            std::fs::read_to_string(&path)?,
            r#"[{"text":"ä","children":[{"text":"b","children":[],"icon":"jstree-file"}],"icon":""}]"#
        );
        Ok(())
    }

    #[test]
    fn test_write_page() -> Result<()> {
        let fixture = Fixture::new();
        let (remotes, html) = fixture.dirs();
        let writer = Writer {
            page_template: &fixture.page,
            index_template: &fixture.index,
            index_file_name: "index.html",
            remotes_directory: &remotes,
            html_directory: &html,
        };

        let path = writer.write_page(&result("demo", Some("Demo")))?;
        assert_eq!(path, html.join("demo.html"));
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "demo|svn://example.org/demo|Demo|remotes"
        );

        let path = writer.write_page(&result("x1y2z3", None))?;
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "x1y2z3|svn://example.org/x1y2z3|-|remotes"
        );
        Ok(())
    }

    #[test]
    fn test_write_index() -> Result<()> {
        let fixture = Fixture::new();
        let (remotes, html) = fixture.dirs();
        let writer = Writer {
            page_template: &fixture.page,
            index_template: &fixture.index,
            index_file_name: "index.html",
            remotes_directory: &remotes,
            html_directory: &html,
        };

        let results = vec![result("demo", Some("demo")), result("abc123", None)];
        let path = writer.write_index(&results, "now")?;
        assert_eq!(path, html.join("index.html"));
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "now:[demo svn://example.org/demo][abc123 svn://example.org/abc123]:remotes"
        );
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let fixture = Fixture::new();
        let missing = fixture.root.path().join("missing");
        let writer = Writer {
            page_template: &fixture.page,
            index_template: &fixture.index,
            index_file_name: "index.html",
            remotes_directory: &missing,
            html_directory: &missing,
        };
        assert!(matches!(writer.write_tree("demo", &[]), Err(Error::Io(_))));
    }
}
