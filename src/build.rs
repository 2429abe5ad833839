//! Exports the [`build_site`] function which stitches together the high-level
//! steps of publishing the configured remotes: cleaning the output
//! directories, listing each remote ([`crate::listing`]), building its tree
//! ([`crate::tree`]), and rendering the JSON, detail pages, and index page
//! ([`crate::write`]).

use crate::config::Config;
use crate::id::remote_id;
use crate::listing::{Error as ListingError, Lister};
use crate::tree::build_tree;
use crate::util::remove_contents;
use crate::write::{Error as WriteError, *};
use gtmpl::Template;
use log::{error, info};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Builds the site described by `config`, obtaining listings from `lister`.
/// Remotes are processed one at a time in configuration order. The first
/// remote that can't be listed aborts the run, so a successful return always
/// means every configured remote was published. Returns the published
/// remotes in the order they appear on the index page.
pub fn build_site<L: Lister + ?Sized>(config: &Config, lister: &L) -> Result<Vec<RemoteResult>> {
    // Parse the templates before touching the output directories so a broken
    // template doesn't leave an empty site behind.
    let page_template = parse_template(&config.templates_directory.join(PAGE_TEMPLATE))?;
    let index_template = parse_template(&config.templates_directory.join(INDEX_TEMPLATE))?;

    // Every run regenerates the whole site.
    clean(&config.remotes_directory)?;
    clean(&config.html_directory)?;

    let writer = Writer {
        page_template: &page_template,
        index_template: &index_template,
        index_file_name: output_file_name(INDEX_TEMPLATE),
        remotes_directory: &config.remotes_directory,
        html_directory: &config.html_directory,
    };

    let mut results: Vec<RemoteResult> = Vec::with_capacity(config.remotes.len());
    for remote in config.remotes.iter() {
        let id = remote_id(remote.alias.as_deref());
        let url = remote.url.as_str();

        let listing = match lister.list(url, &remote.credentials()) {
            Ok(listing) => listing,
            Err(err) => {
                error!("Cannot list url: {}", url);
                return Err(Error::Listing {
                    url: url.to_owned(),
                    err,
                });
            }
        };

        let tree = build_tree(&listing);
        writer.write_tree(&id, &tree)?;

        let result = RemoteResult {
            id,
            remote_url: url.to_owned(),
            remote_alias: remote.alias.clone(),
        };
        writer.write_page(&result)?;
        info!("Published {} as `{}`", url, result.id);
        results.push(result);
    }

    if results.is_empty() {
        return Err(Error::NoRemotes);
    }
    writer.write_index(&results, &chrono::Local::now().to_rfc3339())?;
    Ok(results)
}

fn clean(dir: &Path) -> Result<()> {
    info!("Cleaning {}", dir.display());
    remove_contents(dir).map_err(|e| Error::Clean {
        path: dir.to_owned(),
        err: e,
    })
}

// Loads the template file and parses it.
fn parse_template(template_file: &Path) -> Result<Template> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(template_file)
        .map_err(|e| Error::OpenTemplateFile {
            path: template_file.to_owned(),
            err: e,
        })?
        .read_to_string(&mut contents)?;

    let mut template = Template::default();
    template.parse(&contents).map_err(|e| Error::ParseTemplate {
        path: template_file.to_owned(),
        err: e,
    })?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during listing, writing,
/// cleaning output directories, parsing template files, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned when a remote can't be listed. This aborts the whole run.
    Listing { url: String, err: ListingError },

    /// Returned for errors writing trees and pages to disk.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate { path: PathBuf, err: String },

    /// Returned when no remotes were published.
    NoRemotes,

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Listing { url, err } => write!(f, "Listing url '{}': {}", url, err),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { path, err } => {
                write!(f, "Parsing template file '{}': {}", path.display(), err)
            }
            Error::NoRemotes => write!(f, "No remotes were generated"),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Listing { url: _, err } => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::NoRemotes => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
