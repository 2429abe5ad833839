//! The library code for `svnquest`, which publishes the recursive listing of
//! Subversion repositories as a static site with one collapsible tree per
//! repository. A run breaks down into the following steps:
//!
//! 1. Loading the list of remotes ([`crate::config`])
//! 2. Listing each remote's paths ([`crate::listing`])
//! 3. Converting each flat listing into a tree ([`crate::tree`])
//! 4. Writing each tree as JSON plus a detail page, then one index page for
//!    the whole run ([`crate::write`])
//!
//! [`crate::build::build_site`] drives the steps for every configured remote.
//! The tree conversion is the only part with real logic; a remote's output
//! files are named by an identifier from [`crate::id`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod id;
pub mod listing;
pub mod tree;
mod util;
pub mod value;
pub mod write;
