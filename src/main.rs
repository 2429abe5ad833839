use anyhow::Result;
use clap::{crate_version, App, Arg, ArgMatches};
use log::{error, info};
use std::path::Path;
use svnquest::build::build_site;
use svnquest::config::Config;
use svnquest::listing::SvnLister;

fn main() {
    let matches = App::new("svnquest")
        .version(crate_version!())
        .about("Publishes Subversion repository listings as a static site")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("The configuration file (defaults to the nearest config.yaml)"),
        )
        .arg(
            Arg::with_name("svn")
                .long("svn")
                .value_name("EXECUTABLE")
                .takes_value(true)
                .help("The svn executable used for listing remotes"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enables debug logging"),
        )
        .get_matches();

    let level = match matches.is_present("verbose") {
        true => "debug",
        false => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = match matches.value_of("config") {
        Some(path) => Config::from_project_file(Path::new(path))?,
        None => Config::from_directory(&std::env::current_dir()?)?,
    };
    let lister = SvnLister::new(matches.value_of("svn").unwrap_or(&config.svn));
    let results = build_site(&config, &lister)?;
    info!(
        "Published {} remote(s) to {}",
        results.len(),
        config.html_directory.display()
    );
    Ok(())
}
