mod error;
mod extract;
mod log;
mod model;
mod scan;
mod sources;
mod worker;

pub use error::{Error, Result};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::init_tracing_subscriber;
use model::{ensure_dir, export_to_json, export_to_text, read_domains};
use scan::{scan, Settings, DOMAINS_ENUMERATION_CONCURRENCY, HTTP_REQUEST_TIMEOUT_MS};
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .subcommand(
            Command::new("sources").about("List all sources").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print the catalog as JSON"),
            ),
        )
        .subcommand(
            Command::new("enum")
                .about("Enumerate the subdomains of one or more domains")
                .arg(
                    Arg::new("domain")
                        .short('d')
                        .long("domain")
                        .value_name("DOMAIN")
                        .help("The domain to enumerate subdomains for")
                        .required_unless_present("file"),
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("A file containing a list of domains, one per line"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("OUTPUT")
                        .help("File to save the results in")
                        .default_value("subdomains.txt"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format")
                        .value_parser(["txt", "json", "both"])
                        .default_value("txt"),
                )
                .arg(
                    Arg::new("concurrency")
                        .short('c')
                        .long("concurrency")
                        .value_name("N")
                        .help(format!(
                            "Maximum number of domains enumerated at once [default: {}]",
                            DOMAINS_ENUMERATION_CONCURRENCY
                        ))
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("MS")
                        .help(format!(
                            "Timeout of each HTTP request in milliseconds [default: {}]",
                            HTTP_REQUEST_TIMEOUT_MS
                        ))
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("logs")
                        .short('s')
                        .long("logs")
                        .action(ArgAction::SetTrue)
                        .help("Save logs into a .log file"),
                ),
        )
        .arg_required_else_help(true)
        .get_matches();

    match cli.subcommand() {
        Some(("sources", args)) => {
            if args.get_flag("json") {
                println!("{}", sources::catalog_json()?);
            } else {
                sources::display_all();
            }
        }
        Some(("enum", args)) => run(args).await?,

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            return Err(Error::CliUsage("Command not handled".into()));
        }
    }

    Ok(())
}

async fn run(args: &ArgMatches) -> Result<()> {
    let output = args
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("subdomains.txt");
    let output = Path::new(output);
    let output_dir = output.parent().unwrap_or(Path::new(""));
    ensure_dir(output_dir)?;

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let log_dir = if output_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        output_dir
    };
    init_tracing_subscriber(args.get_flag("logs"), log_dir, &format!("{}", timestamp))?;

    let domains = collect_domains(
        args.get_one::<String>("domain").map(String::as_str),
        args.get_one::<String>("file").map(Path::new),
    )?;

    let defaults = Settings::default();
    let settings = Settings {
        concurrency: args
            .get_one::<usize>("concurrency")
            .copied()
            .unwrap_or(defaults.concurrency),
        http_timeout: args
            .get_one::<u64>("timeout")
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or(defaults.http_timeout),
        ..defaults
    };

    info!("Enumerating {} domains (run_{})", domains.len(), timestamp);
    let summary = scan(&settings, sources::registry(), domains).await?;

    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("txt");
    if format == "both" || format == "txt" {
        export_to_text(&summary.subdomains, output)?;
        info!("Results saved in {}", output.display());
    }
    if format == "both" || format == "json" {
        let json_path = output.with_extension("json");
        export_to_json(&summary.subdomains, &json_path)?;
        info!("Results saved in {}", json_path.display());
    }

    Ok(())
}

/// `-d` first then the file content, duplicates removed, order kept.
fn collect_domains(domain: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    let mut domains = Vec::new();

    if let Some(domain) = domain {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(Error::EmptyDomain);
        }
        domains.push(domain.to_string());
    }
    if let Some(file) = file {
        domains.extend(read_domains(file)?);
    }

    let mut seen = HashSet::new();
    domains.retain(|domain| seen.insert(domain.clone()));
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn domain_and_file_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "b.com\n\na.com\nb.com\n").unwrap();

        let domains = collect_domains(Some("a.com"), Some(&path)).unwrap();

        assert_eq!(vec!["a.com", "b.com"], domains);
    }

    #[test]
    fn empty_domain_is_rejected() {
        assert!(matches!(
            collect_domains(Some("  "), None),
            Err(Error::EmptyDomain)
        ));
    }

    #[test]
    fn blank_file_gives_no_domain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "\n\n").unwrap();

        assert!(collect_domains(None, Some(&path)).unwrap().is_empty());
    }
}
