mod render;

use std::fs;
use std::process::exit;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use log::warn;

use gitops::{paginate, publish_report, ChannelConfig, GitHubChannel, GITHUB_API_URL};
use manidiff_defs::{ChangeRecord, ChannelError, InvalidDocumentPolicy, ReportConfig, DEFAULT_TITLE};
use manidiff_utils::{diff_collections, parse_manifests, setup_logging};
use render::{render_json, render_plain};

#[tokio::main]
async fn main() {
    setup_logging().unwrap();

    let matches = Command::new("manidiff")
        .version("0.1.0")
        .about("Diffs two sets of rendered manifests and reports the changes to a pull request")
        .arg(
            Arg::new("current")
                .help("Path to the current (newly rendered) manifest set")
                .required(true),
        )
        .arg(
            Arg::new("target")
                .help("Path to the target (deployed) manifest set")
                .required(true),
        )
        .arg(
            Arg::new("repo")
                .long("repo")
                .help("GitHub repository as owner/name; posting requires --repo, --pr and a token"),
        )
        .arg(
            Arg::new("pr")
                .long("pr")
                .value_parser(value_parser!(u64))
                .help("Pull request number to comment on"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .help("GitHub token; falls back to the GITHUB_TOKEN environment variable"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .default_value(GITHUB_API_URL)
                .help("GitHub API base URL, e.g. for GitHub Enterprise"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .default_value(DEFAULT_TITLE)
                .help("Report title; also used to match prior reports to supersede"),
        )
        .arg(
            Arg::new("subtitle")
                .long("subtitle")
                .default_value("")
                .help("Optional line shown under the report title"),
        )
        .arg(
            Arg::new("max-length")
                .long("max-length")
                .value_parser(value_parser!(usize))
                .default_value("60000")
                .help("Maximum characters per report segment"),
        )
        .arg(
            Arg::new("on-invalid")
                .long("on-invalid")
                .value_parser(["fail", "skip"])
                .default_value("fail")
                .help("Whether an invalid document aborts the run or is skipped with a warning"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Console output format when not posting to a pull request"),
        )
        .get_matches();

    if let Err(e) = run(&matches).await {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let policy = match matches.get_one::<String>("on-invalid").map(String::as_str) {
        Some("skip") => InvalidDocumentPolicy::Skip,
        _ => InvalidDocumentPolicy::Fail,
    };
    let config = ReportConfig {
        max_segment_length: *matches.get_one::<usize>("max-length").expect("has default"),
        title: matches
            .get_one::<String>("title")
            .expect("has default")
            .clone(),
        subtitle: matches
            .get_one::<String>("subtitle")
            .expect("has default")
            .clone(),
        on_invalid_document: policy,
        ..ReportConfig::default()
    };

    let current_path = matches.get_one::<String>("current").expect("required");
    let target_path = matches.get_one::<String>("target").expect("required");
    let current_text = fs::read_to_string(current_path)
        .with_context(|| format!("failed to read input resource '{}'", current_path))?;
    let target_text = fs::read_to_string(target_path)
        .with_context(|| format!("failed to read input resource '{}'", target_path))?;

    let current = parse_manifests(&current_text, policy)
        .with_context(|| format!("failed to parse '{}'", current_path))?;
    let target = parse_manifests(&target_text, policy)
        .with_context(|| format!("failed to parse '{}'", target_path))?;

    let records = diff_collections(&current, &target);
    let segments = paginate(&records, &config);

    let token = matches
        .get_one::<String>("token")
        .cloned()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let channel = match (
        matches.get_one::<String>("repo"),
        matches.get_one::<u64>("pr"),
        token,
    ) {
        (Some(repo), Some(pr), Some(token)) => Some(ChannelConfig {
            repository: repo.clone(),
            pull_request: *pr,
            token,
            api_url: matches
                .get_one::<String>("api-url")
                .expect("has default")
                .clone(),
        }),
        _ => None,
    };

    match channel {
        Some(channel_config) => match post(channel_config, &config, &segments).await {
            Ok(()) => {
                println!("Posted {} report segment(s)", segments.len());
            }
            Err(e) => {
                // Delivery failures never block the workflow; surface the
                // diff on the console instead.
                warn!("posting report failed: {}", e);
                print_fallback(matches, &records);
            }
        },
        None => print_fallback(matches, &records),
    }

    Ok(())
}

async fn post(
    channel_config: ChannelConfig,
    config: &ReportConfig,
    segments: &[String],
) -> Result<(), ChannelError> {
    let channel = GitHubChannel::connect(channel_config).await?;
    publish_report(&channel, &config.title, segments).await
}

fn print_fallback(matches: &ArgMatches, records: &[ChangeRecord]) {
    let rendered = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => render_json(records),
        _ => render_plain(records),
    };
    println!("{}", rendered);
}
