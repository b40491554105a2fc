use anyhow::Result;
use clap::Parser;
use console::style;

use release_publish::config;
use release_publish::github::GithubClient;
use release_publish::report::ConsoleReporter;
use release_publish::workflow::{run_release_workflow, WorkflowArgs};

#[derive(clap::Parser)]
#[command(
    name = "release-publish",
    version,
    about = "Compute the next release version from conventional commits and publish a tag and release"
)]
struct Args {
    #[arg(short, long, help = "Repository in owner/name form")]
    repo: String,

    #[arg(
        short,
        long,
        default_value = "prod",
        help = "Target environment (dev, test, prod)"
    )]
    environment: String,

    #[arg(long, help = "Commit id to release (head of the comparison range)")]
    head: String,

    #[arg(long, help = "Reuse a fixed tag instead of the computed version")]
    tag: Option<String>,

    #[arg(long, help = "Release title (defaults to the tag name)")]
    title: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview without creating tags or releases")]
    dry_run: bool,

    #[arg(short, long, help = "Show debug output")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let reporter = ConsoleReporter::new(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", style("ERROR:").red(), e);
            std::process::exit(1);
        }
    };

    // A dry run only reads from the host, so anonymous access is enough
    // to preview a release on a public repository.
    let token = match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ if args.dry_run => String::new(),
        _ => {
            eprintln!(
                "{} No repo token specified. Please set the GITHUB_TOKEN environment variable.",
                style("ERROR:").red()
            );
            std::process::exit(1);
        }
    };

    let host = match GithubClient::new(&args.repo, token) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("{} {}", style("ERROR:").red(), e);
            std::process::exit(1);
        }
    };

    let workflow_args = WorkflowArgs {
        environment: args.environment,
        head: args.head,
        fixed_tag: args.tag,
        title: args.title,
        dry_run: args.dry_run,
    };

    match run_release_workflow(&workflow_args, &config, &host, &reporter) {
        Ok(result) => {
            if result.published {
                println!(
                    "\n{} Published release {}\n",
                    style("✓").green(),
                    result.tag
                );
            } else {
                println!(
                    "\n{} Dry run complete, next release would be {}\n",
                    style("✓").green(),
                    result.tag
                );
            }
            if !result.changelog.is_empty() {
                println!("{}", result.changelog);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", style("ERROR:").red(), e);
            std::process::exit(1);
        }
    }
}
