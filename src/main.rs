use clap::{Parser, Subcommand};
use git_genius::app::App;
use git_genius::constants::{DEFAULT_API_URL, DEFAULT_PROBE_URL, GIT_DOWNLOAD_URL, PROBE_TIMEOUT};
use git_genius::logging::{self, Verbosity};
use git_genius::network::NetworkStatus;
use git_genius::ops::report;
use git_genius::prompt::TerminalPrompt;
use git_genius::{git, menu, output};

#[derive(Parser)]
#[command(name = "genius", version, about = "Guided front end for everyday git")]
struct Cli {
    /// Show debug diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Only show errors in diagnostics
    #[arg(short, long)]
    quiet: bool,

    /// Skip the network probe and GitHub validation
    #[arg(long)]
    offline: bool,

    /// URL used to check internet reachability at startup
    #[arg(long, env = "GIT_GENIUS_PROBE_URL", default_value = DEFAULT_PROBE_URL)]
    probe_url: String,

    /// GitHub API base URL
    #[arg(long, env = "GIT_GENIUS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show git status
    Status,
    /// Stage everything, commit and push
    Push {
        #[arg(short, long)]
        message: String,
    },
    /// Fetch and merge the default branch
    Pull,
    /// Stash local changes, pull, and restore them
    SmartPull,
    /// Fetch all remotes
    Fetch,
    /// Create or reset a branch and make it the default
    SwitchBranch { name: String },
    /// Point a remote at a URL and make it the default
    SwitchRemote { name: String, url: String },
    /// Stash operations
    #[command(subcommand)]
    Stash(StashCommand),
    /// Undo the last commit, keeping its changes
    Undo,
    /// Guided setup
    Setup,
    /// Health check
    Doctor,
}

#[derive(Subcommand)]
enum StashCommand {
    Save {
        #[arg(short, long)]
        message: Option<String>,
    },
    List,
    Pop,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    if !git::is_installed() {
        output::error("Git is not installed on this system");
        output::info(&format!("Download Git from: {GIT_DOWNLOAD_URL}"));
        std::process::exit(1);
    }

    let network = if cli.offline {
        NetworkStatus::Offline
    } else {
        let spinner = output::Spinner::start("Checking internet connection...");
        let status = NetworkStatus::probe(&cli.probe_url, PROBE_TIMEOUT);
        spinner.finish();
        status
    };

    let cwd = std::env::current_dir()?;
    let app = App::new(&cwd, network, &cli.api_url);
    let prompt = TerminalPrompt::new();
    let ops = app.ops(&prompt);
    let done = |m: String| output::success(&m);

    let succeeded = match cli.command {
        None => {
            if !app.git.ensure_repo(&prompt)? {
                output::warn("Continuing without a repository; run Setup to choose one");
            }
            menu::run(&app, &prompt)?;
            true
        }
        Some(Command::Status) => report(ops.status(), |()| {}),
        Some(Command::Push { message }) => report(ops.push(&message), done),
        Some(Command::Pull) => report(ops.pull(), done),
        Some(Command::SmartPull) => report(ops.smart_pull(), done),
        Some(Command::Fetch) => report(ops.fetch_all(), done),
        Some(Command::SwitchBranch { name }) => report(ops.switch_branch(&name), done),
        Some(Command::SwitchRemote { name, url }) => report(ops.switch_remote(&name, &url), done),
        Some(Command::Stash(StashCommand::Save { message })) => {
            report(ops.stash_save(message.as_deref()), done)
        }
        Some(Command::Stash(StashCommand::List)) => report(ops.stash_list(), |()| {}),
        Some(Command::Stash(StashCommand::Pop)) => report(ops.stash_pop(), done),
        Some(Command::Undo) => report(ops.undo_last_commit(), done),
        Some(Command::Setup) => app.setup(&prompt).run().is_completed(),
        Some(Command::Doctor) => {
            output::print_checks(&app.doctor().run());
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
