//! Numbered interactive menu.

use crate::app::App;
use crate::constants::DEFAULT_PROJECT_NAME;
use crate::output;
use crate::ops::report;
use crate::prompt::Prompt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Push,
    Pull,
    SmartPull,
    Fetch,
    SwitchBranch,
    SwitchRemote,
    Status,
    StashSave,
    StashList,
    StashPop,
    UndoCommit,
    Setup,
    Doctor,
    Exit,
}

impl MenuCommand {
    /// Commands in display order; the position is the menu number, `Exit` is 0.
    pub const ALL: [MenuCommand; 14] = [
        MenuCommand::Exit,
        MenuCommand::Push,
        MenuCommand::Pull,
        MenuCommand::SmartPull,
        MenuCommand::Fetch,
        MenuCommand::SwitchBranch,
        MenuCommand::SwitchRemote,
        MenuCommand::Status,
        MenuCommand::StashSave,
        MenuCommand::StashList,
        MenuCommand::StashPop,
        MenuCommand::UndoCommit,
        MenuCommand::Setup,
        MenuCommand::Doctor,
    ];

    pub fn from_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Push => "Push changes",
            MenuCommand::Pull => "Pull changes",
            MenuCommand::SmartPull => "Smart pull (auto-stash)",
            MenuCommand::Fetch => "Fetch all remotes",
            MenuCommand::SwitchBranch => "Switch branch",
            MenuCommand::SwitchRemote => "Switch remote",
            MenuCommand::Status => "Git status",
            MenuCommand::StashSave => "Stash changes",
            MenuCommand::StashList => "List stashes",
            MenuCommand::StashPop => "Apply last stash",
            MenuCommand::UndoCommit => "Undo last commit",
            MenuCommand::Setup => "Setup / Reconfigure",
            MenuCommand::Doctor => "Doctor (health check)",
            MenuCommand::Exit => "Exit",
        }
    }
}

/// Runs one command. Returns false when the menu should close.
pub fn dispatch(app: &App, prompt: &dyn Prompt, command: MenuCommand) -> io::Result<bool> {
    let ops = app.ops(prompt);
    match command {
        MenuCommand::Push => {
            let message = prompt.input("Commit message")?;
            report(ops.push(&message), |m| output::success(&m));
        }
        MenuCommand::Pull => {
            report(ops.pull(), |m| output::success(&m));
        }
        MenuCommand::SmartPull => {
            report(ops.smart_pull(), |m| output::success(&m));
        }
        MenuCommand::Fetch => {
            report(ops.fetch_all(), |m| output::success(&m));
        }
        MenuCommand::SwitchBranch => {
            let name = prompt.input("New branch name")?;
            report(ops.switch_branch(&name), |m| output::success(&m));
        }
        MenuCommand::SwitchRemote => {
            let name = prompt.input("Remote name")?;
            let url = prompt.input("Remote URL")?;
            report(ops.switch_remote(&name, &url), |m| output::success(&m));
        }
        MenuCommand::Status => {
            report(ops.status(), |()| {});
        }
        MenuCommand::StashSave => {
            let message = prompt.input("Stash message (optional)")?;
            report(ops.stash_save(Some(&message)), |m| output::success(&m));
        }
        MenuCommand::StashList => {
            report(ops.stash_list(), |()| {});
        }
        MenuCommand::StashPop => {
            report(ops.stash_pop(), |m| output::success(&m));
        }
        MenuCommand::UndoCommit => {
            report(ops.undo_last_commit(), |m| output::success(&m));
        }
        MenuCommand::Setup => {
            app.setup(prompt).run();
        }
        MenuCommand::Doctor => output::print_checks(&app.doctor().run()),
        MenuCommand::Exit => {
            output::info("Goodbye");
            return Ok(false);
        }
    }
    Ok(true)
}

fn print_context(app: &App) {
    let config = app.store.load();
    let project_dir = config.resolve_workdir(app.cwd());
    let project = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_PROJECT_NAME);

    println!("Project : {project}");
    println!("Path    : {}", project_dir.display());
    println!("Branch  : {}", config.branch);
    println!("Remote  : {}", config.remote);
    if let Some(url) = config.repo_url() {
        println!("Repo    : {url}");
    }
    println!();
}

fn print_menu() {
    for (index, command) in MenuCommand::ALL.iter().enumerate().skip(1) {
        println!("{index:>2}) {}", command.label());
    }
    println!("{:>2}) {}", 0, MenuCommand::Exit.label());
}

/// Shows the menu until the user picks Exit.
pub fn run(app: &App, prompt: &dyn Prompt) -> io::Result<()> {
    loop {
        output::clear_screen();
        output::header("Git Genius");
        print_context(app);
        print_menu();

        let choice = prompt.input("Select option")?;
        let keep_going = match MenuCommand::from_choice(&choice) {
            Some(command) => dispatch(app, prompt, command)?,
            None => {
                output::error("Invalid option, please try again");
                true
            }
        };
        if !keep_going {
            return Ok(());
        }

        prompt.input("Press Enter to continue")?;
    }
}
