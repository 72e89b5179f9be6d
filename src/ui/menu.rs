//! Menu commands and their handlers.
//!
//! Each menu choice is an enumerated command parsed from the typed
//! character and dispatched with an exhaustive match, one handler per
//! variant. Repository and branch lists are re-fetched every time they
//! are displayed; nothing is cached between renders.

use crate::audit::ActionLog;
use crate::config::{Config, expand_tilde};
use crate::error::{HubmanError, Result};
use crate::github::{
    BranchOps, ContentOps, Contents, CreateRepo, FileAction, GitHubClient, Repo, RepoOps,
    upload_path,
};
use crate::ui::prompt::Prompter;
use crate::ui::table::Table;
use crate::vcs::{GitRunner, PushOutcome, SyncManager};

/// Top-level menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    CreateRepo,
    RenameRepo,
    DeleteRepo,
    ManageRepo,
    UploadPath,
    LocalSync,
    ListRepos,
    Exit,
}

impl MainAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateRepo),
            "2" => Some(Self::RenameRepo),
            "3" => Some(Self::DeleteRepo),
            "4" => Some(Self::ManageRepo),
            "5" => Some(Self::UploadPath),
            "6" => Some(Self::LocalSync),
            "7" => Some(Self::ListRepos),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Commands of the per-repository management menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    CreateFolder,
    EditFile,
    DeleteFile,
    ListFiles,
    ViewFile,
    Branches,
    Settings,
    Upload,
    Back,
}

impl RepoAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" => Some(Self::CreateFolder),
            "b" => Some(Self::EditFile),
            "c" => Some(Self::DeleteFile),
            "d" => Some(Self::ListFiles),
            "e" => Some(Self::ViewFile),
            "f" => Some(Self::Branches),
            "g" => Some(Self::Settings),
            "h" => Some(Self::Upload),
            "i" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Branch submenu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    Create,
    Delete,
    SwitchDefault,
}

impl BranchAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::Delete),
            "3" => Some(Self::SwitchDefault),
            _ => None,
        }
    }
}

/// Repository settings submenu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Rename,
    Visibility,
    Delete,
    Transfer,
    Description,
}

impl SettingsAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Rename),
            "2" => Some(Self::Visibility),
            "3" => Some(Self::Delete),
            "4" => Some(Self::Transfer),
            "5" => Some(Self::Description),
            _ => None,
        }
    }
}

/// Local sync menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAction {
    Pull,
    Push,
    Sync,
    Exit,
}

impl LocalAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Pull),
            "2" => Some(Self::Push),
            "3" => Some(Self::Sync),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// The interactive application: one client, one config, one action log,
/// one git runner, used by one flow at a time.
pub struct App<'a> {
    pub client: &'a GitHubClient,
    pub config: &'a Config,
    pub log: &'a ActionLog,
    pub git: &'a dyn GitRunner,
}

impl App<'_> {
    /// Run the main menu loop until the user exits.
    pub fn run(&self, prompt: &mut dyn Prompter) -> Result<()> {
        loop {
            println!();
            println!("=== Main Menu ===");
            println!("1) Create new repository");
            println!("2) Rename repository");
            println!("3) Delete repository");
            println!("4) Manage repository (files/branches)");
            println!("5) Upload local folder/file to a repo (git push via temp clone)");
            println!("6) Local git pull/push manager (clone/pull/push/sync)");
            println!("7) List repositories");
            println!("8) Exit");

            let choice = match prompt.ask("Enter your choice", None) {
                Ok(choice) => choice,
                Err(HubmanError::UserCancelled) => return Ok(()),
                Err(e) => return Err(e),
            };
            let Some(action) = MainAction::parse(&choice) else {
                println!("Invalid choice.");
                continue;
            };

            if action == MainAction::Exit {
                println!("Goodbye.");
                return Ok(());
            }
            if let Err(e) = self.handle_main(prompt, action) {
                self.report(&e);
            }
        }
    }

    fn handle_main(&self, prompt: &mut dyn Prompter, action: MainAction) -> Result<()> {
        match action {
            MainAction::CreateRepo => self.create_repo_interactive(prompt).map(|_| ()),
            MainAction::RenameRepo => {
                if let Some(repo) = self.select_repo(prompt)? {
                    self.rename_interactive(prompt, repo).map(|_| ())
                } else {
                    Ok(())
                }
            }
            MainAction::DeleteRepo => {
                if let Some(repo) = self.select_repo(prompt)? {
                    self.delete_confirm(prompt, &repo).map(|_| ())
                } else {
                    Ok(())
                }
            }
            MainAction::ManageRepo => {
                if let Some(repo) = self.select_repo(prompt)? {
                    self.repo_menu(prompt, repo)
                } else {
                    Ok(())
                }
            }
            MainAction::UploadPath => {
                if let Some(repo) = self.select_repo(prompt)? {
                    self.upload_interactive(prompt, &repo)
                } else {
                    Ok(())
                }
            }
            MainAction::LocalSync => self.local_menu(prompt),
            MainAction::ListRepos => self.list_repos_table(),
            // Exit is handled by the loop before dispatch.
            MainAction::Exit => Ok(()),
        }
    }

    fn report(&self, error: &HubmanError) {
        if error.is_cancelled() {
            println!("Cancelled.");
        } else {
            println!("Error: {error}");
        }
    }

    // --- repository selection -------------------------------------------

    /// Re-fetch the repository list and let the user pick one by number.
    /// `0` creates a new repository instead.
    fn select_repo(&self, prompt: &mut dyn Prompter) -> Result<Option<Repo>> {
        let repos = self.client.list_repos(200)?;
        if repos.is_empty() {
            println!("No repositories found.");
            if prompt.confirm("Create one now?", false)? {
                return self.create_repo_interactive(prompt).map(Some);
            }
            return Ok(None);
        }

        let mut table = Table::new(
            format!("Your repositories (top {})", repos.len()),
            &["No", "Name", "Visibility"],
        );
        for (i, repo) in repos.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                repo.name.clone(),
                repo.visibility().to_owned(),
            ]);
        }
        print!("{}", table.render());
        println!("0 -> Create new repository");

        let choice = prompt.ask("Enter repo number", Some("1"))?;
        let Ok(index) = choice.parse::<usize>() else {
            println!("Invalid input.");
            return Ok(None);
        };
        if index == 0 {
            return self.create_repo_interactive(prompt).map(Some);
        }
        if (1..=repos.len()).contains(&index) {
            return Ok(Some(repos[index - 1].clone()));
        }
        println!("Choice out of range.");
        Ok(None)
    }

    fn create_repo_interactive(&self, prompt: &mut dyn Prompter) -> Result<Repo> {
        let name = prompt.ask("Repository name", None)?;
        if name.is_empty() {
            return Err(HubmanError::UserCancelled);
        }
        let description = prompt.ask("Description", Some(&format!("Repository {name}")))?;
        let private = prompt.confirm("Make repository PRIVATE?", false)?;
        let auto_init = prompt.confirm("Initialize with a README (auto-init)?", false)?;

        let repo = self.client.create_repo(&CreateRepo {
            name,
            description,
            private,
            auto_init,
        })?;
        println!("Created repository: {}", repo.full_name);
        let _ = self.log.record(&format!("Created repository {}", repo.full_name));
        Ok(repo)
    }

    fn rename_interactive(&self, prompt: &mut dyn Prompter, repo: Repo) -> Result<Repo> {
        let new_name = prompt.ask("New repository name", Some(&repo.name))?;
        let renamed = self.client.rename_repo(&repo, &new_name)?;
        println!("Renamed to {}", renamed.name);
        let _ = self
            .log
            .record(&format!("Renamed repo {} to {}", repo.full_name, renamed.name));
        Ok(renamed)
    }

    /// Returns true when the repository was actually deleted.
    fn delete_confirm(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<bool> {
        let confirmed = prompt.confirm(
            &format!(
                "Are you sure you want to DELETE repository '{}'? This is irreversible!",
                repo.full_name
            ),
            false,
        )?;
        if !confirmed {
            println!("Delete cancelled.");
            return Ok(false);
        }
        self.client.delete_repo(repo)?;
        println!("Deleted repository: {}", repo.full_name);
        let _ = self.log.record(&format!("Deleted repo {}", repo.full_name));
        Ok(true)
    }

    fn list_repos_table(&self) -> Result<()> {
        let repos = self.client.list_repos(200)?;
        let mut table = Table::new(
            format!("Your repositories (top {})", repos.len()),
            &["No", "Name", "Visibility"],
        );
        for (i, repo) in repos.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                repo.name.clone(),
                repo.visibility().to_owned(),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    // --- per-repository management --------------------------------------

    fn repo_menu(&self, prompt: &mut dyn Prompter, mut repo: Repo) -> Result<()> {
        loop {
            println!();
            println!(
                "--- Repository: {} (default: {}) ---",
                repo.full_name, repo.default_branch
            );
            println!("a) Create folder");
            println!("b) Create/Edit file");
            println!("c) Delete file");
            println!("d) List files");
            println!("e) View file");
            println!("f) Branch operations");
            println!("g) Repo settings (rename/visibility/delete/transfer)");
            println!("h) Upload local path via git push (temp clone)");
            println!("i) Return to main menu");

            let choice = prompt.ask("Choose option", None)?;
            let Some(action) = RepoAction::parse(&choice) else {
                println!("Invalid option.");
                continue;
            };

            let result = match action {
                RepoAction::CreateFolder => self.create_folder(prompt, &repo),
                RepoAction::EditFile => self.edit_file(prompt, &repo),
                RepoAction::DeleteFile => self.delete_file(prompt, &repo),
                RepoAction::ListFiles => self.list_files(prompt, &repo),
                RepoAction::ViewFile => self.view_file(prompt, &repo),
                RepoAction::Branches => match self.branch_menu(prompt, &repo) {
                    Ok(updated) => {
                        repo = updated;
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
                RepoAction::Settings => match self.settings_menu(prompt, repo.clone()) {
                    Ok(Some(updated)) => {
                        repo = updated;
                        Ok(())
                    }
                    // The repository is gone; the menu has nothing left to manage.
                    Ok(None) => return Ok(()),
                    Err(e) => Err(e),
                },
                RepoAction::Upload => self.upload_interactive(prompt, &repo),
                RepoAction::Back => return Ok(()),
            };
            if let Err(e) = result {
                self.report(&e);
            }
        }
    }

    fn create_folder(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let folder = prompt.ask("Folder path (e.g., src/utils)", None)?;
        if folder.is_empty() {
            return Err(HubmanError::UserCancelled);
        }
        let branch = prompt.ask("Branch name", Some(&repo.default_branch))?;
        let placeholder = self.client.create_folder_placeholder(repo, &folder, &branch)?;
        println!("Created folder {folder} on {branch}");
        let _ = self.log.record(&format!(
            "Created folder placeholder {placeholder} on {}@{branch}",
            repo.full_name
        ));
        Ok(())
    }

    fn edit_file(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let path = prompt.ask("Repository file path (e.g., README.md or src/app.rs)", None)?;
        if path.is_empty() {
            return Err(HubmanError::UserCancelled);
        }
        let content = prompt.ask("Enter content (blank creates an empty file)", Some(""))?;
        let branch = prompt.ask("Branch to use", Some(&repo.default_branch))?;

        match self.client.put_file(repo, &path, &content, &branch)? {
            FileAction::Created => {
                println!("Created {path} on {branch}");
                let _ = self
                    .log
                    .record(&format!("Created file {path} on {}@{branch}", repo.full_name));
            }
            FileAction::Updated => {
                println!("Updated {path} on {branch}");
                let _ = self
                    .log
                    .record(&format!("Updated file {path} on {}@{branch}", repo.full_name));
            }
        }
        Ok(())
    }

    fn delete_file(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let path = prompt.ask("File path to delete (e.g., src/app.rs)", None)?;
        if path.is_empty() {
            return Err(HubmanError::UserCancelled);
        }
        let branch = prompt.ask("Branch name", Some(&repo.default_branch))?;
        self.client.delete_file(repo, &path, &branch)?;
        println!("Deleted {path} on {branch}");
        let _ = self
            .log
            .record(&format!("Deleted file {path} on {}@{branch}", repo.full_name));
        Ok(())
    }

    fn list_files(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let path = prompt.ask("Folder path in repo (blank for root)", Some(""))?;
        let branch = prompt.ask("Branch name", Some(&repo.default_branch))?;

        let shown = if path.is_empty() { "." } else { path.as_str() };
        let mut table = Table::new(
            format!("Files in {}/{shown} [{branch}]", repo.full_name),
            &["Type", "Path", "Size"],
        );
        match self.client.get_content(repo, &path, &branch)? {
            Contents::Directory(entries) => {
                for entry in entries {
                    table.add_row(vec![
                        if entry.is_dir() { "Folder".into() } else { "File".into() },
                        entry.path,
                        entry.size.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                    ]);
                }
            }
            Contents::File(entry) => {
                table.add_row(vec![
                    "File".into(),
                    entry.path,
                    entry.size.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                ]);
            }
        }
        print!("{}", table.render());
        Ok(())
    }

    fn view_file(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let path = prompt.ask("File path to view", None)?;
        if path.is_empty() {
            return Err(HubmanError::UserCancelled);
        }
        let branch = prompt.ask("Branch name", Some(&repo.default_branch))?;

        match self.client.get_content(repo, &path, &branch)? {
            Contents::File(entry) => {
                println!("----- {path} [{branch}] -----");
                println!("{}", entry.decoded_content()?);
                println!("-----");
                Ok(())
            }
            Contents::Directory(_) => Err(HubmanError::GitHub {
                message: format!("{path} is a directory, not a file"),
            }),
        }
    }

    // --- branches --------------------------------------------------------

    /// Returns the (possibly updated) repository: switching the default
    /// branch changes it.
    fn branch_menu(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<Repo> {
        let branches = self.client.list_branches(repo)?;
        let mut table = Table::new(format!("Branches in {}", repo.full_name), &["Branch"]);
        for branch in &branches {
            table.add_row(vec![branch.name.clone()]);
        }
        print!("{}", table.render());

        println!("Options: [1] Create  [2] Delete  [3] Switch default");
        let choice = prompt.ask("Choose", Some("1"))?;
        let Some(action) = BranchAction::parse(&choice) else {
            println!("Invalid option.");
            return Ok(repo.clone());
        };

        match action {
            BranchAction::Create => {
                let name = prompt.ask("New branch name", None)?;
                if name.is_empty() {
                    return Err(HubmanError::UserCancelled);
                }
                self.client.create_branch(repo, &name, &repo.default_branch)?;
                println!("Created branch {name} from {}", repo.default_branch);
                let _ = self.log.record(&format!(
                    "Created branch {name} from {} in {}",
                    repo.default_branch, repo.full_name
                ));
                Ok(repo.clone())
            }
            BranchAction::Delete => {
                let name = prompt.ask("Branch name to delete", None)?;
                if name.is_empty() {
                    return Err(HubmanError::UserCancelled);
                }
                self.client.delete_branch(repo, &name)?;
                println!("Deleted branch {name}");
                let _ = self
                    .log
                    .record(&format!("Deleted branch {name} in {}", repo.full_name));
                Ok(repo.clone())
            }
            BranchAction::SwitchDefault => {
                let name = prompt.ask(
                    &format!("Branch to set as default (current: {})", repo.default_branch),
                    None,
                )?;
                if name.is_empty() {
                    return Err(HubmanError::UserCancelled);
                }
                let updated = self.client.set_default_branch(repo, &name)?;
                println!("Default branch set to {}", updated.default_branch);
                let _ = self.log.record(&format!(
                    "Set default branch to {name} for {}",
                    repo.full_name
                ));
                Ok(updated)
            }
        }
    }

    // --- settings --------------------------------------------------------

    /// Returns `None` when the repository was deleted, otherwise the
    /// (possibly updated) repository.
    fn settings_menu(&self, prompt: &mut dyn Prompter, repo: Repo) -> Result<Option<Repo>> {
        println!("Options: [1] Rename  [2] Visibility  [3] Delete repo  [4] Transfer  [5] Description");
        let choice = prompt.ask("Choose", Some("1"))?;
        let Some(action) = SettingsAction::parse(&choice) else {
            println!("Invalid option.");
            return Ok(Some(repo));
        };

        match action {
            SettingsAction::Rename => self.rename_interactive(prompt, repo).map(Some),
            SettingsAction::Visibility => {
                println!("Current visibility: {}", repo.visibility());
                let private =
                    prompt.confirm("Make repository PRIVATE? (No makes it PUBLIC)", repo.is_private)?;
                let updated = self.client.set_visibility(&repo, private)?;
                println!("Visibility changed to: {}", updated.visibility());
                let _ = self.log.record(&format!(
                    "Changed visibility of {} to {}",
                    updated.full_name,
                    updated.visibility()
                ));
                Ok(Some(updated))
            }
            SettingsAction::Delete => {
                if self.delete_confirm(prompt, &repo)? {
                    Ok(None)
                } else {
                    Ok(Some(repo))
                }
            }
            SettingsAction::Transfer => {
                println!("Repository transfer requires admin rights on the target.");
                let new_owner = prompt.ask("New owner username or organization", None)?;
                if new_owner.is_empty() {
                    return Err(HubmanError::UserCancelled);
                }
                let confirmed = prompt.confirm(
                    &format!("Transfer '{}' to '{new_owner}'?", repo.full_name),
                    false,
                )?;
                if !confirmed {
                    println!("Transfer cancelled.");
                    return Ok(Some(repo));
                }
                self.client.transfer_repo(&repo, &new_owner)?;
                println!("Transfer requested to {new_owner}.");
                let _ = self.log.record(&format!(
                    "Transfer requested for {} to {new_owner}",
                    repo.full_name
                ));
                Ok(Some(repo))
            }
            SettingsAction::Description => {
                let description = prompt.ask(
                    "New description",
                    Some(repo.description.as_deref().unwrap_or("")),
                )?;
                let updated = self.client.update_description(&repo, &description)?;
                println!("Description updated.");
                let _ = self
                    .log
                    .record(&format!("Updated description of {}", updated.full_name));
                Ok(Some(updated))
            }
        }
    }

    // --- uploads and local sync ------------------------------------------

    fn upload_interactive(&self, prompt: &mut dyn Prompter, repo: &Repo) -> Result<()> {
        let branch = prompt.ask("Branch to push to", Some(&repo.default_branch))?;
        let source = prompt.ask("Local path to upload (absolute or relative)", Some("."))?;
        let message = prompt.ask("Commit message", Some(&self.config.commit_message))?;

        let source = expand_tilde(&source);
        match upload_path(self.client, self.git, self.log, repo, &branch, &source, &message)? {
            PushOutcome::Pushed => println!("Successfully pushed to {}:{branch}", repo.name),
            PushOutcome::NothingToCommit => println!("Nothing to upload (tree unchanged)."),
        }
        Ok(())
    }

    fn local_menu(&self, prompt: &mut dyn Prompter) -> Result<()> {
        let default_path = self.config.repo_path.display().to_string();
        let answer = prompt.ask("Local repository path", Some(&default_path))?;
        let path = expand_tilde(&answer);

        let manager = SyncManager::new(self.git, self.log);
        manager.ensure_checkout(prompt, &path, None, Some(self.client.token()))?;

        if manager.configure_identity(&path).is_err() {
            println!("Warning: could not set git identity (non-fatal).");
        }
        let _ = manager.repair_remote(&path, self.client.token());

        loop {
            println!();
            println!("--- Git actions, local repo: {} ---", path.display());
            println!("1) Pull (update from remote)");
            println!("2) Push (upload local changes)");
            println!("3) Sync (pull + push)");
            println!("4) Exit");

            let choice = prompt.ask("Enter your choice", None)?;
            let Some(action) = LocalAction::parse(&choice) else {
                println!("Invalid choice.");
                continue;
            };

            let result = match action {
                LocalAction::Pull => {
                    println!("Pulling latest changes...");
                    manager.pull(&path).map(|()| {
                        println!("Repository updated successfully.");
                    })
                }
                LocalAction::Push => {
                    let message =
                        prompt.ask("Commit message", Some(&self.config.commit_message))?;
                    manager.push(&path, &message).map(|outcome| match outcome {
                        PushOutcome::Pushed => println!("Successfully pushed."),
                        PushOutcome::NothingToCommit => {
                            println!("Nothing to commit (working tree clean).");
                        }
                    })
                }
                LocalAction::Sync => {
                    println!("Syncing repository (pull then push)...");
                    let message = prompt.ask("Commit message", Some("Auto sync via hubman"))?;
                    manager.sync(&path, &message).map(|outcome| match outcome {
                        PushOutcome::Pushed => println!("Repository synced successfully."),
                        PushOutcome::NothingToCommit => {
                            println!("Nothing to sync (working tree clean).");
                        }
                    })
                }
                LocalAction::Exit => {
                    let _ = self
                        .log
                        .record(&format!("Exited local git menu for {}", path.display()));
                    return Ok(());
                }
            };
            if let Err(e) = result {
                self.report(&e);
            }
        }
    }
}
