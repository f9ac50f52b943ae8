//! Wires the stores, gateway and validator together for one process.

use crate::config::ConfigStore;
use crate::credentials::CredentialStore;
use crate::doctor::Doctor;
use crate::error_log::ErrorLog;
use crate::git::Git;
use crate::github::TokenValidator;
use crate::network::NetworkStatus;
use crate::ops::GitOps;
use crate::paths::GeniusPaths;
use crate::prompt::Prompt;
use crate::setup::Setup;
use std::path::{Path, PathBuf};

pub struct App {
    pub paths: GeniusPaths,
    pub store: ConfigStore,
    pub credentials: CredentialStore,
    pub error_log: ErrorLog,
    pub git: Git,
    pub validator: TokenValidator,
    pub network: NetworkStatus,
    cwd: PathBuf,
}

impl App {
    /// Builds the components for metadata anchored at `anchor`.
    pub fn new(anchor: &Path, network: NetworkStatus, api_url: &str) -> Self {
        let paths = GeniusPaths::new(anchor);
        let store = ConfigStore::new(paths.config_file());
        let credentials = CredentialStore::new(paths.token_file());
        let error_log = ErrorLog::new(paths.error_log());
        let git = Git::new(store.clone(), error_log.clone(), anchor.to_path_buf());
        let validator =
            TokenValidator::new(credentials.clone(), network, api_url, error_log.clone());

        Self {
            paths,
            store,
            credentials,
            error_log,
            git,
            validator,
            network,
            cwd: anchor.to_path_buf(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn setup<'a>(&'a self, prompt: &'a dyn Prompt) -> Setup<'a> {
        Setup::new(
            &self.store,
            &self.credentials,
            &self.validator,
            &self.git,
            prompt,
            self.cwd.clone(),
        )
    }

    pub fn doctor(&self) -> Doctor<'_> {
        Doctor::new(
            &self.store,
            &self.credentials,
            &self.validator,
            &self.git,
            &self.error_log,
            self.network,
            self.cwd.clone(),
        )
    }

    pub fn ops<'a>(&'a self, prompt: &'a dyn Prompt) -> GitOps<'a> {
        GitOps::new(&self.git, &self.store, prompt)
    }
}
