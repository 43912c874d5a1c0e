//
//  vsts-client
//  migrate/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TFVC to Git Migration
//!
//! Moves a TFVC folder into a new Git repository of the same project. The
//! history conversion itself is done by an external tool; this module only
//! drives it.
//!
//! The tool is abstracted behind [`SourceControlTool`] so the client never
//! shells out directly. [`GitTfTool`] is the stock implementation:
//!
//! ```text
//! git tf clone {collection_url} {folder} {dest} --deep
//! git remote add origin {remote_url}
//! git push -u origin --all
//! ```

use std::env;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::api::client::VstsClient;
use crate::api::common::{Result, VstsError};
use crate::api::repositories::GitRepository;

/// Extensions tried on Windows when `PATHEXT` is unset.
const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// A tool able to clone a source-controlled folder and push it elsewhere.
#[async_trait]
pub trait SourceControlTool: Send + Sync {
    /// Fails with a precondition error when the tool cannot run here.
    fn ensure_available(&self) -> Result<()>;

    /// Clones `folder` of the collection at `source` into `dest`.
    async fn clone_folder(&self, source: &str, folder: &str, dest: &Path) -> Result<()>;

    /// Pushes every branch of the clone at `dest` to `remote_url`.
    async fn push_all(&self, dest: &Path, remote_url: &str) -> Result<()>;
}

/// [`SourceControlTool`] backed by `git` and the `git-tf` bridge.
#[derive(Debug, Clone)]
pub struct GitTfTool {
    git: PathBuf,
}

impl GitTfTool {
    pub fn new() -> Self {
        Self {
            git: PathBuf::from("git"),
        }
    }

    /// Uses a specific `git` executable instead of the one on `PATH`.
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    async fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        debug!(?args, "running git");
        let mut command = Command::new(&self.git);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let status = command.status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(VstsError::ToolFailed {
                tool: format!("git {}", args.first().copied().unwrap_or_default()),
                status: status.to_string(),
            })
        }
    }
}

impl Default for GitTfTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceControlTool for GitTfTool {
    fn ensure_available(&self) -> Result<()> {
        let git = self.git.to_string_lossy();
        if self.git.components().count() > 1 {
            if !self.git.is_file() {
                return Err(VstsError::ToolMissing(git.into_owned()));
            }
        } else if find_on_path(&git).is_none() {
            return Err(VstsError::ToolMissing(git.into_owned()));
        }

        if find_on_path("git-tf").is_none() {
            return Err(VstsError::ToolMissing("git-tf".to_string()));
        }
        Ok(())
    }

    async fn clone_folder(&self, source: &str, folder: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.run(&["tf", "clone", source, folder, &dest, "--deep"], None).await
    }

    async fn push_all(&self, dest: &Path, remote_url: &str) -> Result<()> {
        self.run(&["remote", "add", "origin", remote_url], Some(dest)).await?;
        self.run(&["push", "-u", "origin", "--all"], Some(dest)).await
    }
}

/// Searches `PATH` for an executable called `name`.
///
/// On Windows every `PATHEXT` extension is tried too, so `git-tf` finds
/// `git-tf.cmd`.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    let pathext = if cfg!(windows) {
        Some(env::var("PATHEXT").unwrap_or_else(|_| DEFAULT_PATHEXT.to_string()))
    } else {
        None
    };
    find_in(name, env::split_paths(&path_var), pathext.as_deref())
}

fn find_in(
    name: &str,
    dirs: impl IntoIterator<Item = PathBuf>,
    pathext: Option<&str>,
) -> Option<PathBuf> {
    let names = candidate_names(name, pathext);
    dirs.into_iter()
        .flat_map(|dir| names.iter().map(move |n| dir.join(n)))
        .find(|candidate| candidate.is_file())
}

/// `name` itself, then `name` with each executable extension.
fn candidate_names(name: &str, pathext: Option<&str>) -> Vec<String> {
    let mut names = vec![name.to_string()];
    match pathext {
        Some(exts) => names.extend(
            exts.split(';')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(|ext| format!("{}{}", name, ext.to_ascii_lowercase())),
        ),
        None if !env::consts::EXE_SUFFIX.is_empty() => {
            names.push(format!("{}{}", name, env::consts::EXE_SUFFIX));
        }
        None => {}
    }
    names
}

impl VstsClient {
    /// Migrates `tfvc_folder` (e.g. `$/Fabrikam/Main`) into a new Git
    /// repository named `repository` in `project`.
    ///
    /// The working clone is created at `workdir/{repository}`. Nothing is
    /// sent to the server when the tool is unavailable.
    pub async fn migrate_tfvc_folder(
        &self,
        tool: &dyn SourceControlTool,
        project: &str,
        tfvc_folder: &str,
        repository: &str,
        workdir: &Path,
    ) -> Result<GitRepository> {
        tool.ensure_available()?;

        let repo = self.create_repository(project, repository).await?;
        let remote_url = repo.remote_url.clone().ok_or_else(|| {
            VstsError::InvalidRequest(format!("repository '{}' has no remote URL", repo.name))
        })?;

        let dest = workdir.join(repository);
        info!(folder = tfvc_folder, dest = %dest.display(), "cloning TFVC folder");
        tool.clone_folder(&self.session().collection_url(), tfvc_folder, &dest).await?;

        info!(remote = %remote_url, "pushing to new repository");
        tool.push_all(&dest, &remote_url).await?;

        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::session::{Scheme, Session, SessionTarget};
    use mockito::{Matcher, Server, ServerGuard};
    use std::sync::Mutex;

    fn client_for(server: &ServerGuard) -> VstsClient {
        let session = Session::new(SessionTarget::server(server.host_with_port()), "bob", "tok123")
            .unwrap()
            .with_scheme(Scheme::Http);
        VstsClient::new(session).unwrap()
    }

    #[derive(Default)]
    struct RecordingTool {
        missing: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SourceControlTool for RecordingTool {
        fn ensure_available(&self) -> Result<()> {
            if self.missing {
                Err(VstsError::ToolMissing("git-tf".to_string()))
            } else {
                Ok(())
            }
        }

        async fn clone_folder(&self, source: &str, folder: &str, dest: &Path) -> Result<()> {
            self.calls.lock().unwrap().push(format!(
                "clone {} {} {}",
                source,
                folder,
                dest.file_name().unwrap().to_string_lossy()
            ));
            Ok(())
        }

        async fn push_all(&self, _dest: &Path, remote_url: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("push {}", remote_url));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_tool_makes_no_request() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let tool = RecordingTool {
            missing: true,
            ..Default::default()
        };
        let client = client_for(&server);
        let err = client
            .migrate_tfvc_folder(&tool, "Fabrikam", "$/Fabrikam/Main", "main", Path::new("/tmp"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        any.assert_async().await;
        assert!(tool.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_creates_clones_and_pushes() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"count": 1, "value": [{"id": "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1", "name": "Fabrikam"}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("POST", "/DefaultCollection/_apis/git/repositories")
            .match_query(Matcher::Any)
            .with_status(201)
            .with_body(
                r#"{"id": "5febef5a-833d-4e14-b9c0-14cb638f91e6", "name": "main",
                    "remoteUrl": "https://fabrikam.visualstudio.com/DefaultCollection/_git/main"}"#,
            )
            .create_async()
            .await;

        let tool = RecordingTool::default();
        let client = client_for(&server);
        let workdir = tempfile::tempdir().unwrap();
        let repo = client
            .migrate_tfvc_folder(&tool, "Fabrikam", "$/Fabrikam/Main", "main", workdir.path())
            .await
            .unwrap();

        assert_eq!(repo.name, "main");
        let calls = tool.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                format!(
                    "clone {} $/Fabrikam/Main main",
                    client.session().collection_url()
                ),
                "push https://fabrikam.visualstudio.com/DefaultCollection/_git/main".to_string(),
            ]
        );
    }

    #[test]
    fn test_explicit_missing_git_is_reported() {
        let tool = GitTfTool::new().with_git("/nonexistent/bin/git");
        let err = tool.ensure_available().unwrap_err();
        assert!(matches!(err, VstsError::ToolMissing(ref t) if t == "/nonexistent/bin/git"));
    }

    #[test]
    fn test_find_on_path_misses_unknown_tool() {
        assert!(find_on_path("vsts-definitely-not-a-real-tool").is_none());
    }

    #[test]
    fn test_candidate_names_use_pathext() {
        let names = candidate_names("git-tf", Some(".COM;.EXE;.BAT;.CMD"));
        assert_eq!(
            names,
            vec!["git-tf", "git-tf.com", "git-tf.exe", "git-tf.bat", "git-tf.cmd"]
        );
    }

    #[test]
    fn test_find_in_matches_cmd_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("git-tf.cmd");
        std::fs::write(&script, "@echo off\r\n").unwrap();

        let found = find_in("git-tf", vec![dir.path().to_path_buf()], Some(".EXE;.CMD"));
        assert_eq!(found, Some(script));
        assert_eq!(find_in("git-tf", vec![dir.path().to_path_buf()], None), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_git_runs_without_blocking_and_reports_failure() {
        let dir = tempfile::tempdir().unwrap();

        GitTfTool::new()
            .with_git("true")
            .push_all(dir.path(), "https://example.com/_git/main")
            .await
            .unwrap();

        let err = GitTfTool::new()
            .with_git("false")
            .push_all(dir.path(), "https://example.com/_git/main")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(matches!(err, VstsError::ToolFailed { ref tool, .. } if tool == "git remote"));
    }
}
