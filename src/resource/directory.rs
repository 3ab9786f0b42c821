//! Resource store that discovers language files on disk.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

use super::{
    LanguageResource,
    ResourceStore,
};
use crate::config::{
    MatcherError,
    ResourceMatcher,
    ResourcesConfig,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Resource path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Language files found under a directory, keyed by file stem.
///
/// Resources are sorted by key (then path) so iteration order does not depend
/// on the file system.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    matcher: ResourceMatcher,
    resources: Vec<LanguageResource>,
}

impl DirectoryStore {
    /// Scans `root` for files matching `config` and reads them.
    ///
    /// A missing directory yields an empty store; unreadable files are skipped.
    pub async fn scan(root: PathBuf, config: &ResourcesConfig) -> Result<Self, StoreError> {
        let matcher = ResourceMatcher::new(root, config)?;
        let mut store = Self { matcher, resources: Vec::new() };
        store.rescan().await?;
        Ok(store)
    }

    /// Re-reads the directory, replacing every previously loaded resource.
    pub async fn rescan(&mut self) -> Result<(), StoreError> {
        let root = self.matcher.root();
        tracing::debug!(root = %root.display(), "Scanning language resources");

        if !root.exists() {
            tracing::warn!("Language resource directory not found: {}", root.display());
            self.resources.clear();
            return Ok(());
        }
        if !root.is_dir() {
            return Err(StoreError::NotADirectory(root.to_path_buf()));
        }

        let files = self.find_resource_files();
        let reads = files.iter().map(|path| Self::read_resource(path));
        let mut loaded: Vec<(PathBuf, LanguageResource)> = futures::future::join_all(reads)
            .await
            .into_iter()
            .zip(files.iter())
            .filter_map(|(resource, path)| resource.map(|r| (path.clone(), r)))
            .collect();

        loaded.sort_by(|(a_path, a), (b_path, b)| a.key().cmp(b.key()).then(a_path.cmp(b_path)));
        self.resources = loaded.into_iter().map(|(_, resource)| resource).collect();

        tracing::debug!("Loaded {} language resources", self.resources.len());
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.matcher.root()
    }

    /// Reads one file. Failures are logged and the file is skipped.
    async fn read_resource(path: &Path) -> Option<LanguageResource> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read language file {:?}: {}", path, e);
                return None;
            }
        };

        let resource = LanguageResource::from_path(path, content);
        if resource.is_none() {
            tracing::warn!("Cannot derive a language key from {:?}", path);
        }
        resource
    }

    /// Walks the resource root and collects files accepted by the matcher.
    fn find_resource_files(&self) -> Vec<PathBuf> {
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(self.matcher.root())
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if self.matcher.is_resource_file(entry.path()) {
                found_files.push(entry.path().to_path_buf());
            }
        }

        found_files
    }
}

impl ResourceStore for DirectoryStore {
    fn resources(&self) -> &[LanguageResource] {
        &self.resources
    }
}
