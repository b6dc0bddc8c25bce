//! Unified patch text generation over a session.

use crate::error::{Error, Result};
use crate::session::RepositorySession;

/// Produces unified patch text for commits or the working tree.
pub struct DiffGenerator<'a> {
    session: &'a RepositorySession,
}

impl<'a> DiffGenerator<'a> {
    /// Create a generator over an open session.
    #[must_use]
    pub const fn new(session: &'a RepositorySession) -> Self {
        Self { session }
    }

    /// Unified patch text.
    ///
    /// With a revspec, diffs that commit against its first parent, or
    /// against the empty tree for a root commit. Without one, diffs the
    /// working tree and index against HEAD (the empty tree when HEAD is
    /// unborn).
    ///
    /// # Errors
    /// Returns [`Error::ReferenceNotFound`] if the revspec does not
    /// resolve to a commit.
    pub fn diff(&self, commit: Option<&str>) -> Result<String> {
        let repo = self.session.repo()?;

        let diff = match commit {
            Some(spec) => {
                let commit = repo
                    .revparse_single(spec)
                    .and_then(|obj| obj.peel_to_commit())
                    .map_err(|_| Error::ReferenceNotFound(spec.to_string()))?;
                let tree = commit.tree()?;

                let parent_tree = match commit.parent(0) {
                    Ok(parent) => Some(parent.tree()?),
                    Err(_) => None,
                };

                repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?
            }
            None => {
                let head_tree = match self.session.head_oid()? {
                    Some(oid) => Some(repo.find_commit(oid)?.tree()?),
                    None => None,
                };
                repo.diff_tree_to_workdir_with_index(head_tree.as_ref(), None)?
            }
        };

        patch_text(&diff)
    }
}

/// Render a diff in unified patch format, prefixing content lines with
/// their origin marker.
fn patch_text(diff: &git2::Diff<'_>) -> Result<String> {
    let mut text = String::new();
    diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => text.push(line.origin()),
            _ => {}
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}
