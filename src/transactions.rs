use crate::errors::{FileOperation, IoError};
use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

/// Active Transaction
pub struct Active;
/// Committed Transaction
pub struct Committed;
/// A trait that tells us if rollback should occur when dropped.
pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}
/// Outcome of undoing the directories recorded by a [`Transaction`].
///
/// Rollback never stops at the first failure: every recorded directory is
/// attempted, and the ones that could not be removed end up in `failures`.
#[derive(Debug, Default)]
pub struct RollbackReport {
    /// Directories that existed and were removed.
    pub removed: Vec<PathBuf>,
    /// Directories that existed but could not be removed.
    pub failures: Vec<IoError>,
}
impl RollbackReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
/// Tracks the directories created during one generation batch.
///
/// The transaction starts out [`Active`]. Every directory created through
/// [`Transaction::create_dir`] is recorded, and the batch ends in one of two ways:
///
/// - [`Transaction::commit`] forgets the recorded directories and returns a
///   [`Transaction<Committed>`] which does nothing on drop.
/// - [`Transaction::rollback`] removes every recorded directory (recursively)
///   and returns a [`RollbackReport`].
///
/// An active transaction that is dropped while it still holds directories
/// rolls them back on a best-effort basis.
///
/// # Example
///
/// ```rust,no_run
/// use scaffed::transactions::{Active, Transaction};
/// use std::path::Path;
///
/// let mut trx = Transaction::<Active>::new();
/// trx.create_dir(Path::new("components/Button")).unwrap();
/// let report = trx.rollback();
/// assert!(report.is_clean());
/// ```
pub struct Transaction<State: TransactionState> {
    dirs_added: Vec<PathBuf>,
    state: PhantomData<State>,
}
impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            dirs_added: vec![],
            state: PhantomData,
        }
    }
    /// Creates a single directory and records it for rollback.
    ///
    /// The parent must already exist. Nothing is recorded when creation fails.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if the directory cannot be created, including when
    /// it already exists.
    pub fn create_dir(&mut self, path: &Path) -> Result<(), IoError> {
        fs::create_dir(path)
            .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

        log::debug!("recorded directory for rollback: {}", path.display());
        self.dirs_added.push(path.to_path_buf());

        Ok(())
    }
    /// Directories recorded so far, in creation order.
    pub fn dirs_added(&self) -> &[PathBuf] {
        &self.dirs_added
    }
    /// Finalizes the transaction, preventing any rollback from occurring.
    pub fn commit(mut self) -> Transaction<Committed> {
        self.dirs_added.clear();

        Transaction {
            dirs_added: vec![],
            state: PhantomData,
        }
    }
    /// Removes every recorded directory and reports what happened.
    pub fn rollback(mut self) -> RollbackReport {
        let dirs_added = std::mem::take(&mut self.dirs_added);

        rollback_dirs(&dirs_added)
    }
}
/// Recursively removes each directory in `dirs` that still exists.
///
/// Safe to call repeatedly or with paths that are already gone. A failure to
/// remove one directory does not prevent the rest from being processed.
pub fn rollback_dirs(dirs: &[PathBuf]) -> RollbackReport {
    let mut report = RollbackReport::default();

    for dir in dirs {
        if !dir.exists() {
            log::debug!("already gone: {}", dir.display());
            continue;
        }

        log::debug!("removing dir: {}", dir.display());
        match fs::remove_dir_all(dir) {
            Ok(()) => report.removed.push(dir.clone()),
            Err(error) => {
                log::warn!("unable to remove {}: {}", dir.display(), error);
                report
                    .failures
                    .push(IoError::new(FileOperation::Rmdir, dir.clone(), error));
            }
        }
    }

    report
}
impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.dirs_added.is_empty() {
            log::debug!("rolling back uncommitted transaction");
            let report = rollback_dirs(&self.dirs_added);
            self.dirs_added.clear();
            if !report.is_clean() {
                log::warn!(
                    "{} directories could not be rolled back",
                    report.failures.len()
                );
            }
        } else if !S::SHOULD_ROLLBACK {
            log::debug!("committing transaction");
        }
    }
}
