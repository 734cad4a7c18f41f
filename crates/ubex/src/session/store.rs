use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{Student, StudentPatch};

/// Holder of the session's student record.
///
/// Readers get an immutable `Arc<Student>` snapshot. Every write goes through
/// [`StudentStore::update`], which merges a patch into a fresh record and swaps
/// it in under the write lock, so concurrent writers never observe or mutate a
/// shared collection.
#[derive(Debug)]
pub struct StudentStore {
    current: RwLock<Arc<Student>>,
}

impl StudentStore {
    pub fn new(student: Student) -> Self {
        Self {
            current: RwLock::new(Arc::new(student)),
        }
    }

    pub fn snapshot(&self) -> Arc<Student> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Compute a patch from the current record and commit it atomically.
    ///
    /// An empty patch leaves the stored snapshot untouched.
    pub fn update<T, F>(&self, compute: F) -> T
    where
        F: FnOnce(&Student) -> (StudentPatch, T),
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let (patch, output) = compute(&current);
        if !patch.is_empty() {
            *current = Arc::new(current.merged(patch));
        }
        output
    }

    pub fn apply(&self, patch: StudentPatch) -> Arc<Student> {
        self.update(|_| (patch, ()));
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn empty_patch_keeps_snapshot_identity() {
        let store = StudentStore::new(seed::student());
        let before = store.snapshot();
        store.update(|_| (StudentPatch::default(), ()));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn update_swaps_in_new_record() {
        let store = StudentStore::new(seed::student());
        let before = store.snapshot();

        let count = store.update(|student| {
            let mut skills = student.skills.clone();
            skills.truncate(1);
            let count = skills.len();
            (
                StudentPatch {
                    skills: Some(skills),
                    ..StudentPatch::default()
                },
                count,
            )
        });

        assert_eq!(count, 1);
        assert_eq!(store.snapshot().skills.len(), 1);
        assert_eq!(before.skills.len(), seed::student().skills.len());
    }
}
