//! Class pass-through service.

use crate::live::LiveQuery;
use crate::model::class::{ClassId, ClassRecord, NewClass};
use crate::repo::class_repo::ClassRepository;
use crate::repo::RepoResult;

/// Forwards class operations to a [`ClassRepository`].
pub struct ClassService<R: ClassRepository> {
    repo: R,
}

impl<R: ClassRepository> ClassService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn insert_class(&self, class: &NewClass) -> RepoResult<ClassId> {
        self.repo.insert_class(class)
    }

    pub fn update_class(&self, class: &ClassRecord) -> RepoResult<bool> {
        self.repo.update_class(class)
    }

    /// Deletes the class together with its students and their attendance.
    pub fn delete_class(&self, id: ClassId) -> RepoResult<bool> {
        self.repo.delete_class(id)
    }

    pub fn watch_classes(&self) -> LiveQuery<Vec<ClassRecord>> {
        self.repo.watch_classes()
    }

    pub fn list_classes(&self) -> RepoResult<Vec<ClassRecord>> {
        self.repo.list_classes()
    }

    pub fn get_class(&self, id: ClassId) -> RepoResult<Option<ClassRecord>> {
        self.repo.get_class(id)
    }
}
