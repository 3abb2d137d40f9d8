//! Student pass-through service.

use crate::live::LiveQuery;
use crate::model::class::ClassId;
use crate::model::student::{NewStudent, StudentId, StudentRecord};
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;

/// Forwards student operations to a [`StudentRepository`].
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn insert_student(&self, student: &NewStudent) -> RepoResult<StudentId> {
        self.repo.insert_student(student)
    }

    pub fn update_student(&self, student: &StudentRecord) -> RepoResult<bool> {
        self.repo.update_student(student)
    }

    /// Deletes the student together with its attendance.
    pub fn delete_student(&self, id: StudentId) -> RepoResult<bool> {
        self.repo.delete_student(id)
    }

    pub fn watch_students_by_class(&self, class_id: ClassId) -> LiveQuery<Vec<StudentRecord>> {
        self.repo.watch_students_by_class(class_id)
    }

    pub fn list_students_by_class(&self, class_id: ClassId) -> RepoResult<Vec<StudentRecord>> {
        self.repo.list_students_by_class(class_id)
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>> {
        self.repo.get_student(id)
    }

    pub fn find_student_by_id_number(
        &self,
        external_id_number: &str,
        class_id: ClassId,
    ) -> RepoResult<Option<StudentRecord>> {
        self.repo
            .find_student_by_id_number(external_id_number, class_id)
    }
}
