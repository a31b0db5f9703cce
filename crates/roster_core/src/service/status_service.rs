//! Status mirroring use-case.

use crate::model::table_status::{MirroredStatus, TableStatus};
use crate::repo::error::RepoResult;
use crate::repo::status_repo::StatusMirrorRepository;

pub struct StatusMirrorService<R: StatusMirrorRepository> {
    repo: R,
}

impl<R: StatusMirrorRepository> StatusMirrorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records `status` in the origin table and copies it to both
    /// downstream tables.
    pub fn mirror_status(&mut self, status: TableStatus) -> RepoResult<MirroredStatus> {
        let origin_id = self.repo.insert_origin(status)?;
        self.repo.mirror(origin_id)
    }

    /// Re-derives the downstream rows of an already stored origin status.
    pub fn remirror(&mut self, origin_id: i64) -> RepoResult<MirroredStatus> {
        self.repo.mirror(origin_id)
    }

    pub fn find_mirrored(&self, origin_id: i64) -> RepoResult<Option<MirroredStatus>> {
        self.repo.find_mirrored(origin_id)
    }
}
