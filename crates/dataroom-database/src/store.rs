//! Entity store traits consumed by the service layer.
//!
//! Services hold `Arc<dyn ...Store>` handles rather than concrete pool
//! types, so the same business logic runs against the Postgres
//! repositories in production and [`crate::memory::MemoryStore`] in
//! tests.

use async_trait::async_trait;
use uuid::Uuid;

use dataroom_core::result::AppResult;
use dataroom_entity::dataroom::{CreateDataRoom, DataRoom, DataRoomStats};
use dataroom_entity::file::{CreateFile, File};
use dataroom_entity::folder::{CreateFolder, Folder};
use dataroom_entity::user::{UpsertUser, User};

/// Store for user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by OAuth provider and provider-assigned ID.
    async fn find_by_oauth(&self, provider: &str, oauth_id: &str) -> AppResult<Option<User>>;

    /// Create or refresh a user from an identity-provider profile.
    async fn upsert_oauth(&self, profile: &UpsertUser) -> AppResult<User>;
}

/// Store for dataroom records.
#[async_trait]
pub trait DataRoomStore: Send + Sync + 'static {
    /// Find a dataroom by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DataRoom>>;

    /// List a user's datarooms, most recently created first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<DataRoom>>;

    /// Create a new dataroom.
    async fn create(&self, data: &CreateDataRoom) -> AppResult<DataRoom>;

    /// Update a dataroom's name and description.
    async fn update(&self, room: &DataRoom) -> AppResult<DataRoom>;

    /// Delete a dataroom (cascades to folders and files). Returns `true`
    /// if a record was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Folder and file counts for a dataroom.
    async fn stats(&self, id: Uuid) -> AppResult<DataRoomStats>;
}

/// Store for folder records.
#[async_trait]
pub trait FolderStore: Send + Sync + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// List root-level folders of a dataroom, name-ordered.
    async fn find_roots(&self, dataroom_id: Uuid) -> AppResult<Vec<Folder>>;

    /// List direct children of a folder, name-ordered.
    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Find the sibling folder with the given name, if any.
    ///
    /// `parent_id == None` means the dataroom root; the comparison treats
    /// root as a single matching value (null equals null).
    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>>;

    /// Create a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Update a folder's name, parent, and path.
    async fn update(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a folder record (cascades to descendant folders and files).
    /// Returns `true` if a record was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Folders owned by `owner_id` whose name contains `query` as a
    /// substring, optionally scoped to one dataroom, name-ordered,
    /// capped at `limit`.
    async fn search_by_name(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<Folder>>;
}

/// Store for file records.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// List files in a folder (or at the dataroom root), name-ordered.
    async fn find_by_folder(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>>;

    /// Find the sibling file with the given display name, if any.
    /// Root-level files (`folder_id == None`) compare null-equals-null.
    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>>;

    /// Create a new file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Update a file's name and folder.
    async fn update(&self, file: &File) -> AppResult<File>;

    /// Delete a file record. Returns `true` if a record was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Files owned by `owner_id` matching `query` as a substring of the
    /// display name (if `search_names`) or the extracted content text
    /// (if `search_content`), optionally scoped to one dataroom,
    /// name-ordered, capped at `limit`.
    async fn search(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        search_names: bool,
        search_content: bool,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<File>>;

    /// Files owned by `owner_id` whose name contains `query`
    /// (case-insensitive), for autocomplete. Capped at `limit`.
    async fn suggest(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<File>>;
}
