//! Substring search over files and folders, and filename autocomplete.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::folder::Folder;
use dataroom_entity::search::{
    DataRoomContext, FolderContext, MatchReason, ResultKind, SearchResponse, SearchResult,
    Suggestion,
};

use crate::access::require_owned_room;
use crate::context::RequestContext;

/// Maximum results per type (files, folders).
const RESULT_CAP: i64 = 50;
/// Maximum autocomplete suggestions.
const SUGGESTION_CAP: i64 = 10;
/// Minimum query length for autocomplete.
const SUGGESTION_MIN_CHARS: usize = 2;

/// Searches files and folders across a user's datarooms.
#[derive(Clone)]
pub struct SearchService {
    /// Dataroom store.
    rooms: Arc<dyn DataRoomStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService").finish()
    }
}

/// Search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Substring to search for.
    pub query: String,
    /// Restrict to one dataroom (None searches all owned rooms).
    pub dataroom_id: Option<Uuid>,
    /// Match against display names.
    pub search_names: bool,
    /// Match against extracted file content.
    pub search_content: bool,
    /// Case-insensitive matching (the default).
    pub case_insensitive: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            dataroom_id: None,
            search_names: true,
            search_content: true,
            case_insensitive: true,
        }
    }
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        rooms: Arc<dyn DataRoomStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            rooms,
            folders,
            files,
        }
    }

    /// Runs a search over the caller's files and folders.
    ///
    /// Files match on name and/or content according to the flags; folders
    /// match on name only and are produced only when name search is
    /// enabled. Results carry their dataroom and folder context, are
    /// tagged with the matching criteria, capped at 50 per type, and
    /// merged sorted case-insensitively by name.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        params: SearchParams,
    ) -> AppResult<SearchResponse> {
        let query = params.query.trim().to_string();
        if query.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }
        if !params.search_names && !params.search_content {
            return Err(AppError::validation(
                "At least one of name or content search must be enabled",
            ));
        }
        if let Some(dataroom_id) = params.dataroom_id {
            require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;
        }

        let files = self
            .files
            .search(
                ctx.user_id,
                &query,
                params.dataroom_id,
                params.search_names,
                params.search_content,
                params.case_insensitive,
                RESULT_CAP,
            )
            .await?;

        let folders = if params.search_names {
            self.folders
                .search_by_name(
                    ctx.user_id,
                    &query,
                    params.dataroom_id,
                    params.case_insensitive,
                    RESULT_CAP,
                )
                .await?
        } else {
            Vec::new()
        };

        let mut room_names: HashMap<Uuid, String> = HashMap::new();
        let mut folder_cache: HashMap<Uuid, Folder> = HashMap::new();
        let mut results = Vec::with_capacity(files.len() + folders.len());
        let files_count = files.len();
        let folders_count = folders.len();

        for file in files {
            let dataroom = self.room_context(&mut room_names, file.dataroom_id).await?;
            let folder = match file.folder_id {
                Some(id) => self.folder_context(&mut folder_cache, id).await?,
                None => None,
            };
            let match_type = file_match_reasons(&params, &query, &file.name, file.content_text.as_deref());
            results.push(SearchResult {
                kind: ResultKind::File,
                id: file.id,
                name: file.name,
                match_type,
                dataroom,
                folder,
                parent_folder: None,
                path: None,
                size_bytes: Some(file.size_bytes),
                mime_type: Some(file.mime_type),
                created_at: file.created_at,
                updated_at: file.updated_at,
            });
        }

        for folder in folders {
            let dataroom = self
                .room_context(&mut room_names, folder.dataroom_id)
                .await?;
            let parent_folder = match folder.parent_id {
                Some(id) => self.folder_context(&mut folder_cache, id).await?,
                None => None,
            };
            results.push(SearchResult {
                kind: ResultKind::Folder,
                id: folder.id,
                name: folder.name,
                match_type: vec![MatchReason::Name],
                dataroom,
                folder: None,
                parent_folder,
                path: Some(folder.path),
                size_bytes: None,
                mime_type: None,
                created_at: folder.created_at,
                updated_at: folder.updated_at,
            });
        }

        results.sort_by_key(|r| r.name.to_lowercase());

        Ok(SearchResponse {
            query,
            count: results.len(),
            files_count,
            folders_count,
            results,
        })
    }

    /// Filename autocomplete: queries shorter than two characters yield
    /// nothing; otherwise up to ten `{id, name}` suggestions.
    pub async fn autocomplete(
        &self,
        ctx: &RequestContext,
        query: &str,
        dataroom_id: Option<Uuid>,
    ) -> AppResult<Vec<Suggestion>> {
        let query = query.trim();
        if query.chars().count() < SUGGESTION_MIN_CHARS {
            return Ok(Vec::new());
        }
        if let Some(dataroom_id) = dataroom_id {
            require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;
        }

        let files = self
            .files
            .suggest(ctx.user_id, query, dataroom_id, SUGGESTION_CAP)
            .await?;

        Ok(files
            .into_iter()
            .map(|f| Suggestion {
                id: f.id,
                name: f.name,
            })
            .collect())
    }

    async fn room_context(
        &self,
        cache: &mut HashMap<Uuid, String>,
        dataroom_id: Uuid,
    ) -> AppResult<DataRoomContext> {
        if let Some(name) = cache.get(&dataroom_id) {
            return Ok(DataRoomContext {
                id: dataroom_id,
                name: name.clone(),
            });
        }
        let room = self
            .rooms
            .find_by_id(dataroom_id)
            .await?
            .ok_or_else(|| AppError::not_found("DataRoom not found"))?;
        cache.insert(dataroom_id, room.name.clone());
        Ok(DataRoomContext {
            id: dataroom_id,
            name: room.name,
        })
    }

    async fn folder_context(
        &self,
        cache: &mut HashMap<Uuid, Folder>,
        folder_id: Uuid,
    ) -> AppResult<Option<FolderContext>> {
        if !cache.contains_key(&folder_id) {
            match self.folders.find_by_id(folder_id).await? {
                Some(folder) => {
                    cache.insert(folder_id, folder);
                }
                None => return Ok(None),
            }
        }
        Ok(cache.get(&folder_id).map(|f| FolderContext {
            id: f.id,
            name: f.name.clone(),
            path: f.path.clone(),
        }))
    }
}

/// Which criteria a file actually matched, given the active flags.
fn file_match_reasons(
    params: &SearchParams,
    query: &str,
    name: &str,
    content: Option<&str>,
) -> Vec<MatchReason> {
    let contains = |haystack: &str| {
        if params.case_insensitive {
            haystack.to_lowercase().contains(&query.to_lowercase())
        } else {
            haystack.contains(query)
        }
    };

    let mut reasons = Vec::new();
    if params.search_names && contains(name) {
        reasons.push(MatchReason::Name);
    }
    if params.search_content && content.is_some_and(contains) {
        reasons.push(MatchReason::Content);
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_core::error::ErrorKind;
    use dataroom_database::MemoryStore;
    use dataroom_entity::dataroom::CreateDataRoom;
    use dataroom_entity::file::CreateFile;
    use dataroom_entity::folder::CreateFolder;

    struct Fixture {
        svc: SearchService,
        store: Arc<MemoryStore>,
        ctx: RequestContext,
        room_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let ctx = RequestContext::new(Uuid::new_v4(), "ana@example.com".into());
        let room = DataRoomStore::create(
            store.as_ref(),
            &CreateDataRoom {
                name: "Deal Room".into(),
                description: None,
                owner_id: ctx.user_id,
            },
        )
        .await
        .unwrap();
        let svc = SearchService::new(store.clone(), store.clone(), store.clone());
        Fixture {
            svc,
            store,
            ctx,
            room_id: room.id,
        }
    }

    impl Fixture {
        async fn add_file(&self, name: &str, content: Option<&str>) {
            FileStore::create(
                self.store.as_ref(),
                &CreateFile {
                    name: name.into(),
                    original_name: name.into(),
                    folder_id: None,
                    dataroom_id: self.room_id,
                    storage_path: format!("{}/{name}", self.room_id),
                    size_bytes: 4,
                    mime_type: "application/pdf".into(),
                    content_text: content.map(Into::into),
                },
            )
            .await
            .unwrap();
        }

        async fn add_folder(&self, name: &str) {
            FolderStore::create(
                self.store.as_ref(),
                &CreateFolder {
                    name: name.into(),
                    parent_id: None,
                    dataroom_id: self.room_id,
                    path: format!("/{name}"),
                },
            )
            .await
            .unwrap();
        }

        fn params(&self, query: &str) -> SearchParams {
            SearchParams {
                query: query.into(),
                ..SearchParams::default()
            }
        }
    }

    #[tokio::test]
    async fn test_name_flag_only_ignores_content_matches() {
        let fx = fixture().await;
        fx.add_file("Invoice Q1.pdf", Some("nothing relevant")).await;
        fx.add_file("Report.pdf", Some("see invoice attached")).await;

        let response = fx
            .svc
            .search(
                &fx.ctx,
                SearchParams {
                    search_content: false,
                    ..fx.params("invoice")
                },
            )
            .await
            .unwrap();

        assert_eq!(response.files_count, 1);
        assert_eq!(response.results[0].name, "Invoice Q1.pdf");
        assert_eq!(response.results[0].match_type, vec![MatchReason::Name]);
    }

    #[tokio::test]
    async fn test_case_insensitive_by_default() {
        let fx = fixture().await;
        fx.add_file("invoice.pdf", None).await;

        let response = fx.svc.search(&fx.ctx, fx.params("INVOICE")).await.unwrap();
        assert_eq!(response.files_count, 1);
    }

    #[tokio::test]
    async fn test_case_sensitive_when_disabled() {
        let fx = fixture().await;
        fx.add_file("invoice.pdf", None).await;

        let response = fx
            .svc
            .search(
                &fx.ctx,
                SearchParams {
                    case_insensitive: false,
                    ..fx.params("INVOICE")
                },
            )
            .await
            .unwrap();
        assert_eq!(response.count, 0);
    }

    #[tokio::test]
    async fn test_both_reasons_tagged_and_merged_sorted() {
        let fx = fixture().await;
        fx.add_file("invoice.pdf", Some("invoice total due")).await;
        fx.add_folder("Invoices").await;

        let response = fx.svc.search(&fx.ctx, fx.params("invoice")).await.unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.files_count, 1);
        assert_eq!(response.folders_count, 1);

        // Case-insensitive name ordering: "invoice.pdf" < "invoices".
        assert_eq!(response.results[0].name, "invoice.pdf");
        assert_eq!(
            response.results[0].match_type,
            vec![MatchReason::Name, MatchReason::Content]
        );
        assert_eq!(response.results[1].name, "Invoices");
        assert_eq!(response.results[1].kind, ResultKind::Folder);
        assert_eq!(response.results[1].path.as_deref(), Some("/Invoices"));
    }

    #[tokio::test]
    async fn test_folders_omitted_without_name_flag() {
        let fx = fixture().await;
        fx.add_folder("Invoices").await;
        fx.add_file("report.pdf", Some("invoice attached")).await;

        let response = fx
            .svc
            .search(
                &fx.ctx,
                SearchParams {
                    search_names: false,
                    ..fx.params("invoice")
                },
            )
            .await
            .unwrap();
        assert_eq!(response.folders_count, 0);
        assert_eq!(response.files_count, 1);
        assert_eq!(response.results[0].match_type, vec![MatchReason::Content]);
    }

    #[tokio::test]
    async fn test_empty_query_and_no_flags_rejected() {
        let fx = fixture().await;

        let err = fx.svc.search(&fx.ctx, fx.params("  ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .svc
            .search(
                &fx.ctx,
                SearchParams {
                    search_names: false,
                    search_content: false,
                    ..fx.params("invoice")
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_autocomplete_length_threshold_and_cap() {
        let fx = fixture().await;
        for i in 0..15 {
            fx.add_file(&format!("invoice-{i:02}.pdf"), None).await;
        }

        let none = fx.svc.autocomplete(&fx.ctx, "i", None).await.unwrap();
        assert!(none.is_empty());

        let some = fx.svc.autocomplete(&fx.ctx, "invoice", None).await.unwrap();
        assert_eq!(some.len(), 10);
    }

    #[tokio::test]
    async fn test_scoped_to_other_users_room_is_denied() {
        let fx = fixture().await;
        let stranger = RequestContext::new(Uuid::new_v4(), "bob@example.com".into());

        let err = fx
            .svc
            .search(
                &stranger,
                SearchParams {
                    dataroom_id: Some(fx.room_id),
                    ..fx.params("invoice")
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
