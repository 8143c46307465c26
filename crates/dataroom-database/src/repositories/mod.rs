//! Postgres repository implementations of the store traits.

pub mod dataroom;
pub mod file;
pub mod folder;
pub mod user;

pub use dataroom::DataRoomRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
pub use user::UserRepository;

/// Escape LIKE/ILIKE metacharacters so a user query matches as a
/// literal substring. Postgres' default escape character is `\`.
pub(crate) fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
