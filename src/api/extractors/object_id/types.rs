/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - PostTag のようなタグ型と type PostId = DocumentId<PostTag> の alias
 *
 * 置かないもの
 *  - parse ロジック / extractor 実装
 */
use super::core::DocumentId;

// posts
pub enum PostTag {}
pub type PostId = DocumentId<PostTag>;
