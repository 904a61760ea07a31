//! SurveyStore の実装
//!
//! - `file`: ファイルに保存する実装（本番用）
//! - `inmemory`: メモリ上に保持する実装（テスト・永続化なしの起動用）

pub mod file;
pub mod inmemory;

pub use file::FileSurveyStore;
pub use inmemory::InMemorySurveyStore;
