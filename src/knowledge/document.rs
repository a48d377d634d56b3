use crate::log_internal;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Raw source text, alive only until it has been chunked
pub struct Document {
    pub source: PathBuf,
    pub content: String,
}

/// Load the plain-text sources under `path`.
///
/// `path` is normally a folder, in which case every `.txt` file directly
/// inside it is read; it may also name a single file, which is read
/// regardless of extension.  A missing path or an unreadable file is not an
/// error: the bot runs with whatever knowledge it could load, down to none.
pub async fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(_) => {
            log_internal!("Knowledge location `{}` not found", path.to_string_lossy());
            return Ok(Vec::new());
        }
    };

    if metadata.is_file() {
        return match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(vec![Document {
                source: path.to_path_buf(),
                content,
            }]),
            Err(e) => {
                log_internal!(
                    "Skipping unreadable knowledge file `{}`: {}",
                    path.to_string_lossy(),
                    e
                );
                Ok(Vec::new())
            }
        };
    }

    let mut entries = tokio::fs::read_dir(path).await?;
    let mut documents = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();

        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if !is_file || !has_txt_extension(&path) {
            continue;
        }

        // Unreadable or non-UTF-8 files are skipped, not fatal
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => documents.push(Document {
                source: path,
                content,
            }),
            Err(e) => {
                log_internal!(
                    "Skipping unreadable knowledge file `{}`: {}",
                    path.to_string_lossy(),
                    e
                );
            }
        }
    }

    // Directory iteration order is platform-dependent; keep the index build
    // deterministic.
    documents.sort_by(|a, b| a.source.cmp(&b.source));

    Ok(documents)
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}
