pub mod exif;

use crate::error::{PhotoGuideError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

impl ImageInfo {
    fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }
}

/// 拡張子（小文字）を取得
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    extension_of(path)
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// ファイルまたはフォルダから解析対象の画像を列挙
///
/// ファイルを直接指定した場合は拡張子が許可されていなければエラー。
/// フォルダの場合は許可された拡張子のファイルだけを拾い、パス順に並べる。
pub fn scan_path(path: &Path, recursive: bool, allowed: &[String]) -> Result<Vec<ImageInfo>> {
    if path.is_file() {
        if !has_allowed_extension(path, allowed) {
            return Err(PhotoGuideError::UnsupportedFormat(
                path.display().to_string(),
                allowed.join(", "),
            ));
        }
        return Ok(vec![ImageInfo::from_path(path)]);
    }

    scan_folder(path, recursive, allowed)
}

pub fn scan_folder(folder: &Path, recursive: bool, allowed: &[String]) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(PhotoGuideError::FolderNotFound(folder.display().to_string()));
    }

    let mut walker = WalkDir::new(folder);
    if !recursive {
        walker = walker.max_depth(1); // 直下のみ
    }

    let mut images = Vec::new();

    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() || !has_allowed_extension(path, allowed) {
            continue;
        }

        images.push(ImageInfo::from_path(path));
    }

    // パスでソート（サブフォルダ内も安定した順序にする）
    images.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!(folder = %folder.display(), count = images.len(), "folder scanned");

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn allowed() -> Vec<String> {
        ["jpg", "jpeg", "png", "webp"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extension_of_lowercases() {
        assert_eq!(extension_of(Path::new("a/B.JPG")), Some("jpg".to_string()));
        assert_eq!(extension_of(Path::new("noext")), None);
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false, &allowed());
        assert!(matches!(result, Err(PhotoGuideError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.png"), b"dummy").unwrap();
        fs::write(dir.path().join("a.JPG"), b"dummy").unwrap();
        fs::write(dir.path().join("b.webp"), b"dummy").unwrap();
        fs::write(dir.path().join("readme.txt"), b"text").unwrap();
        fs::write(dir.path().join("anim.gif"), b"gif").unwrap();

        let result = scan_folder(dir.path(), false, &allowed()).unwrap();
        let names: Vec<&str> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.webp", "c.png"]);
    }

    #[test]
    fn test_recursive_scan() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(dir.path().join("top.jpg"), b"x").unwrap();
        fs::write(sub.join("nested.jpg"), b"x").unwrap();

        assert_eq!(scan_folder(dir.path(), false, &allowed()).unwrap().len(), 1);
        assert_eq!(scan_folder(dir.path(), true, &allowed()).unwrap().len(), 2);
    }

    #[test]
    fn test_scan_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("photo.jpeg");
        fs::write(&file, b"data").unwrap();

        let result = scan_path(&file, false, &allowed()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name, "photo.jpeg");
    }

    #[test]
    fn test_scan_single_file_unsupported() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"data").unwrap();

        let result = scan_path(&file, false, &allowed());
        assert!(matches!(result, Err(PhotoGuideError::UnsupportedFormat(_, _))));
    }
}
