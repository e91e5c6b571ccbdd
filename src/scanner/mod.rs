use crate::error::{PlateAiError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "heic", "heif"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn image_file(path: &Path) -> ImageFile {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    ImageFile {
        path: path.to_path_buf(),
        file_name,
    }
}

/// フォルダ直下（recursive なら配下すべて）の画像をファイル名順で列挙
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageFile>> {
    if !folder.is_dir() {
        return Err(PlateAiError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageFile> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| image_file(e.path()))
        .collect();

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 引数のファイル・フォルダを画像ファイルの一覧に展開
///
/// 指定順を保つ。画像拡張子でないファイルは読み飛ばす。
pub fn scan_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path, recursive)?);
        } else if path.is_file() {
            if is_image_path(path) {
                images.push(image_file(path));
            } else {
                tracing::warn!(path = %path.display(), "not an image file, skipped");
            }
        } else {
            return Err(PlateAiError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("webp"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(PlateAiError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.jpg"), b"dummy").unwrap();
        fs::write(dir.path().join("a.PNG"), b"dummy").unwrap();
        fs::write(dir.path().join("b.jpeg"), b"dummy").unwrap();
        fs::write(dir.path().join("readme.txt"), b"text").unwrap();

        let result = scan_folder(dir.path(), false).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.PNG", "b.jpeg", "c.jpg"]);
    }

    #[test]
    fn test_scan_folder_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("top.jpg"), b"dummy").unwrap();
        fs::write(dir.path().join("sub").join("inner.jpg"), b"dummy").unwrap();

        assert_eq!(scan_folder(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_folder(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn test_scan_inputs_mixed() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("plates");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("x.jpg"), b"dummy").unwrap();
        let single = dir.path().join("single.png");
        fs::write(&single, b"dummy").unwrap();
        let note = dir.path().join("note.txt");
        fs::write(&note, b"text").unwrap();

        let result = scan_inputs(&[single.clone(), folder, note], false).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].file_name, "single.png");
        assert_eq!(result[1].file_name, "x.jpg");
    }

    #[test]
    fn test_scan_inputs_missing_path() {
        let result = scan_inputs(&[PathBuf::from("/nonexistent/plate.jpg")], false);
        assert!(matches!(result, Err(PlateAiError::FileNotFound(_))));
    }
}
