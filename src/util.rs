use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), Box<dyn Error>> {
    println!(
        "[handlerkit] util::copy_dir_recursive - src: {}, dest: {}",
        src.display(),
        dest.display()
    );

    std::fs::create_dir_all(dest)?;

    let walk_path = walkdir::WalkDir::new(src).min_depth(1).follow_links(false);

    for entry in walk_path {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(src)?;
        let new_path = dest.join(rel_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&new_path)?;
        } else if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &new_path)?;
        } else {
            if let Some(parent) = new_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            if new_path.exists() {
                std::fs::remove_file(&new_path)?;
            }

            std::fs::copy(entry.path(), new_path)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, dest: &Path) -> Result<(), Box<dyn Error>> {
    let target = std::fs::read_link(link)?;
    std::os::unix::fs::symlink(target, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, dest: &Path) -> Result<(), Box<dyn Error>> {
    // Without portable symlink creation, copy what the link points at
    std::fs::copy(link, dest)?;
    Ok(())
}

/// Move a directory out of the way into `trash_base`, keeping it restorable.
///
/// The directory lands at `<trash_base>/<name>_<unix seconds>`; a numeric
/// suffix is added if that name is taken. Falls back to copy + remove when a
/// plain rename is not possible (e.g. across filesystems).
pub fn move_to_trash(path: &Path, trash_base: &Path) -> Result<PathBuf, Box<dyn Error>> {
    std::fs::create_dir_all(trash_base)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "handler".to_string());

    let mut trashed = trash_base.join(format!("{}_{}", name, timestamp));
    let mut i = 1;
    while trashed.exists() {
        trashed = trash_base.join(format!("{}_{}-{}", name, timestamp, i));
        i += 1;
    }

    println!("[handlerkit] Trashing: {} -> {}", path.display(), trashed.display());

    if std::fs::rename(path, &trashed).is_err() {
        copy_dir_recursive(path, &trashed)?;
        std::fs::remove_dir_all(path)?;
    }

    Ok(trashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_dir_recursive_copies_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("a/b")).unwrap();
        std::fs::write(src.join("top.txt"), "top").unwrap();
        std::fs::write(src.join("a/b/deep.txt"), "deep").unwrap();

        let dest = tmp.path().join("dest");
        copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(std::fs::read_to_string(dest.join("a/b/deep.txt")).unwrap(), "deep");
    }

    #[test]
    fn move_to_trash_keeps_contents_restorable() {
        let tmp = tempfile::tempdir().unwrap();
        let handler = tmp.path().join("handlers/My Game");
        std::fs::create_dir_all(&handler).unwrap();
        std::fs::write(handler.join("My Game.js"), "Game.GUID = \"My Game\";").unwrap();

        let trash = tmp.path().join("trash");
        let trashed = move_to_trash(&handler, &trash).unwrap();

        assert!(!handler.exists());
        assert!(trashed.starts_with(&trash));
        assert!(
            trashed
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("My Game_")
        );
        assert_eq!(
            std::fs::read_to_string(trashed.join("My Game.js")).unwrap(),
            "Game.GUID = \"My Game\";"
        );
    }

    #[test]
    fn move_to_trash_twice_does_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = tmp.path().join("trash");
        let handler = tmp.path().join("Same");

        std::fs::create_dir_all(&handler).unwrap();
        let first = move_to_trash(&handler, &trash).unwrap();
        std::fs::create_dir_all(&handler).unwrap();
        let second = move_to_trash(&handler, &trash).unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }
}
