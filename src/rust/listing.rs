use std::path::{Component, Path, PathBuf};

use glob::{glob_with, MatchOptions};

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Expands a glob pattern into the list of matching file paths.
///
/// `**` matches any number of directories, so `data/**/*.jpg` walks the whole
/// tree below `data`. A pattern that matches nothing yields an empty list
/// rather than an error. Entries the walk cannot read are logged and skipped.
/// Hidden files and directories (names starting with `.`) are only matched
/// when the pattern names them literally, so `data/**/*.jpg` never picks up
/// `data/.ipynb_checkpoints/1.jpg` or `data/cat/.1.jpg`. Paths come back
/// sorted so that repeated runs see the same order.
///
/// # Example
/// ```no_run
/// use imgsplit::list_images;
///
/// let images = list_images("dataset/**/*.png").unwrap();
/// println!("found {} images", images.len());
/// ```
pub fn list_images(pattern: &str) -> Result<Vec<PathBuf>, ListingError> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let prefix = literal_prefix_len(pattern);
    let names_hidden = Path::new(pattern).components().skip(prefix).any(is_dotted);

    let mut images = Vec::new();
    for entry in glob_with(pattern, options)? {
        match entry {
            Ok(path) => {
                if !path.is_file() {
                    continue;
                }
                if !names_hidden && path.components().skip(prefix).any(is_dotted) {
                    log::debug!("Skipping hidden entry {:?}", path);
                    continue;
                }
                images.push(path);
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry {:?}: {}", e.path(), e.error());
            }
        }
    }
    images.sort();

    log::info!("Found {} images matching '{}'", images.len(), pattern);
    Ok(images)
}

/// Number of leading pattern components without wildcards.
fn literal_prefix_len(pattern: &str) -> usize {
    Path::new(pattern)
        .components()
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(['*', '?', '[']))
        .count()
}

fn is_dotted(component: Component<'_>) -> bool {
    matches!(component, Component::Normal(name) if name.to_string_lossy().starts_with('.'))
}
