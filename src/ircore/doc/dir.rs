use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use super::Document;
use super::cfg::RankConfig;
use super::text::TextFileLoader;

/// Breadth-first walk over a corpus directory yielding one document per
/// accepted file.
pub struct DirIter<'a> {
    root: PathBuf,
    path_queue: VecDeque<PathBuf>,
    cfg: &'a RankConfig,
}

impl<'a> DirIter<'a> {
    pub fn new(path: &Path, cfg: &'a RankConfig) -> Self {
        DirIter {
            root: path.to_path_buf(),
            path_queue: VecDeque::from(vec![path.to_path_buf()]),
            cfg,
        }
    }

    fn ignore(path: &Path) -> bool {
        if let Some(filename) = path.file_name() {
            //by default, ignore hidden files on unix like platforms
            if filename.to_string_lossy().starts_with(".") {
                return true;
            }
        }
        false
    }

    fn accepted(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.cfg.accepts_extension(ext))
    }

    // path relative to the corpus root, `/` separated
    fn doc_id(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl<'a> Iterator for DirIter<'a> {
    type Item = Document;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.path_queue.pop_front() {
            if path != self.root && Self::ignore(&path) {
                log::debug!("ignore {}", path.display());
            } else if path.is_file() {
                if !self.accepted(&path) {
                    continue;
                }
                let id = self.doc_id(&path);
                match Document::parse_file(&id, &path) {
                    Ok(doc) => return Some(doc),
                    Err(e) => log::warn!("{}: {}", path.display(), e),
                }
            } else if path.is_dir() {
                log::debug!("{}...", path.display());
                match path.read_dir() {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            self.path_queue.push_back(entry.path());
                        }
                    },
                    Err(e) => log::warn!("read dir {} failed: {}", path.display(), e),
                }
            }
        }
        None
    }
}

/// Loads every accepted file under `path`, ordered by document id.
pub fn load_corpus(path: &Path, cfg: &RankConfig) -> Vec<Document> {
    let mut docs: Vec<Document> = DirIter::new(path, cfg).collect();
    docs.sort_by(|a, b| a.get_id().cmp(b.get_id()));
    log::info!("{} documents loaded from {}", docs.len(), path.display());
    docs
}
