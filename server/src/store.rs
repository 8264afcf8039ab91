//! Document store holding every `BlogPost`.
//!
//! # Design
//! `Database` is a cheap, cloneable handle over one collection guarded by a
//! tokio `RwLock`. Readers run concurrently; writers are serialized, which is
//! what gives `insert_many` its all-or-nothing behavior: the whole batch is
//! validated, persisted, and only then made visible, under one write guard.
//!
//! The backend is picked from an opaque address string:
//! - `memory://<name>` keeps documents in process memory only.
//! - `file://<path>` additionally mirrors the collection to a JSON file. The
//!   file is loaded on connect and rewritten (temp file + rename) on every
//!   successful write, so a failed write leaves both file and memory as they
//!   were. Every live handle on the same file shares one collection, so a
//!   write through one handle is never overwritten by another. Loaded
//!   documents must pass the same field checks as new ones and carry unique
//!   ids.

use std::{
    collections::{HashMap, HashSet},
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock, Weak},
};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{BlogPost, NewPost, ValidationError};

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid document: {0}")]
    Validation(#[from] ValidationError),

    #[error("unsupported database address `{0}`")]
    InvalidAddress(String),

    #[error("store unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt document file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid document file {}: {reason}", .path.display())]
    InvalidFile { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
enum Backend {
    Memory,
    File { path: PathBuf },
}

#[derive(Debug, Default)]
struct Collection {
    posts: Vec<BlogPost>,
    index: HashMap<Uuid, usize>,
}

impl Collection {
    fn from_posts(posts: Vec<BlogPost>) -> Self {
        let index = posts.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        Self { posts, index }
    }

    fn push(&mut self, post: BlogPost) {
        self.index.insert(post.id, self.posts.len());
        self.posts.push(post);
    }
}

type SharedCollection = Arc<RwLock<Collection>>;

/// Collections of the currently open file stores, keyed by canonical path.
fn open_files() -> &'static Mutex<HashMap<PathBuf, Weak<RwLock<Collection>>>> {
    static OPEN_FILES: OnceLock<Mutex<HashMap<PathBuf, Weak<RwLock<Collection>>>>> =
        OnceLock::new();
    OPEN_FILES.get_or_init(Default::default)
}

/// Join the collection already open for `path`, or register `loaded` as it.
fn share_collection(path: &Path, loaded: Vec<BlogPost>) -> SharedCollection {
    let mut open = open_files().lock().unwrap_or_else(|e| e.into_inner());
    open.retain(|_, weak| weak.strong_count() > 0);
    if let Some(existing) = open.get(path).and_then(Weak::upgrade) {
        return existing;
    }
    let collection = Arc::new(RwLock::new(Collection::from_posts(loaded)));
    open.insert(path.to_path_buf(), Arc::downgrade(&collection));
    collection
}

/// Handle to the blog post collection. Clones share the same documents.
#[derive(Debug, Clone)]
pub struct Database {
    backend: Arc<Backend>,
    collection: SharedCollection,
}

impl Database {
    /// Open the store named by `address` (`memory://<name>` or `file://<path>`).
    pub async fn connect(address: &str) -> Result<Self> {
        let (backend, collection) = if address.starts_with(MEMORY_SCHEME) {
            (Backend::Memory, Arc::new(RwLock::new(Collection::default())))
        } else if let Some(path) = address.strip_prefix(FILE_SCHEME) {
            if path.is_empty() {
                return Err(StoreError::InvalidAddress(address.to_string()));
            }
            let path = canonical_path(Path::new(path)).await?;
            let posts = load_file(&path).await?;
            let collection = share_collection(&path, posts);
            (Backend::File { path }, collection)
        } else {
            return Err(StoreError::InvalidAddress(address.to_string()));
        };

        tracing::info!(
            address,
            documents = collection.read().await.posts.len(),
            "connected to blog post store"
        );

        Ok(Self {
            backend: Arc::new(backend),
            collection,
        })
    }

    /// In-memory store, mainly for tests.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory),
            collection: Arc::new(RwLock::new(Collection::default())),
        }
    }

    /// Store every item or none of them. Returns the stored documents in
    /// input order.
    pub async fn insert_many(&self, items: Vec<NewPost>) -> Result<Vec<BlogPost>> {
        for item in &items {
            item.validate()?;
        }

        let created = Utc::now();
        let posts: Vec<BlogPost> = items
            .into_iter()
            .map(|item| BlogPost::from_new(item, created))
            .collect();

        let mut collection = self.collection.write().await;
        self.persist(collection.posts.iter().chain(posts.iter())).await?;
        for post in &posts {
            collection.push(post.clone());
        }

        tracing::debug!(inserted = posts.len(), total = collection.posts.len(), "inserted posts");
        Ok(posts)
    }

    pub async fn insert_one(&self, item: NewPost) -> Result<BlogPost> {
        item.validate()?;
        let post = BlogPost::from_new(item, Utc::now());

        let mut collection = self.collection.write().await;
        self.persist(collection.posts.iter().chain(std::iter::once(&post)))
            .await?;
        collection.push(post.clone());

        tracing::debug!(id = %post.id, total = collection.posts.len(), "inserted post");
        Ok(post)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.collection.read().await.posts.len())
    }

    /// Exact lookup. An unknown id is `Ok(None)`, not an error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>> {
        let collection = self.collection.read().await;
        Ok(collection
            .index
            .get(&id)
            .map(|&i| collection.posts[i].clone()))
    }

    /// Every document, in insertion order.
    pub async fn find_all(&self) -> Result<Vec<BlogPost>> {
        Ok(self.collection.read().await.posts.clone())
    }

    /// Remove every document. Used between test runs.
    pub async fn drop_all(&self) -> Result<()> {
        let mut collection = self.collection.write().await;
        self.persist(std::iter::empty()).await?;
        let dropped = collection.posts.len();
        *collection = Collection::default();

        tracing::info!(dropped, "dropped all posts");
        Ok(())
    }

    async fn persist<'a>(&self, posts: impl Iterator<Item = &'a BlogPost>) -> Result<()> {
        let path = match self.backend.as_ref() {
            Backend::Memory => return Ok(()),
            Backend::File { path } => path,
        };

        let snapshot: Vec<&BlogPost> = posts.collect();
        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(std::io::Error::other)?;

        let mut tmp_name = path.file_name().map(OsString::from).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

/// Create the parent directory if needed and resolve it, so every spelling of
/// the same file maps to one key.
async fn canonical_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidAddress(format!("{FILE_SCHEME}{}", path.display())))?;
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    tokio::fs::create_dir_all(parent).await?;
    Ok(tokio::fs::canonicalize(parent).await?.join(file_name))
}

async fn load_file(path: &Path) -> Result<Vec<BlogPost>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let posts: Vec<BlogPost> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = HashSet::with_capacity(posts.len());
    for post in &posts {
        if let Err(e) = post.validate() {
            return Err(StoreError::InvalidFile {
                path: path.to_path_buf(),
                reason: format!("document {}: {e}", post.id),
            });
        }
        if !seen.insert(post.id) {
            return Err(StoreError::InvalidFile {
                path: path.to_path_buf(),
                reason: format!("duplicate id {}", post.id),
            });
        }
    }
    Ok(posts)
}
