use super::options::{CompressionMode, SessionOptions};
use crate::canvas::Canvas;
use crate::draw::{Color, Stroke, StrokeId};
use crate::geometry::Viewport;
use crate::input::Tool;
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

/// Captured annotation state suitable for serialisation or restoration.
///
/// Strokes are stored per page index so a multi-page host can persist every
/// page it has touched, not just the one currently on screen.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub active_page: usize,
    pub pages: BTreeMap<usize, Vec<Stroke>>,
    pub tool_state: Option<ToolStateSnapshot>,
}

impl SessionSnapshot {
    pub fn new(active_page: usize) -> Self {
        Self {
            active_page,
            pages: BTreeMap::new(),
            tool_state: None,
        }
    }

    /// Records the strokes for one page. Empty lists are dropped so pages the
    /// user never inked do not bloat the file.
    pub fn set_page_strokes(&mut self, index: usize, strokes: Vec<Stroke>) {
        if strokes.is_empty() {
            self.pages.remove(&index);
        } else {
            self.pages.insert(index, strokes);
        }
    }

    fn is_empty(&self) -> bool {
        self.pages.values().all(|strokes| strokes.is_empty())
    }
}

/// Subset of canvas state we persist to disk to restore tool context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStateSnapshot {
    pub tool: Tool,
    pub color: Color,
    pub viewport: Viewport,
}

impl ToolStateSnapshot {
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self {
            tool: canvas.tool(),
            color: canvas.color(),
            viewport: canvas.viewport,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    last_modified: String,
    #[serde(default)]
    active_page: usize,
    #[serde(default)]
    pages: BTreeMap<usize, Vec<Stroke>>,
    #[serde(default)]
    tool_state: Option<ToolStateSnapshot>,
}

pub struct LoadedSnapshot {
    pub snapshot: SessionSnapshot,
    pub compressed: bool,
}

/// Capture a snapshot of the live canvas if persistence is enabled.
///
/// Single-page convenience: the canvas page lands at index `0`. Multi-page
/// hosts build a [`SessionSnapshot`] themselves and call
/// [`SessionSnapshot::set_page_strokes`] per page.
pub fn snapshot_from_canvas(canvas: &Canvas, options: &SessionOptions) -> Option<SessionSnapshot> {
    if !options.persist_strokes && !options.restore_tool_state {
        return None;
    }

    let mut snapshot = SessionSnapshot::new(0);

    if options.persist_strokes {
        snapshot.set_page_strokes(0, canvas.page.strokes().to_vec());
    }

    if options.restore_tool_state {
        snapshot.tool_state = Some(ToolStateSnapshot::from_canvas(canvas));
    }

    if snapshot.is_empty() && snapshot.tool_state.is_none() {
        None
    } else {
        Some(snapshot)
    }
}

/// Persist the provided snapshot to disk according to the configured options.
pub fn save_snapshot(snapshot: &SessionSnapshot, options: &SessionOptions) -> Result<()> {
    if !options.persist_strokes && snapshot.tool_state.is_none() {
        debug!("Session persistence disabled; skipping save");
        return Ok(());
    }

    fs::create_dir_all(&options.base_dir).with_context(|| {
        format!(
            "failed to create session directory {}",
            options.base_dir.display()
        )
    })?;

    let lock_path = options.lock_file_path();
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open session lock file {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock session file {}", lock_path.display()))?;

    let result = save_snapshot_inner(snapshot, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock session file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_snapshot_inner(snapshot: &SessionSnapshot, options: &SessionOptions) -> Result<()> {
    let session_path = options.session_file_path();
    let backup_path = options.backup_file_path();

    if snapshot.is_empty() && snapshot.tool_state.is_none() {
        if session_path.exists() {
            debug!(
                "Removing session file {} because snapshot is empty",
                session_path.display()
            );
            fs::remove_file(&session_path).with_context(|| {
                format!(
                    "failed to remove empty session file {}",
                    session_path.display()
                )
            })?;
        }
        return Ok(());
    }

    let file_payload = SessionFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        active_page: snapshot.active_page,
        pages: snapshot.pages.clone(),
        tool_state: snapshot.tool_state.clone(),
    };

    let mut json_bytes =
        serde_json::to_vec_pretty(&file_payload).context("failed to serialise session payload")?;

    if json_bytes.len() as u64 > options.max_file_size_bytes {
        warn!(
            "Session data size {} bytes exceeds the configured limit of {} bytes; skipping save",
            json_bytes.len(),
            options.max_file_size_bytes
        );
        return Ok(());
    }

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (json_bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    if should_compress {
        json_bytes = compress_bytes(&json_bytes)?;
    }

    let tmp_path = temp_path(&session_path)?;
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary session file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(&json_bytes)
            .context("failed to write session payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary session file")?;
    }

    if session_path.exists() {
        if options.backup_retention > 0 {
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            fs::rename(&session_path, &backup_path).with_context(|| {
                format!(
                    "failed to rotate previous session file {} -> {}",
                    session_path.display(),
                    backup_path.display()
                )
            })?;
        } else {
            fs::remove_file(&session_path).ok();
        }
    }

    fs::rename(&tmp_path, &session_path).with_context(|| {
        format!(
            "failed to move temporary session file {} -> {}",
            tmp_path.display(),
            session_path.display()
        )
    })?;

    info!(
        "Session saved to {} ({} bytes, compression={})",
        session_path.display(),
        json_bytes.len(),
        should_compress
    );

    Ok(())
}

/// Attempt to load a previously saved session.
pub fn load_snapshot(options: &SessionOptions) -> Result<Option<SessionSnapshot>> {
    if !options.persist_strokes && !options.restore_tool_state {
        debug!("Session persistence disabled; skipping load");
        return Ok(None);
    }

    let session_path = options.session_file_path();
    if !session_path.exists() {
        debug!(
            "No session file present at {}, skipping load",
            session_path.display()
        );
        return Ok(None);
    }

    let metadata = fs::metadata(&session_path)
        .with_context(|| format!("failed to stat session file {}", session_path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Session file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            session_path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Ok(None);
    }

    let lock_path = options.lock_file_path();
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open session lock file {}", lock_path.display()))?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_snapshot_inner(&session_path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock session file {}: {}",
            lock_path.display(),
            err
        )
    });

    match result? {
        Some(loaded) => Ok(Some(loaded.snapshot)),
        None => Ok(None),
    }
}

/// Loads a session from an explicit file path, without the options-derived
/// location machinery. This is the import path used by the CLI exporter.
pub fn load_snapshot_from_path(path: &Path) -> Result<Option<SessionSnapshot>> {
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let options = SessionOptions::new(base_dir, "import");
    Ok(load_snapshot_inner(path, &options)?.map(|loaded| loaded.snapshot))
}

pub(crate) fn load_snapshot_inner(
    session_path: &Path,
    options: &SessionOptions,
) -> Result<Option<LoadedSnapshot>> {
    let mut file_bytes = Vec::new();
    {
        let mut file = File::open(session_path)
            .with_context(|| format!("failed to open session file {}", session_path.display()))?;
        file.read_to_end(&mut file_bytes)
            .context("failed to read session file")?;
    }

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress session file")?;
        out
    } else {
        file_bytes
    };

    let session_file: SessionFile =
        serde_json::from_slice(&decompressed).context("failed to parse session json")?;

    let mut snapshot = SessionSnapshot {
        active_page: session_file.active_page,
        pages: session_file.pages,
        tool_state: session_file.tool_state,
    };

    enforce_stroke_limits(&mut snapshot, options.max_strokes_per_page);

    // Later strokes must never reuse a persisted id.
    if let Some(max_id) = snapshot.pages.values().flatten().map(|s| s.id).max() {
        StrokeId::advance_past(max_id);
    }

    if snapshot.is_empty() && snapshot.tool_state.is_none() {
        debug!(
            "Loaded session file at {} but it contained no data",
            session_path.display()
        );
        return Ok(None);
    }

    Ok(Some(LoadedSnapshot {
        snapshot,
        compressed,
    }))
}

/// Apply a session snapshot to the live [`Canvas`].
///
/// The active page's strokes replace the canvas page; other pages stay in the
/// snapshot for the host to swap in on navigation.
pub fn apply_snapshot(canvas: &mut Canvas, snapshot: &SessionSnapshot, options: &SessionOptions) {
    if options.persist_strokes {
        let strokes = snapshot
            .pages
            .get(&snapshot.active_page)
            .cloned()
            .unwrap_or_default();
        canvas.page.set_strokes(strokes);
    }

    if options.restore_tool_state {
        if let Some(tool_state) = &snapshot.tool_state {
            canvas.set_tool(tool_state.tool);
            canvas.set_color(tool_state.color);
            // Re-clamp in case the file was edited by hand.
            canvas.viewport = Viewport::new(
                tool_state.viewport.scale,
                tool_state.viewport.offset_x,
                tool_state.viewport.offset_y,
            );
        }
    }

    canvas.needs_redraw = true;
}

fn enforce_stroke_limits(snapshot: &mut SessionSnapshot, max_strokes: usize) {
    for (index, strokes) in snapshot.pages.iter_mut() {
        if strokes.len() > max_strokes {
            warn!(
                "Session page {} contains {} strokes which exceeds the limit of {}; truncating",
                index,
                strokes.len(),
                max_strokes
            );
            strokes.truncate(max_strokes);
        }
    }
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress session payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed session payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> Result<PathBuf> {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    Ok(candidate)
}
