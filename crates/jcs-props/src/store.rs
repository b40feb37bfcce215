//! The layout-preserving properties store.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::codec::{decode_latin1, write_line, PhysicalLines};
use crate::config::{MalformedLinePolicy, StoreConfig};
use crate::error::{PropsError, PropsResult};
use crate::line::{is_blank, is_comment, parse_entry, LineRecord};
use crate::traits::PropertySource;

/// Ordered records plus a key -> slot index.
///
/// Slot `i` holds the record at 1-based position `i + 1`. Every slot is
/// occupied, and `index` maps each entry key to its slot.
#[derive(Clone, Debug, Default)]
struct Lines {
    records: Vec<LineRecord>,
    index: HashMap<String, usize>,
}

impl Lines {
    fn slot_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push_comment(&mut self, text: String) {
        self.records.push(LineRecord::Comment { text });
    }

    fn put(&mut self, key: String, value: String) -> Option<String> {
        match self.slot_of(&key) {
            Some(slot) => match &mut self.records[slot] {
                LineRecord::Entry { value: current, .. } => Some(std::mem::replace(current, value)),
                LineRecord::Comment { .. } => unreachable!("key index points at a comment line"),
            },
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push(LineRecord::Entry { key, value });
                None
            }
        }
    }

    /// Insert a new entry at `slot`, moving the record there and everything
    /// after it down by one.
    fn insert_at(&mut self, slot: usize, key: String, value: String) {
        for s in self.index.values_mut() {
            if *s >= slot {
                *s += 1;
            }
        }
        self.index.insert(key.clone(), slot);
        self.records.insert(slot, LineRecord::Entry { key, value });
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let slot = self.index.remove(key)?;
        for s in self.index.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        self.records.remove(slot).value().map(str::to_owned)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().filter_map(|r| match r {
            LineRecord::Entry { key, value } => Some((key.as_str(), value.as_str())),
            LineRecord::Comment { .. } => None,
        })
    }
}

/// Where a new key lands relative to its anchor.
#[derive(Clone, Copy, Debug)]
enum Placement {
    After,
    Before,
}

/// A properties map that remembers its file layout.
///
/// Records are addressed by dense 1-based line positions. Comments and blank
/// lines keep their place, existing keys keep their line when updated, new
/// keys are appended or placed next to an anchor key, and removal closes the
/// gap.
///
/// Every public method runs under one internal mutex, so a call never sees
/// another call half-applied. Sequences of calls are not atomic: a
/// `contains_key` followed by `put` may interleave with another thread.
pub struct OrderedConfigStore {
    config: StoreConfig,
    lines: Mutex<Lines>,
}

impl OrderedConfigStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            lines: Mutex::new(Lines::default()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        self.lines.lock().expect("props mutex poisoned")
    }

    // ---------------------------------------------------------------
    // Load / store
    // ---------------------------------------------------------------

    /// Replace the store's content with the lines read from `reader`.
    ///
    /// Input is decoded as ISO-8859-1. Blank and comment lines are kept
    /// verbatim; every other line is parsed as one key/value pair and goes
    /// through [`put`](Self::put), so a repeated key keeps its first line and
    /// its last value. On error the previous content is left untouched.
    pub fn load<R: Read>(&self, mut reader: R) -> PropsResult<()> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let parsed = self.parse(&bytes)?;
        debug!(
            lines = parsed.records.len(),
            entries = parsed.index.len(),
            "properties loaded"
        );
        *self.lock() = parsed;
        Ok(())
    }

    /// Load from a file.
    pub fn load_path(&self, path: &Path) -> PropsResult<()> {
        let bytes = fs::read(path).map_err(|source| PropsError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(bytes.as_slice())
    }

    fn parse(&self, bytes: &[u8]) -> PropsResult<Lines> {
        let mut lines = Lines::default();
        for (n, raw) in PhysicalLines::new(bytes).enumerate() {
            let line_no = n + 1;
            let text = decode_latin1(raw);
            if is_blank(&text) || is_comment(&text) {
                lines.push_comment(text);
                continue;
            }
            match parse_entry(&text) {
                Some((key, value)) => {
                    if let Some(previous) = lines.put(key.clone(), value) {
                        debug!(line = line_no, key = %key, previous = %previous, "duplicate key; later value wins");
                    }
                }
                None => match self.config.malformed {
                    MalformedLinePolicy::Preserve => {
                        warn!(line = line_no, content = %text, "malformed properties line kept verbatim");
                        lines.push_comment(text);
                    }
                    MalformedLinePolicy::Reject => {
                        return Err(PropsError::MalformedLine {
                            line: line_no,
                            content: text,
                        });
                    }
                },
            }
        }
        Ok(lines)
    }

    /// Write every record, in position order, to `writer`.
    ///
    /// Comments are written verbatim and entries as `key = value`, each
    /// followed by the configured line separator. The writer is neither
    /// closed nor flushed.
    pub fn store<W: Write>(&self, writer: W) -> PropsResult<()> {
        let separator = self.config.line_separator.as_str();
        let lines = self.lock();
        let mut out = BufWriter::new(writer);
        for record in &lines.records {
            write_line(&mut out, &record.to_line(), separator)?;
        }
        out.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }

    /// Store to a file, replacing it atomically.
    ///
    /// Content goes to a temporary file in the same directory which is then
    /// renamed over `path`.
    pub fn store_path(&self, path: &Path) -> PropsResult<()> {
        let file_error = |source: std::io::Error| PropsError::File {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(file_error)?;
        self.store(&mut tmp).map_err(|e| e.at_path(path))?;
        tmp.as_file().sync_all().map_err(file_error)?;
        tmp.persist(path).map_err(|e| file_error(e.error))?;
        debug!(path = %path.display(), "properties stored");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Set `key` to `value`, returning the previous value.
    ///
    /// A new key is appended after the last line. An existing key keeps its
    /// line. An empty key cannot be written back to a file, so it is ignored
    /// and `None` is returned.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        if key.is_empty() {
            warn!("ignoring put with an empty key");
            return None;
        }
        self.lock().put(key, value.into())
    }

    /// Alias for [`put`](Self::put).
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.put(key, value)
    }

    /// Set `key`, placing it on the line right after `anchor` if it is new.
    ///
    /// An existing key is updated in place and the anchor is ignored. A
    /// missing anchor falls back to appending.
    pub fn put_after(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        anchor: &str,
    ) -> Option<String> {
        self.put_relative(key.into(), value.into(), anchor, Placement::After)
    }

    /// Set `key`, placing it on the line right before `anchor` if it is new.
    ///
    /// Same fallbacks as [`put_after`](Self::put_after).
    pub fn put_before(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        anchor: &str,
    ) -> Option<String> {
        self.put_relative(key.into(), value.into(), anchor, Placement::Before)
    }

    fn put_relative(
        &self,
        key: String,
        value: String,
        anchor: &str,
        placement: Placement,
    ) -> Option<String> {
        if key.is_empty() {
            warn!(anchor, "ignoring put with an empty key");
            return None;
        }
        let mut lines = self.lock();
        if lines.slot_of(&key).is_some() {
            return lines.put(key, value);
        }
        let Some(anchor_slot) = lines.slot_of(anchor) else {
            debug!(key = %key, anchor, "anchor key not found; appending");
            return lines.put(key, value);
        };
        let slot = match placement {
            Placement::After => anchor_slot + 1,
            Placement::Before => anchor_slot,
        };
        debug!(key = %key, anchor, position = slot + 1, "inserting relative to anchor");
        lines.insert_at(slot, key, value);
        None
    }

    /// Remove `key`, returning its value.
    ///
    /// Records after the removed line move up by one position.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    /// Remove every record, comments and blank lines included.
    pub fn clear(&self) {
        *self.lock() = Lines::default();
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Value of `key`, if present.
    pub fn get_property(&self, key: &str) -> Option<String> {
        let lines = self.lock();
        let slot = lines.slot_of(key)?;
        lines.records[slot].value().map(str::to_owned)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().index.contains_key(key)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.lock().entries().any(|(_, v)| v == value)
    }

    /// `true` if there are no entries. Comments and blank lines don't count.
    pub fn is_empty(&self) -> bool {
        self.lock().index.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().index.len()
    }

    /// Number of records (entries, comments and blank lines).
    pub fn line_count(&self) -> usize {
        self.lock().records.len()
    }

    /// 1-based line position of `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.lock().slot_of(key).map(|slot| slot + 1)
    }

    /// Keys in line order, or `None` if there are no entries.
    pub fn keys(&self) -> Option<Vec<String>> {
        let lines = self.lock();
        let keys: Vec<String> = lines.entries().map(|(k, _)| k.to_owned()).collect();
        (!keys.is_empty()).then_some(keys)
    }

    /// Values in line order, or `None` if there are no entries.
    pub fn values(&self) -> Option<Vec<String>> {
        let lines = self.lock();
        let values: Vec<String> = lines.entries().map(|(_, v)| v.to_owned()).collect();
        (!values.is_empty()).then_some(values)
    }

    /// Snapshot of every record in line order.
    pub fn lines(&self) -> Vec<LineRecord> {
        self.lock().records.clone()
    }
}

impl Default for OrderedConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for OrderedConfigStore {
    /// Deep copy: the clone shares no state with `self`.
    fn clone(&self) -> Self {
        let lines = self.lock().clone();
        Self {
            config: self.config.clone(),
            lines: Mutex::new(lines),
        }
    }
}

impl PropertySource for OrderedConfigStore {
    fn get_property(&self, key: &str) -> Option<String> {
        OrderedConfigStore::get_property(self, key)
    }
}

impl std::fmt::Debug for OrderedConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self.lock();
        f.debug_struct("OrderedConfigStore")
            .field("line_count", &lines.records.len())
            .field("entry_count", &lines.index.len())
            .field("config", &self.config)
            .finish()
    }
}
