//! Append-only log file.
//!
//! [`FileRepository<T>`] stores any serializable item as a sequence of
//! length-prefixed bincode frames:
//! ```text
//! [u32 length LE][bincode serialized T]
//! [u32 length LE][bincode serialized T]
//! ...
//! ```
//! Reads open a separate handle, so they only see frames that have been flushed.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::{RepositoryError, Result};
use crate::types::ByteOffset;

const LEN_PREFIX: u64 = 4;
const WRITE_BUFFER: usize = 256 * 1024;

pub struct FileRepository<T> {
    /// File name without directory
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    /// Offset of the next frame
    current_offset: ByteOffset,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new log file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::LogAlreadyExists`] if the file is already there.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename);
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        tracing::debug!("Created log: {}", path.display());
        Ok(Self::with_file(filename, path, file, 0))
    }

    /// Open an existing log for appending.
    pub fn open(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let filename = filename.as_ref();
        let path = base_dir.as_ref().join(filename);

        let file = OpenOptions::new().append(true).open(&path)?;
        let current_offset = file.metadata()?.len();
        tracing::debug!("Opened log: {} at offset {}", path.display(), current_offset);
        Ok(Self::with_file(filename, path, file, current_offset))
    }

    /// Open a log for appending, creating the directory and file when missing.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let current_offset = file.metadata()?.len();
        tracing::debug!(
            "Opened/created log: {} at offset {}",
            path.display(),
            current_offset
        );
        Ok(Self::with_file(filename, path, file, current_offset))
    }

    fn with_file(name: &str, path: PathBuf, file: File, current_offset: ByteOffset) -> Self {
        Self {
            name: name.to_string(),
            path,
            writer: BufWriter::with_capacity(WRITE_BUFFER, file),
            current_offset,
            _phantom: PhantomData,
        }
    }

    /// Append an item. Returns the offset of its frame.
    pub fn append(&mut self, item: &T) -> Result<ByteOffset> {
        let offset = self.current_offset;
        let bytes = bincode::serialize(item)?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| RepositoryError::Serialization("log entry exceeds 4 GiB".into()))?;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;
        self.current_offset += LEN_PREFIX + bytes.len() as u64;

        Ok(offset)
    }

    /// Read the frame at `byte_offset`.
    ///
    /// Returns `None` at or past the end of the file, otherwise the item and the
    /// offset of the following frame. A frame cut short by the end of the file is
    /// reported as [`RepositoryError::PartialWrite`].
    pub fn read_at_offset(&self, byte_offset: ByteOffset) -> Result<Option<(T, ByteOffset)>> {
        let file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();
        if byte_offset >= file_size {
            return Ok(None);
        }

        let remaining = file_size - byte_offset;
        if remaining < LEN_PREFIX {
            return Err(RepositoryError::PartialWrite {
                offset: byte_offset,
                expected: LEN_PREFIX as usize,
                actual: remaining as usize,
            });
        }

        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(byte_offset))?;

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let available = remaining - LEN_PREFIX;
        if (len as u64) > available {
            return Err(RepositoryError::PartialWrite {
                offset: byte_offset,
                expected: len,
                actual: available as usize,
            });
        }

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;
        let item = bincode::deserialize(&data)?;

        Ok(Some((item, byte_offset + LEN_PREFIX + len as u64)))
    }

    /// Read every flushed frame from the start of the file.
    pub fn read_all(&self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset = 0;
        while let Some((item, next)) = self.read_at_offset(offset)? {
            items.push(item);
            offset = next;
        }
        Ok(items)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Bytes written so far, including buffered frames.
    pub fn size(&self) -> ByteOffset {
        self.current_offset
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush log '{}' on drop: {}", self.name, e);
        }
    }
}
