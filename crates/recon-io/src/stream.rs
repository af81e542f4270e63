use crate::error::CodecError;

/// Chunk size for the writer's growable buffer.
const CHUNK_SIZE: usize = 64 * 1024;

/// Sequential little-endian reader over a borrowed byte buffer.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read cursor in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let slice = self
            .buf
            .get(self.pos..self.pos + n)
            .ok_or(CodecError::UnexpectedEof { offset: self.pos, needed: n })?;
        self.pos += n;
        Ok(slice)
    }

    /// Advance the cursor by `n` bytes without materializing them.
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.take(n).map(|_| ())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.take(4)?);
        Ok(i32::from_le_bytes(bytes))
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a little-endian i64.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(i64::from_le_bytes(bytes))
    }

    /// Read a little-endian f64.
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(f64::from_le_bytes(bytes))
    }

    /// Read a null-terminated ASCII string, consuming the terminator.
    pub fn read_cstr(&mut self) -> Result<String, CodecError> {
        let start = self.pos;
        let nul = self.buf[start..]
            .iter()
            .position(|b| *b == 0)
            .ok_or(CodecError::UnexpectedEof { offset: start, needed: 1 })?;
        let bytes = self.take(nul + 1)?;
        Ok(String::from_utf8_lossy(&bytes[..nul]).into_owned())
    }
}

/// Append-only little-endian writer over a chunked buffer.
///
/// Bytes accumulate in fixed-size chunks so that large sequential writes
/// never trigger a full-buffer reallocation; [`ByteWriter::into_bytes`]
/// concatenates the chunks once at the end.
#[derive(Debug, Default)]
pub struct ByteWriter {
    chunks: Vec<Vec<u8>>,
    len: usize,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, mut bytes: &[u8]) {
        self.len += bytes.len();
        while !bytes.is_empty() {
            if self.chunks.last().map_or(true, |c| c.len() >= CHUNK_SIZE) {
                self.chunks.push(Vec::with_capacity(CHUNK_SIZE));
            }
            if let Some(chunk) = self.chunks.last_mut() {
                let room = CHUNK_SIZE - chunk.len();
                let n = room.min(bytes.len());
                chunk.extend_from_slice(&bytes[..n]);
                bytes = &bytes[n..];
            }
        }
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    /// Append a little-endian u32.
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a little-endian i32.
    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a little-endian i64.
    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a little-endian f64.
    pub fn write_f64(&mut self, value: f64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Append a string followed by a null terminator.
    pub fn write_cstr(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
        self.write_u8(0);
    }

    /// Concatenate all chunks into one contiguous buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks {
            out.extend_from_slice(&chunk);
        }
        out
    }
}
