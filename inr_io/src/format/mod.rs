//! Binary container format for serialized signals.
//!
//! A `.vol` file is a fixed header ([`VolHeader`]) followed by the flat f32
//! payload. Both 3D volumes and 2D planes (t = 1) use the same container.

mod header;

pub use header::{VolHeader, HEADER_SIZE, VOL_MAGIC};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{IoError, Result};

/// Write a flat value buffer to `writer` under the given header.
pub fn write_values<W: Write>(writer: &mut W, header: &VolHeader, values: &[f32]) -> Result<()> {
    if values.len() != header.value_count() {
        return Err(IoError::InvalidFormat {
            message: "payload length does not match header dimensions",
        });
    }

    writer.write_all(&header.to_bytes())?;

    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    writer.write_all(&bytes)?;

    Ok(())
}

/// Read a header and payload from `reader`.
pub fn read_values<R: Read>(reader: &mut R) -> Result<(VolHeader, Vec<f32>)> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;

    let header = VolHeader::from_bytes(&header_bytes);
    if !header.is_valid() {
        return Err(IoError::InvalidFormat {
            message: "bad magic bytes",
        });
    }

    let expected = header.value_count();
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;

    if payload.len() < expected * 4 {
        return Err(IoError::Truncated {
            expected,
            got: payload.len() / 4,
        });
    }

    let values = payload
        .chunks_exact(4)
        .take(expected)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok((header, values))
}

/// Write a value buffer to a `.vol` file.
pub fn write_file<P: AsRef<Path>>(path: P, header: &VolHeader, values: &[f32]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_values(&mut writer, header, values)
}

/// Read a `.vol` file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<(VolHeader, Vec<f32>)> {
    let mut reader = BufReader::new(File::open(path)?);
    read_values(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_in_memory() {
        let header = VolHeader::new(2, 3, 4, 1);
        let values: Vec<f32> = (0..24).map(|i| i as f32 * 0.5).collect();

        let mut buffer = Vec::new();
        write_values(&mut buffer, &header, &values).unwrap();

        let (restored_header, restored) = read_values(&mut buffer.as_slice()).unwrap();
        assert_eq!(restored_header, header);
        assert_eq!(restored, values);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.vol");

        let header = VolHeader::new(4, 4, 1, 3);
        let values = vec![0.25f32; header.value_count()];

        write_file(&path, &header, &values).unwrap();
        let (restored_header, restored) = read_file(&path).unwrap();

        assert_eq!(restored_header, header);
        assert_eq!(restored, values);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut buffer = vec![0u8; HEADER_SIZE + 4];
        buffer[0..4].copy_from_slice(b"NOPE");

        let err = read_values(&mut buffer.as_slice()).unwrap_err();
        assert!(matches!(err, IoError::InvalidFormat { .. }));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let header = VolHeader::new(2, 2, 2, 1);
        let values = vec![1.0f32; 8];

        let mut buffer = Vec::new();
        write_values(&mut buffer, &header, &values).unwrap();
        buffer.truncate(buffer.len() - 8);

        let err = read_values(&mut buffer.as_slice()).unwrap_err();
        assert!(matches!(err, IoError::Truncated { .. }));
    }

    #[test]
    fn test_payload_length_checked_on_write() {
        let header = VolHeader::new(2, 2, 2, 1);
        let mut buffer = Vec::new();

        let err = write_values(&mut buffer, &header, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, IoError::InvalidFormat { .. }));
    }
}
