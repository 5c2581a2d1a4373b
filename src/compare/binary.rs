//! Byte-exact file comparison

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CompareError, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Compare two files byte for byte.
pub fn files_identical(left: &Path, right: &Path) -> Result<bool> {
    let left_file = File::open(left).map_err(|e| CompareError::io(left, e))?;
    let right_file = File::open(right).map_err(|e| CompareError::io(right, e))?;

    let left_len = left_file.metadata().map_err(|e| CompareError::io(left, e))?.len();
    let right_len = right_file.metadata().map_err(|e| CompareError::io(right, e))?.len();
    if left_len != right_len {
        return Ok(false);
    }

    let mut left_reader = BufReader::new(left_file);
    let mut right_reader = BufReader::new(right_file);
    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = read_full(&mut left_reader, &mut left_buf).map_err(|e| CompareError::io(left, e))?;
        let m =
            read_full(&mut right_reader, &mut right_buf).map_err(|e| CompareError::io(right, e))?;

        if n != m || left_buf[..n] != right_buf[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows; returns fewer bytes only at EOF
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
