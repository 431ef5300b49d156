use std::io::{self, Read, Write};

use super::{Deque, Error};

fn io_error(err: Error) -> io::Error {
  match err {
    Error::AllocationFailure { .. } => io::Error::new(io::ErrorKind::OutOfMemory, err),
    Error::OutOfRange { .. } | Error::Underflow => io::Error::new(io::ErrorKind::Other, err),
  }
}

/// Read is implemented for `Deque<u8>` by consuming bytes from the front of
/// the deque. Vacant positions are consumed without producing a byte.
impl Read for Deque<u8> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let mut read = 0;
    while read < buf.len() && !self.is_empty() {
      if let Some(byte) = self.pop_front().map_err(io_error)? {
        buf[read] = byte;
        read += 1;
      }
    }
    Ok(read)
  }
}

/// Write is implemented for `Deque<u8>` by appending to the back of the deque,
/// growing it as needed.
impl Write for Deque<u8> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.reserve(buf.len()).map_err(io_error)?;
    for &byte in buf {
      self.write_back(Some(byte));
    }
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}
