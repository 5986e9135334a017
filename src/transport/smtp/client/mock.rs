//! A scriptable in-memory stream, for tests

use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

type MockCursor = Cursor<Vec<u8>>;

/// A fake network stream backed by two in-memory buffers
///
/// Reads come from a pre-loaded script of server replies; everything the
/// client writes is collected and can be inspected with
/// [`take_vec`][MockStream::take_vec].
#[derive(Clone, Debug, Default)]
pub struct MockStream {
    reader: Arc<Mutex<MockCursor>>,
    writer: Arc<Mutex<MockCursor>>,
}

impl MockStream {
    /// Creates an empty mock stream
    pub fn new() -> MockStream {
        MockStream::default()
    }

    /// Creates a mock stream that will replay `vec` on reads
    pub fn with_vec(vec: Vec<u8>) -> MockStream {
        MockStream {
            reader: Arc::new(Mutex::new(MockCursor::new(vec))),
            writer: Arc::new(Mutex::new(MockCursor::new(Vec::new()))),
        }
    }

    /// Takes everything written so far, clearing the write buffer
    pub fn take_vec(&mut self) -> Vec<u8> {
        let mut cursor = self.writer.lock().unwrap();
        let vec = cursor.get_ref().to_vec();
        cursor.set_position(0);
        cursor.get_mut().clear();
        vec
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.lock().unwrap().flush()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.lock().unwrap().read(buf)
    }
}

#[cfg(test)]
mod test {
    use super::MockStream;
    use std::io::{Read, Write};

    #[test]
    fn write_take_test() {
        let mut mock = MockStream::new();
        mock.write_all(&[1, 2, 3]).unwrap();
        assert_eq!(mock.take_vec(), vec![1, 2, 3]);
        assert_eq!(mock.take_vec(), Vec::<u8>::new());
    }

    #[test]
    fn read_with_vec_test() {
        let mut mock = MockStream::with_vec(vec![4, 5]);
        let mut vec = Vec::new();
        mock.read_to_end(&mut vec).unwrap();
        assert_eq!(vec, vec![4, 5]);
    }

    #[test]
    fn clone_test() {
        let mut mock = MockStream::new();
        let mut cloned = mock.clone();
        mock.write_all(&[6, 7]).unwrap();
        assert_eq!(cloned.take_vec(), vec![6, 7]);
    }
}
