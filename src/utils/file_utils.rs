use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Memory-map a file for parsing. Avoids copying the 3500x512 sensor tables
/// through an intermediate read buffer.
pub fn map_file(path: impl AsRef<Path>) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: The file is not modified while the mmap is active
    unsafe { Mmap::map(&file) }.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
