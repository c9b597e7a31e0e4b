use std::io::{BufRead, BufReader, Read};

use flate2::bufread::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reader over a track file that may or may not be gzip-compressed.
/// The compression is detected from the first bytes of the stream.
pub enum TrackStream<R: BufRead> {
    Uncompressed(R),
    Gzip(BufReader<GzDecoder<R>>),
}

impl<R: BufRead> TrackStream<R> {
    pub fn new(mut stream: R) -> std::io::Result<Self> {
        let is_gzip = stream.fill_buf()?.starts_with(&GZIP_MAGIC);
        if is_gzip {
            Ok(TrackStream::Gzip(BufReader::new(GzDecoder::new(stream))))
        } else {
            Ok(TrackStream::Uncompressed(stream))
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, TrackStream::Gzip(_))
    }
}

impl TrackStream<BufReader<std::fs::File>> {
    pub fn from_file(path: &std::path::Path) -> std::io::Result<Self> {
        // The BufReader sits beneath the decoder so the magic bytes peeked in
        // `new` are still there for the decoder to consume.
        let file = BufReader::new(std::fs::File::open(path)?);
        Self::new(file)
    }
}

impl<R: BufRead> Read for TrackStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            TrackStream::Uncompressed(reader) => reader.read(buf),
            TrackStream::Gzip(decoder) => decoder.read(buf),
        }
    }
}

impl<R: BufRead> BufRead for TrackStream<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            TrackStream::Uncompressed(reader) => reader.fill_buf(),
            TrackStream::Gzip(decoder) => decoder.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            TrackStream::Uncompressed(reader) => reader.consume(amt),
            TrackStream::Gzip(decoder) => decoder.consume(amt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    const TEXT: &str = "AXXX001\nB1101355206343N00006198WA0058700558\n";

    #[test]
    fn passes_plain_text_through() {
        let mut stream = TrackStream::new(Cursor::new(TEXT.as_bytes())).unwrap();
        assert!(!stream.is_compressed());
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, TEXT);
    }

    #[test]
    fn decompresses_gzip_transparently() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TEXT.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let stream = TrackStream::new(Cursor::new(compressed)).unwrap();
        assert!(stream.is_compressed());
        let lines: Vec<String> = stream.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["AXXX001", "B1101355206343N00006198WA0058700558"]);
    }

    #[test]
    fn empty_input_is_uncompressed() {
        let mut stream = TrackStream::new(Cursor::new(Vec::<u8>::new())).unwrap();
        assert!(!stream.is_compressed());
        assert_eq!(stream.fill_buf().unwrap().len(), 0);
    }
}
