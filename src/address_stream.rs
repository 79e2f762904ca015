use std::{
    fmt,
    io::{self, BufRead, Split},
    str,
};

use log::warn;

/// A line of the address stream that is not a decimal 32-bit address.
#[derive(Debug, PartialEq)]
pub struct MalformedAddress(pub String);

impl fmt::Display for MalformedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed address {:?}", self.0)
    }
}

impl std::error::Error for MalformedAddress {}

/// Parses one trimmed line. `"0"` is the address zero, not an empty line.
pub fn parse_address(line: &str) -> Result<u32, MalformedAddress> {
    line.trim()
        .parse::<u32>()
        .map_err(|_| MalformedAddress(line.to_string()))
}

/// Logical addresses read one per line, in order. Blank and malformed lines
/// are skipped and counted.
pub struct AddressStream<R> {
    lines: Split<R>,
    line_number: usize,
    skipped: usize,
}

impl<R: BufRead> AddressStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_number: 0,
            skipped: 0,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for AddressStream<R> {
    type Item = io::Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;
            let line = match str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(_) => {
                    warn!(
                        "Skipping line {}: {}",
                        self.line_number,
                        MalformedAddress(String::from_utf8_lossy(&bytes).into_owned())
                    );
                    self.skipped += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                self.skipped += 1;
                continue;
            }
            match parse_address(line) {
                Ok(address) => return Some(Ok(address)),
                Err(e) => {
                    warn!("Skipping line {}: {}", self.line_number, e);
                    self.skipped += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str) -> (Vec<u32>, usize) {
        let mut stream = AddressStream::new(Cursor::new(input.to_string()));
        let addresses = stream.by_ref().map(|a| a.unwrap()).collect();
        (addresses, stream.skipped())
    }

    #[test]
    fn parse_lines() {
        assert_eq!(parse_address("16916"), Ok(16916));
        assert_eq!(parse_address(" 62493\r"), Ok(62493));
        assert_eq!(parse_address("4294967295"), Ok(u32::MAX));
        assert!(parse_address("4294967296").is_err());
        assert!(parse_address("-1").is_err());
        assert!(parse_address("0x10").is_err());
        assert_eq!(parse_address("abc"), Err(MalformedAddress("abc".to_string())));
    }

    #[test]
    fn zero_is_an_address() {
        let (addresses, skipped) = collect("0\n\n12\n");
        assert_eq!(addresses, vec![0, 12]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let (addresses, skipped) = collect("1\nnope\n  \n2\n3x\n3\n");
        assert_eq!(addresses, vec![1, 2, 3]);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn non_utf8_lines_are_skipped() {
        let mut stream = AddressStream::new(Cursor::new(b"1\n\xff\xfe\n2\r\n".to_vec()));
        let addresses: Vec<u32> = stream.by_ref().map(|a| a.unwrap()).collect();
        assert_eq!(addresses, vec![1, 2]);
        assert_eq!(stream.skipped(), 1);
    }

    #[test]
    fn empty_stream() {
        let (addresses, skipped) = collect("");
        assert!(addresses.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn missing_trailing_newline() {
        let (addresses, _) = collect("10\n20");
        assert_eq!(addresses, vec![10, 20]);
    }
}
