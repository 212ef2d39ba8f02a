use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Common interface of the text readers in this module.
///
/// Implementors parse one complete file from a buffered reader into `Output`,
/// steered by format-specific `Options`.
pub trait FormatReader {
    /// The value produced by a successful read.
    type Output;

    /// Format-specific parsing options.
    type Options;

    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// Reads one file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content violates the format.
    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Self::Output, Self::Error>;

    /// Reads one file from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &Self::Options,
    ) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, options)
    }
}
