//! Support for reading contig declarations from VCF headers.
//!
//! A VCF header consists of the lines at the start of the file that begin with `#`.
//! Contig declarations are header lines of the form:
//!
//! ```text
//! ##contig=<ID=chr1,length=248956422>
//! ```
//!
//! The contig name is everything between `ID=` and the first comma, and the length
//! is a positive decimal integer terminated by `>`.
//! A single optional space is accepted before `length=`.
//! Anything after the closing `>` is ignored.
//!
//! [`read_contigs`] consumes the header lines from a reader and returns the declared
//! contigs in declaration order.
//! The first non-header line is left in the reader for whoever reads the body.

use std::collections::HashSet;
use std::io::{self, BufRead};


//-----------------------------------------------------------------------------

/// Header lines start with this character.
const HEADER_MARKER: u8 = b'#';

/// Prefix of a contig declaration line.
const CONTIG_PREFIX: &str = "##contig=";

/// Prefix of a contig declaration line up to the contig name.
const CONTIG_ID_PREFIX: &str = "##contig=<ID=";

//-----------------------------------------------------------------------------

/// A named reference sequence with a fixed length in base pairs.
///
/// Positions on a contig are 1-based, so the valid positions are `1..=length`.
///
/// # Examples
///
/// ```
/// use vcf_shards::Contig;
///
/// let line = "##contig=<ID=chr1,length=248956422>";
/// let contig = Contig::parse(line);
/// assert_eq!(contig, Ok(Contig { name: String::from("chr1"), length: 248956422 }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contig {
    /// Name of the contig, as declared in the header.
    pub name: String,
    /// Length of the contig in base pairs.
    pub length: usize,
}

impl Contig {
    /// Creates a new contig with the given name and length.
    pub fn new(name: &str, length: usize) -> Self {
        Contig { name: String::from(name), length }
    }

    /// Parses a contig declaration line.
    ///
    /// The accepted grammar is `##contig=<ID=` *name* `,` *space?* `length=` *digits* `>` *rest*,
    /// where *name* is non-empty and contains no comma, *space?* is at most one space,
    /// and *digits* is a positive decimal integer.
    /// Returns a descriptive error naming the offending line if the grammar does not match.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fail = |reason: &str| Err(format!("Invalid contig line ({}): {}", reason, line));

        let rest = match line.strip_prefix(CONTIG_ID_PREFIX) {
            Some(rest) => rest,
            None => return fail("expected ##contig=<ID="),
        };
        let (name, rest) = match rest.split_once(',') {
            Some(parts) => parts,
            None => return fail("no comma after the contig name"),
        };
        if name.is_empty() {
            return fail("empty contig name");
        }
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let rest = match rest.strip_prefix("length=") {
            Some(rest) => rest,
            None => return fail("expected length= after the contig name"),
        };
        let (digits, _) = match rest.split_once('>') {
            Some(parts) => parts,
            None => return fail("unterminated declaration"),
        };
        let length = match digits.parse::<usize>() {
            Ok(length) => length,
            Err(_) => return fail("length is not a decimal integer"),
        };
        if length == 0 {
            return fail("length must be positive");
        }

        Ok(Contig { name: String::from(name), length })
    }
}

//-----------------------------------------------------------------------------

/// Returns `true` if the next unread line in the reader is a header line.
///
/// Does not consume anything from the reader.
fn peek_header_line<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let buf = reader.fill_buf()?;
    Ok(!buf.is_empty() && buf[0] == HEADER_MARKER)
}

/// Reads the header lines from the reader and returns the declared contigs.
///
/// Contigs are returned in declaration order, which is also the traversal order
/// for [`crate::plan`].
/// The header ends at the first line that does not start with `#`; that line is
/// not consumed.
/// Returns an error if a `##contig=` line does not match the expected grammar
/// (see [`Contig::parse`]) or if a contig name is declared twice.
///
/// # Examples
///
/// ```
/// use vcf_shards::{Contig, read_contigs};
///
/// let header = concat!(
///     "##fileformat=VCFv4.2\n",
///     "##contig=<ID=chr1,length=100>\n",
///     "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n",
///     "chr1\t1\t.\tA\tT\t50\tPASS\t.\n");
/// let mut reader = header.as_bytes();
/// let contigs = read_contigs(&mut reader).unwrap();
/// assert_eq!(contigs, vec![Contig::new("chr1", 100)]);
/// ```
pub fn read_contigs<R: BufRead>(reader: &mut R) -> Result<Vec<Contig>, String> {
    let mut contigs: Vec<Contig> = Vec::new();
    let mut names: HashSet<String> = HashSet::new();

    while peek_header_line(reader).map_err(|x| x.to_string())? {
        let mut line: Vec<u8> = Vec::new();
        let bytes_read = reader.read_until(b'\n', &mut line).map_err(|x| x.to_string())?;
        if bytes_read == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        let line = String::from_utf8_lossy(&line);
        if line.starts_with(CONTIG_PREFIX) {
            let contig = Contig::parse(&line)?;
            if !names.insert(contig.name.clone()) {
                return Err(format!("Contig {} is declared twice", contig.name));
            }
            contigs.push(contig);
        }
    }

    Ok(contigs)
}

//-----------------------------------------------------------------------------
