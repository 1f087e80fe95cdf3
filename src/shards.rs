//! Partitioning a genome into evenly-sized shards.
//!
//! This module provides the shard planner and the output format for shard plans.
//! [`plan`] partitions an ordered sequence of contigs into N shards of nearly equal
//! length with a single greedy pass.
//! [`write_shard_plan`] renders the result as one tab-separated line per shard.

use std::cmp;
use std::fmt::Display;
use std::io::{self, Write};
use std::mem;

use crate::headers::Contig;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// A closed genomic interval within a single contig.
///
/// Positions are 1-based and inclusive at both ends, as in VCF.
/// An interval always contains at least one base pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    /// Name of the contig.
    pub contig: String,
    /// Position of the first base in the interval.
    pub start: usize,
    /// Position of the last base in the interval (included).
    pub end: usize,
}

impl Interval {
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// May panic if `start < 1` or `start > end`.
    pub fn new(contig: &str, start: usize, end: usize) -> Self {
        debug_assert!(start >= 1 && start <= end, "Invalid interval {}:{}-{}", contig, start, end);
        Interval { contig: String::from(contig), start, end }
    }

    /// Returns the number of base pairs in the interval.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.contig, self.start, self.end)
    }
}

//-----------------------------------------------------------------------------

/// One unit of work: an ordered sequence of contiguous genomic intervals.
///
/// Successive intervals in a shard are adjacent in traversal order.
/// An interval either continues where the previous one ended or starts at the
/// first base of the next contig.
/// The [`Display`] implementation renders the shard in the output format: the
/// intervals concatenated with tabs, each contributing its contig name, start,
/// and end as three tab-separated fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shard {
    intervals: Vec<Interval>,
}

impl Shard {
    /// Returns the intervals in the shard.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns the total number of base pairs in the shard.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(|interval| interval.len()).sum()
    }

    /// Returns `true` if the shard contains no intervals.
    ///
    /// The planner never emits an empty shard.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Appends an interval to the shard.
    fn push(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }
}

impl Display for Shard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, "\t")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

//-----------------------------------------------------------------------------

/// Partitions the contigs into `n_shards` shards of nearly equal length.
///
/// The contigs are traversed in the given order, filling one shard at a time.
/// The target shard length is `total_length / n_shards` (integer division), and
/// the final shard absorbs the truncation remainder.
/// The concatenation of all intervals across all shards covers every base pair
/// of every contig exactly once, in contig order.
/// The function is pure: identical inputs always produce an identical plan.
///
/// Returns exactly `n_shards` shards, unless there are fewer base pairs than
/// shards, in which case every shard is a single base pair and only
/// `total_length` shards are produced.
/// Every shard's length is the target length, except the last shard, whose
/// length is `total_length - (n_shards - 1) * (total_length / n_shards)`.
///
/// Returns an error if `n_shards` is zero, if there are no contigs, or if a
/// contig has zero length.
///
/// # Examples
///
/// ```
/// use vcf_shards::{Contig, Interval, plan};
///
/// let contigs = vec![Contig::new("chr1", 10), Contig::new("chr2", 10)];
/// let shards = plan(&contigs, 2).unwrap();
/// assert_eq!(shards.len(), 2);
/// assert_eq!(shards[0].intervals(), &[Interval::new("chr1", 1, 10)]);
/// assert_eq!(shards[1].intervals(), &[Interval::new("chr2", 1, 10)]);
/// ```
pub fn plan(contigs: &[Contig], n_shards: usize) -> Result<Vec<Shard>, String> {
    if n_shards == 0 {
        return Err(String::from("The number of shards must be positive"));
    }
    if contigs.is_empty() {
        return Err(String::from("Cannot partition an empty set of contigs"));
    }
    for contig in contigs {
        if contig.length == 0 {
            return Err(format!("Contig {} has zero length", contig.name));
        }
    }

    let total_length: usize = contigs.iter().map(|contig| contig.length).sum();
    // Integer division truncates. With more shards than base pairs, the target
    // is clamped to one base and the planner runs out of genome early.
    let target = cmp::max(total_length / n_shards, 1);

    let mut shards: Vec<Shard> = Vec::with_capacity(n_shards);
    let mut current = Shard::default();
    // Base pairs still needed to complete the current shard.
    let mut remaining = target;
    // Base pairs assigned to emitted shards.
    let mut consumed = 0;

    for contig in contigs {
        let mut pos = 1;
        while pos <= contig.length {
            let available = contig.length - pos + 1;
            if available < remaining {
                // The rest of this contig does not complete the shard.
                current.push(Interval::new(&contig.name, pos, contig.length));
                remaining -= available;
                consumed += available;
                break;
            }
            // The shard completes within this contig.
            current.push(Interval::new(&contig.name, pos, pos + remaining - 1));
            consumed += remaining;
            pos += remaining;
            shards.push(mem::take(&mut current));
            remaining = if shards.len() == n_shards - 1 {
                // The final shard takes everything that is left.
                total_length - consumed
            } else {
                target
            };
        }
    }
    if !current.is_empty() {
        shards.push(current);
    }

    Ok(shards)
}

//-----------------------------------------------------------------------------

/// Writes the shard plan to the output, one line per shard.
///
/// Each line is the [`Display`] form of the shard followed by a newline.
/// Lines are written in shard order with no header and no trailing metadata.
pub fn write_shard_plan<W: Write>(shards: &[Shard], output: &mut W) -> io::Result<()> {
    for shard in shards {
        writeln!(output, "{}", shard)?;
    }
    Ok(())
}

//-----------------------------------------------------------------------------
