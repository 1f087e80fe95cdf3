//! # vcf-shards: partitioning a reference genome for parallel VCF processing.
//!
//! Processing a whole-genome VCF file in parallel requires splitting the genome into
//! units of work that are independent and roughly equal in size.
//! This crate partitions the contigs declared in a VCF header into N contiguous shards.
//! Each shard is an ordered sequence of genomic intervals, and the total length of
//! each shard is approximately `total_length / N` base pairs.
//!
//! ### Basic concepts
//!
//! A contig is a named reference sequence (e.g. a chromosome) with a fixed length.
//! Contigs are read from `##contig=<ID=...,length=...>` declarations in the VCF header,
//! and their declaration order determines the traversal order.
//!
//! The planner walks the contigs in order and fills one shard at a time.
//! A contig that does not fill the current shard is added to it in full, and the fill
//! continues from the next contig.
//! A contig with more bases available than the shard needs completes the shard, and
//! the next shard starts from the following position of the same contig.
//! The target shard length is `total_length / N` with integer division, and the final
//! shard absorbs the truncation remainder, so it can be up to N - 1 base pairs longer
//! than the others.
//!
//! Shards are written one per line as tab-separated fields.
//! Each interval contributes three fields: the contig name and the 1-based inclusive
//! start and end positions.
//!
//! See [`plan`] for the partitioning algorithm and its guarantees.
//! See [`Contig`], [`Interval`], and [`Shard`] for the related structures.

pub mod headers;
pub mod shards;
pub mod utils;

pub use headers::{Contig, read_contigs};
pub use shards::{Interval, Shard, plan, write_shard_plan};
