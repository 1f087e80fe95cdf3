use super::*;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

//-----------------------------------------------------------------------------

fn contig_set(contigs: &[(&str, usize)]) -> Vec<Contig> {
    contigs.iter().map(|(name, length)| Contig::new(name, *length)).collect()
}

// Checks that the intervals across all shards tile every contig exactly once,
// in declaration order.
fn check_tiling(contigs: &[Contig], shards: &[Shard]) {
    let mut contig_iter = contigs.iter();
    let mut contig = contig_iter.next().unwrap();
    let mut pos = 1;
    for (i, shard) in shards.iter().enumerate() {
        assert!(!shard.is_empty(), "Shard {} is empty", i);
        for interval in shard.intervals() {
            if pos > contig.length {
                contig = contig_iter.next().expect("The plan extends past the last contig");
                pos = 1;
            }
            assert_eq!(interval.contig, contig.name, "Wrong contig in shard {}", i);
            assert_eq!(interval.start, pos, "Wrong start position in shard {}", i);
            assert!(interval.end <= contig.length, "Interval past the contig end in shard {}", i);
            pos = interval.end + 1;
        }
    }
    assert_eq!(pos, contig.length + 1, "The plan does not cover the last contig");
    assert!(contig_iter.next().is_none(), "The plan does not cover every contig");
}

// Checks that every shard has the target length, except the last one, which
// absorbs the truncation remainder.
fn check_shard_lengths(shards: &[Shard], total_length: usize, n_shards: usize) {
    let target = total_length / n_shards;
    for (i, shard) in shards.iter().enumerate() {
        if i + 1 < shards.len() {
            assert_eq!(shard.len(), target, "Wrong length for shard {}", i);
        } else {
            assert_eq!(
                shard.len(), total_length - (n_shards - 1) * target,
                "Wrong length for the final shard"
            );
        }
    }
}

//-----------------------------------------------------------------------------

// Scenarios with known plans.

#[test]
fn even_split_across_contigs() {
    let contigs = contig_set(&[("chr1", 10), ("chr2", 10)]);
    let shards = plan(&contigs, 2).unwrap();
    assert_eq!(shards.len(), 2, "Wrong number of shards");
    assert_eq!(shards[0].intervals(), &[Interval::new("chr1", 1, 10)], "Wrong first shard");
    assert_eq!(shards[1].intervals(), &[Interval::new("chr2", 1, 10)], "Wrong second shard");
}

#[test]
fn last_shard_absorbs_remainder() {
    let contigs = contig_set(&[("chr1", 15)]);
    let shards = plan(&contigs, 2).unwrap();
    assert_eq!(shards.len(), 2, "Wrong number of shards");
    assert_eq!(shards[0].intervals(), &[Interval::new("chr1", 1, 7)], "Wrong first shard");
    assert_eq!(shards[1].intervals(), &[Interval::new("chr1", 8, 15)], "Wrong second shard");
}

#[test]
fn single_shard_contains_everything() {
    let contigs = contig_set(&[("chr1", 15), ("chr2", 10), ("chrM", 7)]);
    let shards = plan(&contigs, 1).unwrap();
    assert_eq!(shards.len(), 1, "Wrong number of shards");
    let correct = [
        Interval::new("chr1", 1, 15),
        Interval::new("chr2", 1, 10),
        Interval::new("chrM", 1, 7),
    ];
    assert_eq!(shards[0].intervals(), &correct, "The single shard should cover every contig in full");
}

#[test]
fn shard_spanning_contigs() {
    // total_length = 40, target = 20: the first shard takes chr1 and chr2 in
    // full and ends exactly at the end of chr2.
    let contigs = contig_set(&[("chr1", 10), ("chr2", 10), ("chr3", 20)]);
    let shards = plan(&contigs, 2).unwrap();
    assert_eq!(shards.len(), 2, "Wrong number of shards");
    let correct = [Interval::new("chr1", 1, 10), Interval::new("chr2", 1, 10)];
    assert_eq!(shards[0].intervals(), &correct, "Wrong first shard");
    assert_eq!(shards[1].intervals(), &[Interval::new("chr3", 1, 20)], "Wrong second shard");
}

#[test]
fn contig_spanning_shards() {
    let contigs = contig_set(&[("chr1", 100)]);
    let shards = plan(&contigs, 4).unwrap();
    assert_eq!(shards.len(), 4, "Wrong number of shards");
    let correct = [
        Interval::new("chr1", 1, 25),
        Interval::new("chr1", 26, 50),
        Interval::new("chr1", 51, 75),
        Interval::new("chr1", 76, 100),
    ];
    for (shard, interval) in shards.iter().zip(correct.iter()) {
        assert_eq!(shard.intervals(), std::slice::from_ref(interval), "Wrong shard boundaries");
    }
}

#[test]
fn exact_boundary_at_contig_end() {
    // A contig of exactly the remaining length completes the shard at its last
    // base, and the next shard starts at the first base of the next contig.
    let contigs = contig_set(&[("chr1", 6), ("chr2", 4), ("chr3", 10)]);
    let shards = plan(&contigs, 2).unwrap();
    assert_eq!(shards.len(), 2, "Wrong number of shards");
    assert_eq!(
        shards[0].intervals().last(), Some(&Interval::new("chr2", 1, 4)),
        "The first shard should end at the last base of chr2"
    );
    assert_eq!(
        shards[1].intervals().first(), Some(&Interval::new("chr3", 1, 10)),
        "The second shard should start at the first base of chr3"
    );
}

#[test]
fn more_shards_than_bases() {
    // With fewer base pairs than shards, every shard is a single base pair and
    // the plan runs out after total_length shards.
    let contigs = contig_set(&[("chrM", 3)]);
    let shards = plan(&contigs, 5).unwrap();
    assert_eq!(shards.len(), 3, "Expected one shard per base pair");
    for (i, shard) in shards.iter().enumerate() {
        assert_eq!(shard.intervals(), &[Interval::new("chrM", i + 1, i + 1)], "Wrong shard {}", i);
    }
}

//-----------------------------------------------------------------------------

// Properties of the plan.

#[test]
fn shard_lengths() {
    let contigs = contig_set(&[("chr1", 37), ("chr2", 29), ("chr3", 21), ("chr4", 16)]);
    let total_length = 103;
    for n_shards in 1..=10 {
        let shards = plan(&contigs, n_shards).unwrap();
        assert_eq!(shards.len(), n_shards, "Wrong number of shards for n = {}", n_shards);
        check_shard_lengths(&shards, total_length, n_shards);
        check_tiling(&contigs, &shards);
    }
}

#[test]
fn random_contig_sets() {
    let mut rng = StdRng::seed_from_u64(0x12345678);
    for _ in 0..20 {
        let num_contigs = rng.gen_range(1..8);
        let contigs: Vec<Contig> = (0..num_contigs)
            .map(|i| Contig::new(&format!("chr{}", i + 1), rng.gen_range(1..500)))
            .collect();
        let total_length: usize = contigs.iter().map(|contig| contig.length).sum();
        let n_shards = rng.gen_range(1..20);

        let shards = plan(&contigs, n_shards).unwrap();
        check_tiling(&contigs, &shards);
        if total_length >= n_shards {
            assert_eq!(
                shards.len(), n_shards,
                "Wrong number of shards for {} contigs of total length {}", num_contigs, total_length
            );
            check_shard_lengths(&shards, total_length, n_shards);
        } else {
            assert_eq!(
                shards.len(), total_length,
                "Expected one shard per base pair when shards outnumber bases"
            );
        }
    }
}

#[test]
fn deterministic_plan() {
    let contigs = contig_set(&[("chr1", 123), ("chr2", 456), ("chr3", 789)]);
    let first = plan(&contigs, 7).unwrap();
    let second = plan(&contigs, 7).unwrap();
    assert_eq!(first, second, "The planner is not deterministic");
}

//-----------------------------------------------------------------------------

// Error conditions.

#[test]
fn invalid_inputs() {
    let contigs = contig_set(&[("chr1", 10)]);
    assert!(plan(&contigs, 0).is_err(), "Accepted zero shards");
    assert!(plan(&[], 2).is_err(), "Accepted an empty contig set");

    let zero_length = vec![Contig::new("chr1", 10), Contig::new("chr2", 0)];
    assert!(plan(&zero_length, 2).is_err(), "Accepted a zero-length contig");
}

//-----------------------------------------------------------------------------

// Output format.

#[test]
fn interval_format() {
    let interval = Interval::new("chr1", 8, 15);
    assert_eq!(interval.to_string(), "chr1\t8\t15", "Wrong interval format");
    assert_eq!(interval.len(), 8, "Wrong interval length");
}

#[test]
fn shard_plan_format() {
    let contigs = contig_set(&[("chr1", 10), ("chr2", 5), ("chr3", 15)]);
    let shards = plan(&contigs, 2).unwrap();

    let mut output: Vec<u8> = Vec::new();
    write_shard_plan(&shards, &mut output).unwrap();
    let correct = b"chr1\t1\t10\tchr2\t1\t5\nchr3\t1\t15\n";
    assert_eq!(&output, correct, "Wrong shard plan output");
}

//-----------------------------------------------------------------------------
