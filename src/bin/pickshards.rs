use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;
use std::{env, process};

use vcf_shards::{headers, shards, utils};

use getopts::Options;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    let config = Config::new();

    // Read the contig declarations from the header.
    let mut reader = utils::open_file(&config.input_file)?;
    let contigs = headers::read_contigs(&mut reader)?;

    // Compute the full plan before writing anything, so that an error cannot
    // leave a truncated plan behind.
    let plan = shards::plan(&contigs, config.n_shards)?;

    if config.output_file.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut output = stdout.lock();
        shards::write_shard_plan(&plan, &mut output).map_err(|x| x.to_string())?;
    } else {
        let file = File::create(&config.output_file).map_err(|x| {
            format!("Failed to create {}: {}", config.output_file.display(), x)
        })?;
        let mut output = BufWriter::new(file);
        shards::write_shard_plan(&plan, &mut output).map_err(|x| x.to_string())?;
    }

    if config.progress {
        eprintln!("Partitioned {} contigs into {} shards", contigs.len(), plan.len());
        let end_time = Instant::now();
        let seconds = end_time.duration_since(start_time).as_secs_f64();
        eprintln!("Total time: {:.3} seconds", seconds);
    }

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    n_shards: usize,
    input_file: PathBuf,
    output_file: PathBuf,
    progress: bool,
}

impl Config {
    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();
        let header = format!("Usage: {} [options] <num_shards> input.vcf[.gz]", program);

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("o", "output", "output file name (default: stdout)", "FILE");
        opts.optflag("p", "progress", "print progress information to stderr");

        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        // Parse options.
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }
        let progress = matches.opt_present("p");
        let output_file = if let Some(o) = matches.opt_str("o") {
            PathBuf::from(o)
        } else {
            PathBuf::from("-") // Use stdout if no output file is specified
        };

        // Parse positional arguments.
        if matches.free.len() != 2 {
            eprintln!("Error: Expected 2 positional arguments (number of shards, input file)\n");
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }
        let n_shards = match matches.free[0].parse::<usize>() {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Error: Failed to parse the number of shards: {}", e);
                process::exit(1);
            }
        };
        let input_file = PathBuf::from(&matches.free[1]);

        // Validate options.
        if n_shards < 1 {
            eprintln!("Error: The number of shards must be positive");
            process::exit(1);
        }
        if !utils::file_exists(&input_file) {
            eprintln!("Error: Input file {} does not exist", input_file.display());
            process::exit(1);
        }

        Config {
            n_shards,
            input_file,
            output_file,
            progress,
        }
    }
}

//-----------------------------------------------------------------------------
