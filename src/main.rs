//! twenty48 -- plays 2048 automatically.
//!
//! Plays one or more games with the selected strategy, either on a local
//! board or on one kept by a remote server, and prints the high score and
//! optional average as it goes.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use env_logger::Env;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use twenty48::cli::{self, CliError};
use twenty48::game::LocalBoard;
use twenty48::protocol::RemoteSource;
use twenty48::session::{run_session, SessionError};

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = cli::program_name(args.first().map(String::as_str));

    let config = match cli::parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            if !matches!(e, CliError::Help { .. }) {
                println!("{}: {}", program, e);
            }
            println!("{}", cli::usage(&program));
            process::exit(e.exit_status());
        }
    };

    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut records = match &config.record {
        Some(path) => match File::create(path) {
            Ok(f) => Some(BufWriter::new(f)),
            Err(e) => {
                eprintln!("{}: cannot create {}: {}", program, path.display(), e);
                process::exit(1);
            }
        },
        None => None,
    };
    let record_sink = records.as_mut().map(|w| w as &mut dyn Write);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &config.server {
        Some(address) => {
            let mut source = RemoteSource::new(address.as_str(), config.timeout);
            let result = run_session(&config, &mut source, &mut rng, &mut out, record_sink);
            if let Err(SessionError::Remote(e)) = &result {
                let _ = writeln!(out, "failure to communicate {}: {}", source.address(), e);
                let _ = out.flush();
                process::exit(-1);
            }
            result
        }
        None => run_session(&config, &mut LocalBoard, &mut rng, &mut out, record_sink),
    };

    match result {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}: {}", program, e);
            process::exit(1);
        }
    }
}
