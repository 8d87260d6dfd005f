use std::{process, time::Duration};

use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use pidwait::{ProcessHandle, WaitOutcome};

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0: Process exited as expected.
  1: The specified <PID> was invalid or other errors occurred.
  2: The command-line invocation was faulty.
  124 (unless changed with --timeout-status): Timeout occurred.";

/// Wait for a foreign process to exit.
#[derive(Debug, Parser)]
#[command(version, about, after_help = EXIT_STATUS_HELP)]
struct Cli {
    /// Process ID to wait for
    pid: u32,

    /// Timeout in seconds; negative values wait indefinitely
    #[arg(
        short,
        long,
        default_value_t = -1.0,
        allow_negative_numbers = true,
        value_name = "SECONDS"
    )]
    timeout: f64,

    /// Exit status to report when the timeout occurs
    #[arg(short = 's', long, default_value_t = 124, value_name = "STATUS")]
    timeout_status: i32,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// The wait takes milliseconds; whole-millisecond resolution of the
/// user-supplied seconds is accurate enough.
fn timeout_from_secs(secs: f64) -> Option<Duration> {
    (secs >= 0.0).then(|| Duration::from_millis((secs * 1000.0) as u64))
}

fn run(cli: &Cli) -> i32 {
    info!("looking for process with pid {}", cli.pid);

    let handle = match ProcessHandle::acquire(cli.pid) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    info!("found process {}, handle acquired", cli.pid);

    match handle.wait(timeout_from_secs(cli.timeout)) {
        WaitOutcome::Exited => {
            info!("process exited as expected, exiting self");
            0
        }
        WaitOutcome::TimedOut => {
            info!("wait timed out, exiting with timeout status");
            cli.timeout_status
        }
        WaitOutcome::Failed(e) => {
            eprintln!("{e}");
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    process::exit(run(&cli));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_timeout_means_indefinite() {
        assert_eq!(timeout_from_secs(-1.0), None);
        assert_eq!(timeout_from_secs(-0.001), None);
    }

    #[test]
    fn timeout_converts_to_whole_milliseconds() {
        assert_eq!(timeout_from_secs(0.0), Some(Duration::ZERO));
        assert_eq!(timeout_from_secs(0.05), Some(Duration::from_millis(50)));
        assert_eq!(timeout_from_secs(2.5), Some(Duration::from_millis(2500)));
        // sub-millisecond precision is not promised
        assert_eq!(timeout_from_secs(0.0004), Some(Duration::ZERO));
    }

    #[test]
    fn cli_parses_like_the_usage_says() {
        let cli = Cli::parse_from(["pidwait", "-t", "1.5", "-s", "99", "-vv", "4242"]);
        assert_eq!(cli.pid, 4242);
        assert_eq!(cli.timeout, 1.5);
        assert_eq!(cli.timeout_status, 99);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["pidwait", "--timeout", "-1", "4242"]);
        assert_eq!(cli.timeout, -1.0);
        assert_eq!(cli.timeout_status, 124);
    }

    #[test]
    fn pid_argument_is_required() {
        assert!(Cli::try_parse_from(["pidwait"]).is_err());
    }
}
