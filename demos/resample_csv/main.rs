use clap::Parser;
use regrid::{GridOptions, Point, Regrid, Resampler, Stage, pipe, skip_missing};
use spdlog::prelude::*;
use spdlog::sink::{StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Resamples `value,timestamp` lines onto a fixed grid and prints
/// `timestamp,value` lines, with NaN marking empty slots.
#[derive(Parser)]
struct Args {
    /// Input file; reads stdin when omitted
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    from: u32,
    #[arg(long)]
    to: u32,
    #[arg(long)]
    interval: u32,
    /// Use the streaming stage instead of the batch pass (input must be sorted)
    #[arg(long)]
    stream: bool,
    /// Ignore NaN readings instead of letting them claim a slot
    #[arg(long)]
    skip_missing: bool,
    #[arg(long, short)]
    verbose: bool,
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<Point>, Box<dyn std::error::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (value, timestamp) = line
        .split_once(',')
        .ok_or_else(|| format!("line {}: expected `value,timestamp`", line_no))?;
    let value: f64 = value.trim().parse()?;
    let timestamp: u32 = timestamp.trim().parse()?;
    Ok(Some(Point::new(value, timestamp)))
}

fn read_points(reader: impl BufRead) -> Result<Vec<Point>, Box<dyn std::error::Error>> {
    let mut points = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(point) = parse_line(&line?, idx + 1)? {
            points.push(point);
        }
    }
    Ok(points)
}

/// Logs go to stderr; stdout carries only the resampled series.
fn stderr_logger(verbose: bool) -> Result<Logger, spdlog::Error> {
    let sink = StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .build()?;
    let logger = Logger::builder().sink(Arc::new(sink)).build()?;
    if verbose {
        logger.set_level_filter(LevelFilter::All);
    }
    Ok(logger)
}

fn write_points(mut out: impl Write, points: &[Point]) -> io::Result<()> {
    for point in points {
        writeln!(out, "{},{}", point.timestamp, point.value)?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    spdlog::set_default_logger(Arc::new(stderr_logger(args.verbose)?));

    let input = match &args.file {
        Some(path) => read_points(BufReader::new(File::open(path)?))?,
        None => read_points(io::stdin().lock())?,
    };
    info!("[Resample] Read {} points", input.len());

    let options = GridOptions {
        from: args.from,
        to: args.to,
        interval: args.interval,
    };

    let output = if args.stream {
        let regrid = Regrid::new(options)?;
        let mut out = Vec::new();
        let mut collect = |p: &Point| out.push(*p);
        if args.skip_missing {
            let mut stage = pipe![skip_missing(), regrid];
            input.iter().for_each(|p| stage.process(p, &mut collect));
            stage.finish(&mut collect);
        } else {
            let mut stage = regrid;
            input.iter().for_each(|p| stage.process(p, &mut collect));
            stage.finish(&mut collect);
        }
        out
    } else {
        let resampler = Resampler::new(options)?;
        if args.skip_missing {
            let present: Vec<Point> = input.into_iter().filter(|p| !p.is_missing()).collect();
            resampler.resample(&present)
        } else {
            resampler.resample(&input)
        }
    };

    let gaps = output.iter().filter(|p| p.is_missing()).count();
    info!("[Resample] Wrote {} slots, {} gaps", output.len(), gaps);

    write_points(BufWriter::new(io::stdout().lock()), &output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_only_csv() {
        spdlog::set_default_logger(Arc::new(stderr_logger(true).unwrap()));
        info!("[Resample] this line must not reach the output");

        let mut buf = Vec::new();
        write_points(&mut buf, &[Point::missing(90), Point::new(0.5, 100)]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "90,NaN\n100,0.5\n");
    }

    #[test]
    fn test_stderr_logger_levels() {
        let quiet = stderr_logger(false).unwrap();
        assert!(!quiet.should_log(Level::Debug));
        assert!(quiet.should_log(Level::Info));

        let verbose = stderr_logger(true).unwrap();
        assert!(verbose.should_log(Level::Trace));
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("0.5,100", 1).unwrap(), Some(Point::new(0.5, 100)));
        assert_eq!(parse_line(" 41.3 , 110 ", 2).unwrap(), Some(Point::new(41.3, 110)));
        assert_eq!(parse_line("# comment", 3).unwrap(), None);
        assert_eq!(parse_line("", 4).unwrap(), None);
        assert!(parse_line("0.5;100", 5).is_err());
    }
}
