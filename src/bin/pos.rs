//! Command-line interface for pos
//! This binary inspects pos trajectory files: it builds the repaired
//! structural index and extracts dense arrays from either frame stream.
//!
//! Usage:
//!   pos index `<path>` [--format `<format>`]                    - Print the structural index
//!   pos dump `<path>` [--stream `<stream>`] [--format `<format>`] - Extract and print a dense array

use clap::{Arg, Command};
use serde::Serialize;

use pos::pos::extraction::{DenseArray, FrameError};
use pos::pos::file::PosFile;
use pos::pos::indexing::FrameIndex;

fn main() {
    let matches = Command::new("pos")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting pos trajectory files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("index")
                .about("Build and print the structural index of a pos file")
                .arg(
                    Arg::new("path")
                        .help("Path to the pos file")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Extract one frame stream into a dense array and print it")
                .arg(
                    Arg::new("path")
                        .help("Path to the pos file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("stream")
                        .long("stream")
                        .short('s')
                        .help("Which frame stream to extract ('data' or 'box')")
                        .default_value("data"),
                )
                .arg(format_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("index", index_matches)) => {
            let path = index_matches.get_one::<String>("path").unwrap();
            let format = index_matches.get_one::<String>("format").unwrap();
            handle_index_command(path, format);
        }
        Some(("dump", dump_matches)) => {
            let path = dump_matches.get_one::<String>("path").unwrap();
            let stream = dump_matches.get_one::<String>("stream").unwrap();
            let format = dump_matches.get_one::<String>("format").unwrap();
            handle_dump_command(path, stream, format);
        }
        _ => unreachable!(),
    }
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format ('text', 'json', 'yaml')")
        .default_value("text")
}

fn open_file(path: &str) -> PosFile {
    PosFile::from_path(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

#[derive(Serialize)]
struct IndexReport<'a> {
    path: &'a str,
    index: &'a FrameIndex,
}

/// Handle the index command
fn handle_index_command(path: &str, format: &str) {
    let file = open_file(path);
    let report = IndexReport {
        path,
        index: file.index(),
    };

    match format {
        "json" => print_json(&report),
        "yaml" => print_yaml(&report),
        "text" => print_index_text(&report),
        other => unknown_format(other),
    }
}

fn print_index_text(report: &IndexReport) {
    let index = report.index;
    let raw = index.raw_counts();

    println!("file: {}", report.path);
    println!(
        "data frames: {} (raw: {} opens / {} dones, {} pruned)",
        index.ndata(),
        raw.data_opens,
        raw.dones,
        index.data_repair().opens_removed,
    );
    for (i, frame) in index.data_frames().iter().enumerate() {
        println!(
            "  data {}: bytes {}..{}  dims {} [{}]",
            i,
            frame.open,
            frame.close,
            frame.dim_count,
            frame.labels.join(" "),
        );
    }
    println!(
        "box frames: {} (raw: {} opens / {} eofs, {} pruned)",
        index.nbox(),
        raw.box_opens,
        raw.eofs,
        index.box_repair().opens_removed,
    );
    for (i, frame) in index.box_frames().iter().enumerate() {
        println!(
            "  box {}: bytes {}..{}  dims {} [{}]  defs {}",
            i,
            frame.open,
            frame.close,
            frame.dim_count,
            frame.labels.join(" "),
            frame.def_count,
        );
    }
    for diagnostic in index.diagnostics() {
        println!("diagnostic: {:?}", diagnostic);
    }
}

#[derive(Serialize)]
struct DumpReport<'a> {
    path: &'a str,
    stream: &'a str,
    shape: (usize, usize, usize),
    point_counts: &'a [usize],
    frame_errors: &'a [FrameError],
    array: &'a DenseArray,
}

/// Handle the dump command
fn handle_dump_command(path: &str, stream: &str, format: &str) {
    let file = open_file(path);

    let (array, point_counts, frame_errors) = match stream {
        "data" => {
            let grab = file.grab_data().unwrap_or_else(extraction_failed);
            (grab.array, grab.point_counts, grab.frame_errors)
        }
        "box" => {
            let grab = file.grab_box().unwrap_or_else(extraction_failed);
            (grab.array, grab.point_counts, grab.frame_errors)
        }
        other => {
            eprintln!("Unknown stream '{}' (expected 'data' or 'box')", other);
            std::process::exit(1);
        }
    };

    let report = DumpReport {
        path,
        stream,
        shape: array.shape(),
        point_counts: &point_counts,
        frame_errors: &frame_errors,
        array: &array,
    };

    match format {
        "json" => print_json(&report),
        "yaml" => print_yaml(&report),
        "text" => print_dump_text(&report),
        other => unknown_format(other),
    }
}

fn print_dump_text(report: &DumpReport) {
    let (frames, max_points, max_dims) = report.shape;
    println!(
        "{} array: {} frames x {} points x {} dims",
        report.stream, frames, max_points, max_dims
    );
    for frame in 0..frames {
        println!("frame {} ({} points):", frame, report.point_counts[frame]);
        for point in 0..report.point_counts[frame] {
            let row: Vec<String> = (0..max_dims)
                .map(|dim| report.array.get(frame, point, dim).to_string())
                .collect();
            println!("  {}", row.join(" "));
        }
    }
    for error in report.frame_errors {
        println!("error: {}", error);
    }
}

fn extraction_failed<T>(err: pos::pos::file::PosError) -> T {
    eprintln!("Extraction error: {}", err);
    std::process::exit(1);
}

fn print_json<T: Serialize>(report: &T) {
    match serde_json::to_string_pretty(report) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_yaml<T: Serialize>(report: &T) {
    match serde_yaml::to_string(report) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }
}

fn unknown_format(format: &str) -> ! {
    eprintln!("Unknown format '{}' (expected 'text', 'json', 'yaml')", format);
    std::process::exit(1);
}
