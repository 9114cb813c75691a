use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use waypath;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] ParseError);

#[derive(Debug, thiserror::Error)]
enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {0}: {1}")]
    Syntax(usize, String),
}

#[derive(Parser)]
struct Cli {
    /// The path to the graph file
    graph_file: PathBuf,

    /// Start position, as a percentage (0-100) of the map width
    start_x: f32,

    /// Start position, as a percentage (0-100) of the map height
    start_y: f32,

    /// End position, as a percentage (0-100) of the map width
    end_x: f32,

    /// End position, as a percentage (0-100) of the map height
    end_y: f32,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = load_graph(&cli.graph_file)?;

    let planner = waypath::RoutePlanner::new(&g, (cli.start_x, cli.start_y), (cli.end_x, cli.end_y))?;
    let route = match planner.run() {
        Some(route) => route,
        None => {
            log::warn!("no route between the given positions");
            std::process::exit(1);
        }
    };

    log::info!("route length: {} units", route.distance);

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{\"distance\": {}}},", route.distance);

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = route.nodes.iter().peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.x, node.y, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_graph<P: AsRef<Path>>(path: P) -> Result<waypath::Graph, GraphLoadError> {
    let file = File::open(path.as_ref())
        .map_err(|e| GraphLoadError(path.as_ref().to_path_buf(), e.into()))?;
    parse_graph(BufReader::new(file))
        .map_err(|e| GraphLoadError(path.as_ref().to_path_buf(), e))
}

/// Parses a plain line-oriented graph description. Three directives are
/// supported, one per line: `scale S` (metric scale, defaults to 1),
/// `node X Y` (normalized position; ids are assigned in file order) and
/// `link A B` (undirected segment between two node ids). Blank lines and
/// lines starting with `#` are skipped.
fn parse_graph(reader: impl BufRead) -> Result<waypath::Graph, ParseError> {
    let mut scale = 1.0f32;
    let mut nodes: Vec<(f32, f32)> = Vec::new();
    let mut links: Vec<(usize, usize, usize)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("scale") => {
                scale = parse_field(&mut fields, line_no)?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(ParseError::Syntax(
                        line_no,
                        format!("scale must be positive, got {}", scale),
                    ));
                }
            }
            Some("node") => {
                let x = parse_field(&mut fields, line_no)?;
                let y = parse_field(&mut fields, line_no)?;
                if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) {
                    return Err(ParseError::Syntax(
                        line_no,
                        format!("node position out of [0, 1] range: {} {}", x, y),
                    ));
                }
                nodes.push((x, y));
            }
            Some("link") => {
                let a = parse_field(&mut fields, line_no)?;
                let b = parse_field(&mut fields, line_no)?;
                links.push((line_no, a, b));
            }
            Some(directive) => {
                return Err(ParseError::Syntax(
                    line_no,
                    format!("unknown directive: {}", directive),
                ));
            }
            None => unreachable!("empty lines are skipped"),
        }
    }

    let mut g = waypath::Graph::new(scale);
    for (x, y) in nodes {
        g.add_node(x, y);
    }
    for (line_no, a, b) in links {
        if a >= g.len() || b >= g.len() || a == b {
            return Err(ParseError::Syntax(
                line_no,
                format!("invalid link: {} {}", a, b),
            ));
        }
        g.add_link(a, b);
    }
    Ok(g)
}

fn parse_field<T: FromStr>(
    fields: &mut std::str::SplitWhitespace,
    line_no: usize,
) -> Result<T, ParseError> {
    fields
        .next()
        .ok_or_else(|| ParseError::Syntax(line_no, "missing field".to_string()))?
        .parse()
        .map_err(|_| ParseError::Syntax(line_no, "malformed field".to_string()))
}
