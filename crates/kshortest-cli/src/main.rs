use kshortest::graph::io::{read_graph, write_graph};
use kshortest::{Graph, Path, VertexId, YenKShortestPaths};
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const DEFAULT_K: usize = 10;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(kshortest::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<kshortest::Error> for CliError {
    fn from(value: kshortest::Error) -> Self {
        match value {
            kshortest::Error::Io(err) => Self::Io(err),
            other => Self::Graph(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Paths,
    Shortest,
    Stats,
    Export,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    source: Option<VertexId>,
    target: Option<VertexId>,
    k: usize,
    json: bool,
    pretty: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct PathsOut<'a> {
    source: VertexId,
    target: VertexId,
    k: usize,
    paths: &'a [Path],
}

#[derive(Serialize)]
struct ShortestOut<'a> {
    source: VertexId,
    target: VertexId,
    path: Option<&'a Path>,
}

#[derive(Serialize)]
struct StatsOut {
    vertices: usize,
    edges: usize,
}

fn usage() -> &'static str {
    "kshortest-cli\n\
\n\
USAGE:\n\
  kshortest-cli [paths] --source <id> --target <id> [-k <n>] [--json] [--pretty] [<path>|-]\n\
  kshortest-cli shortest --source <id> --target <id> [--json] [--pretty] [<path>|-]\n\
  kshortest-cli stats [--json] [--pretty] [<path>|-]\n\
  kshortest-cli export [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph is read from stdin.\n\
  - Graph files start with the vertex count, followed by one `from to weight` line per edge.\n\
  - paths prints up to k (default 10) loopless paths, lightest first, one per line.\n\
  - export prints the normalized graph to stdout unless --out is given.\n\
  - Set KSHORTEST_LOG (e.g. KSHORTEST_LOG=debug) to see search diagnostics on stderr.\n\
"
}

fn parse_vertex(value: Option<&String>) -> Result<VertexId, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value
        .parse::<VertexId>()
        .map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Paths,
        k: DEFAULT_K,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "paths" => args.command = Command::Paths,
            "shortest" => args.command = Command::Shortest,
            "stats" => args.command = Command::Stats,
            "export" => args.command = Command::Export,
            "--json" => args.json = true,
            "--pretty" => {
                args.json = true;
                args.pretty = true;
            }
            "--source" | "-s" => args.source = Some(parse_vertex(it.next())?),
            "--target" | "-t" => args.target = Some(parse_vertex(it.next())?),
            "-k" | "--k" => {
                let Some(k) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.k = k.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Paths | Command::Shortest)
        && (args.source.is_none() || args.target.is_none())
    {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn load_graph(input: Option<&str>) -> Result<Graph, CliError> {
    let graph = match input {
        None | Some("-") => read_graph(std::io::stdin().lock())?,
        Some(path) => Graph::from_file(path)?,
    };
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn endpoints(args: &Args) -> Result<(VertexId, VertexId), CliError> {
    match (args.source, args.target) {
        (Some(source), Some(target)) => Ok((source, target)),
        _ => Err(CliError::Usage(usage())),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let graph = load_graph(args.input.as_deref())?;

    match args.command {
        Command::Paths => {
            let (source, target) = endpoints(&args)?;
            let mut search = YenKShortestPaths::new(&graph);
            let found = search.shortest_paths(source, target, args.k)?.len();
            tracing::debug!(
                found,
                generated = search.generated_path_count(),
                "k-shortest-paths search finished"
            );
            let paths = search.results();

            if args.json {
                let out = PathsOut {
                    source,
                    target,
                    k: args.k,
                    paths,
                };
                write_json(&out, args.pretty)?;
            } else {
                let mut stdout = std::io::stdout().lock();
                for path in paths {
                    writeln!(stdout, "{path}")?;
                }
            }
            Ok(())
        }
        Command::Shortest => {
            let (source, target) = endpoints(&args)?;
            let search = YenKShortestPaths::new(&graph);
            let path = search.shortest_path(source, target)?;
            let found = (!path.is_empty()).then_some(&path);

            if args.json {
                let out = ShortestOut {
                    source,
                    target,
                    path: found,
                };
                write_json(&out, args.pretty)?;
            } else if let Some(path) = found {
                println!("{path}");
            } else {
                eprintln!("no path from {source} to {target}");
            }
            Ok(())
        }
        Command::Stats => {
            let out = StatsOut {
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
            };
            if args.json {
                write_json(&out, args.pretty)?;
            } else {
                println!("vertices\t{}", out.vertices);
                println!("edges\t{}", out.edges);
            }
            Ok(())
        }
        Command::Export => {
            match args.out.as_deref() {
                None | Some("-") => write_graph(&graph, std::io::stdout().lock())?,
                Some(path) => graph.export_to_file(path)?,
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("KSHORTEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
