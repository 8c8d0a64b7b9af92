use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use depgraph::cli::{Cli, Commands};
use depgraph::{
    read_document, write_document, CycleDetector, Depth, Lcom4Gatherer, LinkMinimizer,
    MetricsGatherer, NodeFactory, NodeKind, RegularExpressionSelectionCriteria, TransitiveClosure,
    Visitor,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Closure {
            path,
            start,
            stop,
            inbound_depth,
            outbound_depth,
            unbounded,
        } => closure(
            &path,
            &start,
            stop.as_deref(),
            inbound_depth,
            outbound_depth,
            unbounded,
        ),
        Commands::Metrics { path } => metrics(&path),
        Commands::Cohesion { path, filter } => cohesion(&path, filter.as_deref()),
        Commands::Cycles { path, max_length } => cycles(&path, max_length),
        Commands::Minimize { path, output } => minimize(&path, output),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_graph(path: &Path) -> Result<NodeFactory> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let factory = read_document(&xml)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(factory)
}

fn closure(
    path: &Path,
    start: &str,
    stop: Option<&str>,
    inbound_depth: Option<usize>,
    outbound_depth: Option<usize>,
    unbounded: bool,
) -> Result<()> {
    let graph = load_graph(path)?;

    let start_criteria = RegularExpressionSelectionCriteria::from_pattern(start)
        .context("invalid start pattern")?;
    let stop_criteria = match stop {
        Some(pattern) => RegularExpressionSelectionCriteria::from_pattern(pattern)
            .context("invalid stop pattern")?,
        None => {
            let mut criteria = RegularExpressionSelectionCriteria::new();
            criteria
                .set_global_includes(Vec::<&str>::new())
                .expect("empty include list");
            criteria
        }
    };

    let mut closure = TransitiveClosure::new(Box::new(start_criteria), Box::new(stop_criteria));
    let depth = |hops: Option<usize>| match hops {
        _ if unbounded => Depth::Unbounded,
        Some(hops) => Depth::Limit(hops),
        None => Depth::DoNotFollow,
    };
    closure.set_maximum_inbound_depth(depth(inbound_depth));
    closure.set_maximum_outbound_depth(depth(outbound_depth));
    closure.traverse_nodes(&graph, &graph.package_keys());

    for node in closure.factory().nodes() {
        println!("{} {}", node.kind().label(), node.name());
    }
    Ok(())
}

fn metrics(path: &Path) -> Result<()> {
    let graph = load_graph(path)?;
    let mut gatherer = MetricsGatherer::new();
    gatherer.traverse_nodes(&graph, &graph.package_keys());

    println!(
        "packages: {} ({} confirmed)",
        gatherer.nb_packages(),
        gatherer.nb_confirmed_packages()
    );
    println!(
        "classes:  {} ({} confirmed)",
        gatherer.nb_classes(),
        gatherer.nb_confirmed_classes()
    );
    println!(
        "features: {} ({} confirmed)",
        gatherer.nb_features(),
        gatherer.nb_confirmed_features()
    );
    for kind in [NodeKind::Package, NodeKind::Class, NodeKind::Feature] {
        println!(
            "{} edges: {} inbound, {} outbound",
            kind.label(),
            gatherer.nb_inbound(kind),
            gatherer.nb_outbound(kind)
        );
    }
    Ok(())
}

fn cohesion(path: &Path, filter: Option<&str>) -> Result<()> {
    let graph = load_graph(path)?;
    let filter = filter
        .map(regex::Regex::new)
        .transpose()
        .context("invalid filter pattern")?;

    let mut gatherer = Lcom4Gatherer::new();
    gatherer.traverse_nodes(&graph, &graph.package_keys());
    for (class, components) in gatherer.results() {
        if filter.as_ref().is_some_and(|re| !re.is_match(class)) {
            continue;
        }
        println!("{class}: LCOM4 = {}", components.len());
    }
    Ok(())
}

fn cycles(path: &Path, max_length: Option<usize>) -> Result<()> {
    let graph = load_graph(path)?;
    let mut detector = match max_length {
        Some(length) => CycleDetector::with_maximum_length(length),
        None => CycleDetector::new(),
    };
    detector.traverse(&graph);

    for cycle in detector.cycles() {
        let names: Vec<&str> = cycle.path().iter().map(|key| key.name.as_str()).collect();
        println!("{}", names.join(" -> "));
    }
    println!("{} cycle(s)", detector.cycles().len());
    Ok(())
}

fn minimize(path: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut graph = load_graph(path)?;
    LinkMinimizer::new().traverse(&mut graph);
    let xml = write_document(&graph);
    match output {
        Some(out) => fs::write(&out, xml)
            .with_context(|| format!("failed to write {}", out.display()))?,
        None => print!("{xml}"),
    }
    Ok(())
}
