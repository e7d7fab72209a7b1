use std::collections::HashSet;
use std::io::Write;

use resgraph::model::ComponentSelectionReason;
use resgraph::resolution_result::*;
use resgraph::{ResgraphOptions, ResolutionResult};

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optflag( "v", "verbose",    "Increased verbosity");
		opts.optflag( "d", "dependents", "List the dependents of every component");
		opts.optflag( "f", "failures",   "List unresolved dependencies");
		opts.optflag( "",  "no-cache",   "Don't intern identical dependency results");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); std::process::exit(2) }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: resgraph-terminal EVENTS.json [options]"));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	let mut options = ResgraphOptions::default();
	options.set_cache_dependency_results(!parsed_options.opt_present("no-cache"));

	let report = Report {
		dependents: parsed_options.opt_present("d"),
		failures: parsed_options.opt_present("f"),
	};

	let path = match parsed_options.free.first() {
		Some(p) => std::path::PathBuf::from(p),
		None => { log::error!("Event file not provided."); std::process::exit(2) },
	};

	if let Err(e) = run(&path, &options, &report) {
		log::error!("Failed to build resolution result from {}: {}", path.display(), e);
		std::process::exit(1);
	}
}

/// Which sections to print after the tree.
struct Report {
	dependents: bool,
	failures: bool,
}

fn run(path: &std::path::Path, options: &ResgraphOptions, report: &Report) -> Result<(), Error> {
	log::trace!("Reading events from {}", path.display());
	let file = std::fs::File::open(path)?;
	let events = resgraph::events::ResolutionEvents::from_json_reader(std::io::BufReader::new(file))?;
	let result = events.replay(options)?;

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	write_tree(&mut out, &result)?;
	if report.dependents {
		writeln!(out)?;
		write_dependents(&mut out, &result)?;
	}
	if report.failures {
		writeln!(out)?;
		write_failures(&mut out, &result)?;
	}
	Ok(())
}

/// Prints the graph below the root. Subtrees already printed are marked `(*)`, constraints `(c)`.
fn write_tree(out: &mut impl Write, result: &ResolutionResult) -> std::io::Result<()> {
	fn write_children(out: &mut impl Write, component: ResolvedComponentResult, prefix: &str, printed: &mut HashSet<ComponentIndex>) -> std::io::Result<()> {
		let deps = component.dependencies();
		for (i, d) in deps.iter().enumerate() {
			let last = i + 1 == deps.len();
			let branch = if last { "\\--- " } else { "+--- " };
			let constraint = if d.is_constraint() { " (c)" } else { "" };

			match d.selected() {
				Some(selected) => {
					let version = &selected.module_version().version;
					let requested = d.requested().to_string();
					let shown = if requested.ends_with(&format!(":{}", version)) { requested } else { format!("{} -> {}", requested, version) };

					if d.is_constraint() || !printed.insert(selected.index()) {
						let repeat = if d.is_constraint() || selected.dependencies().is_empty() { "" } else { " (*)" };
						writeln!(out, "{}{}{}{}{}", prefix, branch, shown, constraint, repeat)?;
					} else {
						writeln!(out, "{}{}{}{}", prefix, branch, shown, constraint)?;
						let child_prefix = format!("{}{}", prefix, if last { "     " } else { "|    " });
						write_children(out, selected, &child_prefix, printed)?;
					}
				},
				None => writeln!(out, "{}{}{}{} FAILED", prefix, branch, d.requested(), constraint)?,
			}
		}
		Ok(())
	}

	let root = result.root();
	writeln!(out, "{} ({})", root, root.selection_reason())?;
	let mut printed = HashSet::new();
	printed.insert(root.index());
	write_children(out, root, "", &mut printed)
}

fn write_dependents(out: &mut impl Write, result: &ResolutionResult) -> std::io::Result<()> {
	writeln!(out, "Dependents:")?;
	for component in result.all_components() {
		let dependents = component.dependents();
		if dependents.is_empty() { continue; }
		writeln!(out, "{}", component.module_version())?;
		for d in dependents {
			writeln!(out, "\t<- {} (requested {})", d.from(), d.requested())?;
		}
	}
	Ok(())
}

fn write_failures(out: &mut impl Write, result: &ResolutionResult) -> std::io::Result<()> {
	let (locking, genuine) = result.unresolved_dependencies().into_iter()
		.partition::<Vec<DependencyResultRef>, _>(|d: &DependencyResultRef| d.selection_reason().is_some_and(ComponentSelectionReason::is_dependency_locking));

	writeln!(out, "Unresolved dependencies: {}", genuine.len())?;
	for d in genuine {
		writeln!(out, "\t{} from {}", d.requested(), d.from())?;
		if let Some(failure) = d.failure() {
			for cause in failure.chain() {
				writeln!(out, "\t\t{}", cause)?;
			}
		}
	}
	writeln!(out, "Lock state out of date: {}", locking.len())?;
	for d in locking {
		writeln!(out, "\t{}", d.requested())?;
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("resgraph error: {0}")]
	Resgraph(#[from] resgraph::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}
