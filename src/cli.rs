//! Command-line interface for swiftfacts.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use walkdir::WalkDir;

use crate::analysis::{
    ConformanceExtractor, FactExtractor, ImportExtractor, InitializerExtractor, PropertyExtractor,
    StaticUsageExtractor, TypeDeclarationExtractor,
};
use crate::cache::TreeCache;
use crate::config::{Config, OutputFormat};
use crate::error::AnalysisError;
use crate::parser::{FileIdentity, ParseOptions, SwiftParser};
use crate::report::{self, FileFact, TextRecord};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Extract structural facts from Swift sources.
///
/// Lists imports, type declarations, initializers and properties, and
/// answers conformance and static member usage queries, per file.
#[derive(Parser)]
#[command(name = "swiftfacts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Treat files that need syntax error recovery as parse failures
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the modules imported across all files
    Imports(PathArgs),
    /// Report which types inherit from a type, per file
    Conformance(TypeArgs),
    /// Report whether a static member is accessed, per file
    StaticUsage(MemberArgs),
    /// List the initializers of a type
    Initializers(TypeArgs),
    /// List the properties of a type
    Properties(TypeArgs),
    /// List class, struct, protocol and enum declarations
    Types(PathArgs),
}

/// Arguments for commands that only need input files.
#[derive(Args)]
pub struct PathArgs {
    /// File or directory to analyze
    #[arg(short, long)]
    pub path: PathBuf,
}

/// Arguments for queries about one type.
#[derive(Args)]
pub struct TypeArgs {
    /// File or directory to analyze
    #[arg(short, long)]
    pub path: PathBuf,

    /// Name of the queried type
    #[arg(short, long)]
    pub type_name: String,
}

/// Arguments for static member queries.
#[derive(Args)]
pub struct MemberArgs {
    /// File or directory to analyze
    #[arg(short, long)]
    pub path: PathBuf,

    /// Name of the type owning the member
    #[arg(short, long)]
    pub type_name: String,

    /// Name of the static member
    #[arg(short, long)]
    pub member_name: String,
}

/// Settings resolved from flags and config for one invocation.
struct Session {
    config: Config,
    format: OutputFormat,
    cache: TreeCache<SwiftParser>,
}

impl Session {
    fn new(cli: &Cli) -> anyhow::Result<Self> {
        let (config, source) = Config::load(cli.config.as_deref())?;
        if let Some(source) = source {
            log::debug!("loaded config from {}", source.display());
        }
        let format = match &cli.format {
            Some(format) => OutputFormat::parse(format)?,
            None => config.output_format()?,
        };
        let options = ParseOptions {
            strict: cli.strict || config.strict,
        };
        Ok(Self {
            config,
            format,
            cache: TreeCache::new(SwiftParser::with_options(options)),
        })
    }

    /// Run `extractor` over every file, skipping files that fail to parse.
    ///
    /// Returns the per-file outputs and the number of failed files.
    fn extract_all<E: FactExtractor>(
        &mut self,
        extractor: &E,
        files: &[FileIdentity],
    ) -> (Vec<(FileIdentity, E::Output)>, usize) {
        let mut outputs = Vec::with_capacity(files.len());
        let mut failed = 0;
        for file in files {
            match extractor.run(&mut self.cache, file) {
                Ok(output) => outputs.push((file.clone(), output)),
                Err(e) => {
                    log::warn!("skipping {}: {}", file, e);
                    eprintln!("Warning: {}", e);
                    failed += 1;
                }
            }
        }
        (outputs, failed)
    }

    fn finish<T: TextRecord + serde::Serialize>(
        &self,
        command: &str,
        records: &[T],
        scanned: usize,
        failed: usize,
    ) -> anyhow::Result<i32> {
        report::write_records(records, self.format)?;
        if self.format == OutputFormat::Text {
            report::write_summary(command, scanned, failed);
        }
        Ok(if failed == 0 { EXIT_SUCCESS } else { EXIT_FAILED })
    }
}

/// Reject empty names and names that are not Swift identifiers.
pub fn validate_identifier(arg: &str, value: &str) -> Result<(), AnalysisError> {
    if value.is_empty() {
        return Err(AnalysisError::empty_argument(arg));
    }
    let bare = value
        .strip_prefix('`')
        .and_then(|v| v.strip_suffix('`'))
        .unwrap_or(value);
    let mut chars = bare.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AnalysisError::invalid_argument(arg, value))
    }
}

/// Collect the files to analyze under `root`, sorted.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let excludes = config.exclude_set()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and configured directories
            !name.starts_with('.') && !config.is_excluded_dir(&name)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !config.handles_extension(ext) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_match(relative) || excludes.is_match(path) {
            log::debug!("excluded {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Resolve `path` into file identities, or print why it cannot be used.
fn resolve_files(path: &Path, config: &Config) -> anyhow::Result<Option<Vec<FileIdentity>>> {
    if !path.exists() {
        eprintln!("Error: cannot access path {:?}", path);
        return Ok(None);
    }
    let files = collect_files(path, config)?;
    if files.is_empty() {
        eprintln!("Warning: no files to scan");
    }
    Ok(Some(files.into_iter().map(FileIdentity::from).collect()))
}

/// Run the imports command.
pub fn run_imports(cli: &Cli, args: &PathArgs) -> anyhow::Result<i32> {
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let (outputs, failed) = session.extract_all(&ImportExtractor::new(), &files);
    let imports: BTreeSet<_> = outputs.into_iter().flat_map(|(_, found)| found).collect();
    let imports: Vec<_> = imports.into_iter().collect();
    session.finish("imports", &imports, files.len(), failed)
}

/// Run the conformance command.
pub fn run_conformance(cli: &Cli, args: &TypeArgs) -> anyhow::Result<i32> {
    validate_identifier("type-name", &args.type_name)?;
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let extractor = ConformanceExtractor::new(&args.type_name);
    let (outputs, failed) = session.extract_all(&extractor, &files);
    let records: Vec<_> = outputs
        .into_iter()
        .map(|(file, conformance)| FileFact::new(file, conformance))
        .collect();
    session.finish("conformance", &records, files.len(), failed)
}

/// Run the static-usage command.
pub fn run_static_usage(cli: &Cli, args: &MemberArgs) -> anyhow::Result<i32> {
    validate_identifier("type-name", &args.type_name)?;
    validate_identifier("member-name", &args.member_name)?;
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let extractor = StaticUsageExtractor::new(&args.type_name, &args.member_name);
    let (outputs, failed) = session.extract_all(&extractor, &files);
    let records: Vec<_> = outputs
        .into_iter()
        .map(|(file, usage)| FileFact::new(file, usage))
        .collect();
    session.finish("static-usage", &records, files.len(), failed)
}

/// Run the initializers command.
pub fn run_initializers(cli: &Cli, args: &TypeArgs) -> anyhow::Result<i32> {
    validate_identifier("type-name", &args.type_name)?;
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let extractor = InitializerExtractor::new(&args.type_name);
    let (outputs, failed) = session.extract_all(&extractor, &files);
    let records = per_item(outputs);
    session.finish("initializers", &records, files.len(), failed)
}

/// Run the properties command.
pub fn run_properties(cli: &Cli, args: &TypeArgs) -> anyhow::Result<i32> {
    validate_identifier("type-name", &args.type_name)?;
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let extractor = PropertyExtractor::new(&args.type_name);
    let (outputs, failed) = session.extract_all(&extractor, &files);
    let records = per_item(outputs);
    session.finish("properties", &records, files.len(), failed)
}

/// Run the types command.
pub fn run_types(cli: &Cli, args: &PathArgs) -> anyhow::Result<i32> {
    let mut session = Session::new(cli)?;
    let Some(files) = resolve_files(&args.path, &session.config)? else {
        return Ok(EXIT_ERROR);
    };

    let (outputs, failed) = session.extract_all(&TypeDeclarationExtractor::new(), &files);
    let records = per_item(outputs);
    session.finish("types", &records, files.len(), failed)
}

/// Flatten per-file collections into one record per item.
fn per_item<C: IntoIterator>(outputs: Vec<(FileIdentity, C)>) -> Vec<FileFact<C::Item>> {
    outputs
        .into_iter()
        .flat_map(|(file, items)| {
            items
                .into_iter()
                .map(move |item| FileFact::new(file.clone(), item))
        })
        .collect()
}
