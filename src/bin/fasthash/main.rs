//! fasthash CLI - compute and check 128-bit fast-hash digests.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use fasthash::options::parse_seed;
use fasthash::{
    hash_files, hash_text_with, verify_file, Digest, HashOptions, IdLayout, TextEncoding, Variant,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Default)]
struct Cli {
    level: Option<&'static str>,
    seed: Option<u32>,
    standard: bool,
    legacy: bool,
    utf16: bool,
    rfc: bool,
    json: bool,
    text: bool,
    save: bool,
    version: bool,
    positional: Vec<String>,
}

impl Cli {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut cli = Cli::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-v" | "--verbose" => cli.level = Some("debug"),
                "-vv" | "--trace" => cli.level = Some("trace"),
                "-q" | "--quiet" => cli.level = Some("off"),
                "-s" | "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    cli.seed = Some(parse_seed(&value)?);
                }
                "--standard" => cli.standard = true,
                "--legacy" => cli.legacy = true,
                "--utf16" => cli.utf16 = true,
                "--rfc" => cli.rfc = true,
                "--json" | "-j" => cli.json = true,
                "--text" => cli.text = true,
                "--save" => cli.save = true,
                "-V" | "--version" => cli.version = true,
                "--" => {
                    cli.positional.extend(args.by_ref());
                    break;
                }
                _ => cli.positional.push(arg),
            }
        }
        Ok(cli)
    }

    /// Config file, then `FASTHASH_SEED`, then flags.
    fn options(&self) -> Result<HashOptions> {
        let mut opts = HashOptions::load().apply_env()?;
        if self.seed.is_some() {
            opts.seed = self.seed;
        }
        match (self.standard, self.legacy) {
            (true, true) => bail!("--standard and --legacy cannot be combined"),
            (true, false) => opts.variant = Variant::Standard,
            (false, true) => opts.variant = Variant::Legacy,
            (false, false) => {}
        }
        if self.utf16 {
            opts.encoding = TextEncoding::Utf16Le;
        }
        if self.rfc {
            opts.layout = IdLayout::Rfc4122;
        }
        Ok(opts)
    }
}

/// One line of output.
#[derive(Serialize)]
struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::parse(env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(exit_status(Err(e))),
    };
    init_logging(cli.level);

    ExitCode::from(exit_status(run(&cli)))
}

/// Process exit status for a command result; reports errors on stderr.
fn exit_status(result: Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Returns `Ok(false)` when the command ran but found a failure.
fn run(cli: &Cli) -> Result<bool> {
    if cli.version {
        print_version();
        return Ok(true);
    }

    let Some(command) = cli.positional.first() else {
        print_help();
        return Ok(true);
    };
    let args = &cli.positional[1..];
    let opts = cli.options()?;
    tracing::debug!(?opts, "effective options");

    match command.as_str() {
        "f" | "file" => {
            if args.is_empty() {
                bail!("missing file argument\nUsage: fasthash file <path>...");
            }
            cmd_file(args, &opts, cli.json, false)
        }
        "t" | "text" => {
            if args.is_empty() {
                bail!("missing text argument\nUsage: fasthash text <string>");
            }
            cmd_text(&args.join(" "), &opts, cli.json, false)
        }
        "g" | "guid" => {
            if args.is_empty() {
                bail!("missing argument\nUsage: fasthash guid <path>... | fasthash guid --text <string>");
            }
            if cli.text {
                cmd_text(&args.join(" "), &opts, cli.json, true)
            } else {
                cmd_file(args, &opts, cli.json, true)
            }
        }
        "c" | "check" => {
            if args.len() < 2 {
                bail!("missing arguments\nUsage: fasthash check <digest> <path>");
            }
            cmd_check(&args[0], &args[1], &opts)
        }
        "config" => cmd_config(&opts, cli.save),
        "h" | "help" | "-h" | "--help" => {
            print_help();
            Ok(true)
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_help();
            Ok(false)
        }
    }
}

fn print_version() {
    println!(
        "fasthash {} (built {} {})",
        env!("CARGO_PKG_VERSION"),
        env!("FASTHASH_BUILD_DATE"),
        env!("FASTHASH_BUILD_TIME")
    );
}

fn print_help() {
    println!("fasthash - 128-bit fast hash for change detection");
    println!();
    println!("USAGE:");
    println!("    fasthash [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    f, file  <path>...             Digest of each file");
    println!("    t, text  <string>              Digest of UTF-8 text");
    println!("    g, guid  <path>...             Identifier (UUID) of each file");
    println!("    g, guid  --text <string>       Identifier (UUID) of text");
    println!("    c, check <digest> <path>       Verify a file against a digest");
    println!("    config [--save]                Show (or persist) effective options");
    println!("    h, help                        Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -s, --seed <N>   Seed, decimal or 0x hex (default 0)");
    println!("    --standard       Published MurmurHash3_x64_128 schedule");
    println!("    --legacy         Schedule of earlier Xrd.FastHash digests");
    println!("    --utf16          Hash text as UTF-16LE instead of UTF-8");
    println!("    --rfc            RFC 4122 byte order for identifiers (default: GUID)");
    println!("    -j, --json       JSON output");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Suppress all log output");
    println!("    -V, --version    Show version");
    println!("    --               Treat every later argument as positional");
    println!();
    println!("ENVIRONMENT:");
    println!("    FASTHASH_SEED    Seed override (below --seed, above config file)");
    println!("    RUST_LOG         Log filter, overrides -v/-q");
    println!();
    println!("NOTES:");
    println!("    - Empty files and blank text hash to 00000000000000000000000000000000");
    if let Some(path) = HashOptions::path() {
        println!("    - Config file: {}", path.display());
    }
}

fn print_entries(entries: &[Entry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    for e in entries {
        let value = match (&e.uuid, &e.digest) {
            (Some(id), _) => id.clone(),
            (None, Some(d)) => d.to_hex(),
            (None, None) => format!("error: {}", e.error.as_deref().unwrap_or("unknown")),
        };
        match &e.path {
            Some(p) => println!("{}  {}", value, p.display()),
            None => println!("{}", value),
        }
    }
    Ok(())
}

fn cmd_file(paths: &[String], opts: &HashOptions, json: bool, as_uuid: bool) -> Result<bool> {
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    let results = hash_files(&paths, opts);

    let mut ok = true;
    let entries: Vec<Entry> = results
        .into_iter()
        .map(|r| match r.digest {
            Ok(d) => Entry {
                path: Some(r.path),
                uuid: as_uuid.then(|| d.to_uuid(opts.layout).to_string()),
                digest: Some(d),
                error: None,
            },
            Err(e) => {
                ok = false;
                tracing::error!(path = %r.path.display(), error = %e, "cannot hash");
                Entry { path: Some(r.path), digest: None, uuid: None, error: Some(e.to_string()) }
            }
        })
        .collect();

    print_entries(&entries, json)?;
    Ok(ok)
}

fn text_entry(text: &str, opts: &HashOptions, as_uuid: bool) -> Entry {
    let d = hash_text_with(Some(text), opts);
    Entry {
        path: None,
        uuid: as_uuid.then(|| d.to_uuid(opts.layout).to_string()),
        digest: Some(d),
        error: None,
    }
}

fn cmd_text(text: &str, opts: &HashOptions, json: bool, as_uuid: bool) -> Result<bool> {
    print_entries(&[text_entry(text, opts, as_uuid)], json)?;
    Ok(true)
}

fn cmd_check(expected: &str, path: &str, opts: &HashOptions) -> Result<bool> {
    let expected: Digest = expected.parse()?;
    let ok = verify_file(path, &expected, opts).with_context(|| format!("Failed to hash {}", path))?;
    println!("{}: {}", path, if ok { "OK" } else { "FAILED" });
    Ok(ok)
}

fn cmd_config(opts: &HashOptions, save: bool) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(opts)?);
    if save {
        let path = opts.save()?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_flags_anywhere() {
        let cli = parse(&["file", "-s", "0x10", "a.bin", "--standard", "b.bin", "-v"]).unwrap();
        assert_eq!(cli.seed, Some(16));
        assert!(cli.standard);
        assert_eq!(cli.level, Some("debug"));
        assert_eq!(cli.positional, vec!["file", "a.bin", "b.bin"]);
    }

    #[test]
    fn test_parse_seed_errors() {
        assert!(parse(&["text", "--seed"]).is_err());
        assert!(parse(&["text", "--seed", "nope", "x"]).is_err());
    }

    #[test]
    fn test_parse_double_dash() {
        let cli = parse(&["-q", "text", "--", "-v", "-s", "foo", "--"]).unwrap();
        assert_eq!(cli.level, Some("off"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.positional, vec!["text", "-v", "-s", "foo", "--"]);
    }

    #[test]
    fn test_variant_flags() {
        let cli = parse(&["text", "x", "--legacy"]).unwrap();
        assert_eq!(cli.options().unwrap().variant, Variant::Legacy);

        let cli = parse(&["--standard", "--legacy", "text", "x"]).unwrap();
        assert!(cli.options().is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(true)), 0);
        assert_eq!(exit_status(Ok(false)), 1);
        assert_eq!(exit_status(Err(anyhow::anyhow!("boom"))), 1);
    }

    #[test]
    fn test_run_check() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, b"The quick brown fox jumps over the lazy dog").unwrap();
        let path = f.path().to_str().unwrap();

        // Non-empty content never hashes to the empty digest.
        let cli = parse(&["check", "00000000000000000000000000000000", path]).unwrap();
        assert!(!run(&cli).unwrap());
        assert_eq!(exit_status(run(&cli)), 1);

        let opts = HashOptions::default();
        assert!(cmd_check("8ba872d38b945668d2d3b153fe0245de", path, &opts).unwrap());
        assert!(!cmd_check("6c1b07bc7bbc4be347939ac4a93c437a", path, &opts).unwrap());

        assert!(run(&parse(&["check", "not-hex", path]).unwrap()).is_err());
        assert!(run(&parse(&["check", "8ba872d38b945668d2d3b153fe0245de"]).unwrap()).is_err());
        assert!(run(&parse(&["check", "8ba872d38b945668d2d3b153fe0245de", "/no/such/file"]).unwrap())
            .is_err());
    }

    #[test]
    fn test_run_commands() {
        assert!(!run(&parse(&["frobnicate"]).unwrap()).unwrap());
        assert!(run(&parse(&["help"]).unwrap()).unwrap());
        assert!(run(&parse(&[]).unwrap()).unwrap());
        assert!(run(&parse(&["-V"]).unwrap()).unwrap());
        assert!(run(&parse(&["text", "--", "-v"]).unwrap()).unwrap());
        assert!(run(&parse(&["guid", "--text", "hello"]).unwrap()).unwrap());
        assert!(run(&parse(&["config"]).unwrap()).unwrap());
        assert!(!run(&parse(&["file", "/no/such/file"]).unwrap()).unwrap());

        assert!(run(&parse(&["text"]).unwrap()).is_err());
        assert!(run(&parse(&["guid"]).unwrap()).is_err());
        assert!(run(&parse(&["file"]).unwrap()).is_err());
    }

    #[test]
    fn test_guid_uses_layout() {
        let guid = HashOptions::default();
        let entry = text_entry("hello", &guid, true);
        assert_eq!(entry.uuid.as_deref(), Some("41bd9b02-a7b3-cbd8-191d-ae486a901e5b"));

        let rfc = HashOptions { layout: IdLayout::Rfc4122, ..guid };
        let entry = text_entry("hello", &rfc, true);
        assert_eq!(entry.uuid.as_deref(), Some("029bbd41-b3a7-d8cb-191d-ae486a901e5b"));

        assert!(text_entry("hello", &guid, false).uuid.is_none());
        assert_eq!(text_entry("   ", &guid, true).uuid.as_deref(), Some("00000000-0000-0000-0000-000000000000"));
    }
}
