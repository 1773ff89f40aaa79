//! rt-sign: print RT authentication headers for a request body.
//!
//! Reads a JSON body from a file or stdin and prints the four `RT-*` headers
//! for it, either as a JSON object or as `Name: value` lines ready to paste
//! into an HTTP client. `--print-body` adds the canonical body, which is
//! the exact byte string the signature covers.

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rt_auth::{
    canonicalize, AuthHeaders, Clock, Credentials, FixedClock, FixedRequestId, HeaderGenerator,
    RequestIdGenerator, SystemClock, UuidRequestIdGenerator,
};

/// Output layout for the generated headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON object keyed by header name
    Json,
    /// One `Name: value` line per header
    Http,
}

/// rt-sign: RT header generator for the eSIM access API
#[derive(Parser, Debug)]
#[command(name = "rt-sign")]
#[command(about = "Print RT-* authentication headers for a JSON request body")]
struct Args {
    /// Access code issued by the API
    #[arg(short, long, env = "RT_ACCESS_CODE")]
    access_code: Option<String>,

    /// Secret key issued by the API
    #[arg(short, long, env = "RT_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// JSON body file, or `-` for stdin. Empty input signs `{}`
    #[arg(short, long, default_value = "-")]
    body: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pin RT-Timestamp (milliseconds since epoch) for reproducible output
    #[arg(long)]
    timestamp: Option<u64>,

    /// Pin RT-RequestID for reproducible output
    #[arg(long)]
    request_id: Option<String>,

    /// Also print the canonical body that was signed; send exactly these bytes
    #[arg(long)]
    print_body: bool,
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let output = run(&args, io::stdin().lock())?;
    println!("{}", output);

    Ok(())
}

/// Logs go to stderr so stdout carries only the headers.
fn init_logging() {
    let filter = EnvFilter::try_from_env("RT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn run(args: &Args, stdin: impl Read) -> Result<String> {
    let credentials = credentials(args)?;
    let body = read_body(&args.body, stdin)?;

    let fixed_clock;
    let clock: &dyn Clock = match args.timestamp {
        Some(ms) => {
            fixed_clock = FixedClock::new(ms);
            &fixed_clock
        }
        None => &SystemClock,
    };

    let fixed_id;
    let request_ids: &dyn RequestIdGenerator = match &args.request_id {
        Some(id) if id.trim().is_empty() => bail!("--request-id must not be empty"),
        Some(id) => {
            fixed_id = FixedRequestId::new(id.as_str());
            &fixed_id
        }
        None => &UuidRequestIdGenerator,
    };

    let headers = HeaderGenerator::with_providers(clock, request_ids)
        .generate_for(&credentials, &body)
        .context("Failed to generate RT headers")?;

    info!(request_id = headers.request_id(), "Signed request body");

    let signed_body = if args.print_body {
        Some(canonicalize(&body).context("Failed to canonicalize request body")?)
    } else {
        None
    };

    render(&headers, signed_body.as_deref(), args.format)
}

fn credentials(args: &Args) -> Result<Credentials> {
    let access_code = args
        .access_code
        .clone()
        .context("Missing access code: pass --access-code or set RT_ACCESS_CODE")?;
    let secret_key = args
        .secret_key
        .clone()
        .context("Missing secret key: pass --secret-key or set RT_SECRET_KEY")?;

    Ok(Credentials::new(access_code, secret_key)?)
}

fn read_body(source: &str, mut stdin: impl Read) -> Result<Value> {
    let raw = if source == "-" {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("Failed to read body from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read body file {}", source))?
    };

    if raw.trim().is_empty() {
        debug!("Empty body, signing {{}}");
        return Ok(json!({}));
    }

    serde_json::from_str(&raw).context("Request body is not valid JSON")
}

fn render(headers: &AuthHeaders, body: Option<&str>, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_value(headers)?;
            if let Some(body) = body {
                out["body"] = Value::String(body.to_string());
            }
            Ok(serde_json::to_string_pretty(&out)?)
        }
        Format::Http => {
            let mut out = headers
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("\n");
            if let Some(body) = body {
                out.push_str("\n\n");
                out.push_str(body);
            }
            Ok(out)
        }
    }
}
