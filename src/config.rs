use std::path::PathBuf;

use clap::Parser;

/// Default upload size limit: 32 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 32 * 1024 * 1024;

/// Command-line arguments for the PDF text server.
///
/// Every option can also be set from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "pdf-text-upload")]
#[command(version, about = "Extract the text of uploaded PDF files over HTTP")]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "PDF_TEXT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PDF_TEXT_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory for temporary upload files
    #[arg(long, env = "PDF_TEXT_UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Largest accepted upload in bytes
    #[arg(long, env = "PDF_TEXT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: u64,

    /// Number of HTTP worker threads (defaults to the CPU count)
    #[arg(long, env = "PDF_TEXT_WORKERS")]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::try_parse_from(["pdf-text-upload"]).unwrap();
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 5000);
        assert_eq!(args.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(args.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(args.workers, None);
        assert!(!args.verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "pdf-text-upload",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--uploads-dir",
            "/tmp/scratch",
            "--max-upload-bytes",
            "1024",
            "--workers",
            "2",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 9000);
        assert_eq!(args.uploads_dir, PathBuf::from("/tmp/scratch"));
        assert_eq!(args.max_upload_bytes, 1024);
        assert_eq!(args.workers, Some(2));
        assert!(args.verbose);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
