use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pagemodal",
    version,
    about = "Replay modal dialog interactions against a page fixture"
)]
pub struct Args {
    /// Page fixture (JSON) with sections and a script of events
    #[arg(short, long)]
    pub page: PathBuf,

    /// Config file (defaults to the user's config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report the video API ready this many milliseconds after it is requested.
    /// Without it, readiness comes only from the script.
    #[arg(long)]
    pub api_delay_ms: Option<u64>,

    /// Print the final page state as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "pagemodal",
            "--page",
            "demos/page.json",
            "--api-delay-ms",
            "20",
            "--json",
        ]);
        assert_eq!(args.page, PathBuf::from("demos/page.json"));
        assert_eq!(args.config, None);
        assert_eq!(args.api_delay_ms, Some(20));
        assert!(args.json);
    }

    #[test]
    fn test_page_is_required() {
        assert!(Args::try_parse_from(["pagemodal"]).is_err());
    }
}
