use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "whitehouse-rss")]
#[command(about = "Generate an RSS 2.0 feed from the White House briefings & statements page")]
#[command(version)]
pub struct Cli {
    /// Listing page to scrape (defaults to the White House briefings & statements page)
    #[arg(long)]
    pub url: Option<String>,

    /// Output file path (defaults to whitehouse_briefings.xml)
    #[arg(short, long)]
    pub output: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Public URL of the generated feed, advertised as its atom:link rel="self"
    #[arg(long)]
    pub self_url: Option<String>,

    /// Dry run - print the feed to stdout instead of writing the output file
    #[arg(long)]
    pub dry_run: bool,
}
