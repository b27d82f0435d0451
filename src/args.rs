use clap::{Parser, ValueEnum};
use job_scout::PageSource;
use job_scout::render::RenderFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(about = "Extracts a job posting from a page and suggests matching clubs, hackathons and courses")]
#[command(version)]
pub struct Args {
    /// Page to read the posting from (web URL or saved file)
    pub source: String,

    /// Source type (web, file)
    #[arg(short, long, value_enum, default_value_t = SourceTypeArg::Web)]
    pub type_: SourceTypeArg,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the recommendation backend
    #[arg(long)]
    pub backend_url: Option<String>,

    /// URL of the WebDriver server
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceTypeArg {
    Web,
    File,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Text,
}

/// Convert from CLI argument source type to internal page source
pub fn convert_source(arg_type: SourceTypeArg, source: &str) -> PageSource {
    match arg_type {
        SourceTypeArg::Web => PageSource::Web(source.to_string()),
        SourceTypeArg::File => PageSource::File(PathBuf::from(source)),
    }
}

/// Convert from CLI argument format to render format
pub fn convert_format(arg: FormatArg) -> RenderFormat {
    match arg {
        FormatArg::Html => RenderFormat::Html,
        FormatArg::Text => RenderFormat::Text,
    }
}
