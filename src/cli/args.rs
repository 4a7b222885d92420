use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "metbrowse",
    version,
    about = "terminal browser for the Met Museum collection API",
    long_about = "Metbrowse browses the Metropolitan Museum of Art's public collection API from the terminal: list departments, page through a department's objects, and open object detail views.\n\nExamples:\n  metbrowse --departments\n  metbrowse -d 6 --page 2 --mode list\n  metbrowse -d 6 --interactive\n  metbrowse --object 45734\n\nTip: Use --config to persist browsing settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        long = "departments",
        help_heading = "Browse",
        help = "List all departments and exit (the default when nothing else is asked)."
    )]
    pub departments: bool,

    #[arg(
        short = 'd',
        long = "dept",
        visible_alias = "department",
        value_name = "ID",
        help_heading = "Browse",
        help = "Department to browse."
    )]
    pub department: Option<u32>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Browse",
        help = "Page to show (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'O',
        long = "obj",
        visible_alias = "object",
        value_name = "ID",
        help_heading = "Browse",
        help = "Show the detail view for a single object and exit."
    )]
    pub object: Option<u64>,

    #[arg(
        short = 'm',
        long = "md",
        visible_alias = "mode",
        value_name = "MODE",
        help_heading = "Browse",
        help = "Display mode for object pages (grid or list)."
    )]
    pub mode: Option<String>,

    #[arg(
        short = 'I',
        long = "int",
        visible_alias = "interactive",
        help_heading = "Browse",
        help = "Interactive browse session (n/p to page, m to toggle mode, o <ID> for detail, q to quit)."
    )]
    pub interactive: bool,

    #[arg(
        long = "ids",
        help_heading = "Browse",
        help = "Print the raw object-id listing for the department, 100 ids per page."
    )]
    pub ids: bool,

    #[arg(
        short = 'W',
        long = "wi",
        visible_alias = "with-images",
        help_heading = "Browse",
        help = "Use the search endpoint as the id source, pre-filtered to objects with images."
    )]
    pub with_images: bool,

    #[arg(
        short = 'n',
        long = "ipp",
        visible_alias = "items-per-page",
        value_name = "N",
        help_heading = "Browse",
        help = "Objects per page."
    )]
    pub items_per_page: Option<usize>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'r',
        long = "rt",
        visible_alias = "rate",
        value_name = "RPS",
        help_heading = "HTTP",
        help = "Request rate limit (requests per second)."
    )]
    pub rate: Option<u32>,

    #[arg(
        short = 'b',
        long = "api",
        visible_alias = "api-base",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Base URL of the collection API."
    )]
    pub api_base: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.metbrowse/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file to the default location and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the loaded records to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json); inferred from the file extension when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,
}
